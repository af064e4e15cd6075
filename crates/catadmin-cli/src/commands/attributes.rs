use std::sync::Arc;

use anyhow::Result;
use catadmin_application::AttributesScreen;
use catadmin_core::Route;
use catadmin_core::attribute::{AttributePayload, AttributeType, AttributeValuePayload};
use clap::{Subcommand, ValueEnum};

use super::inline_error;
use crate::bootstrap::AppContext;

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Text,
    Number,
    Select,
    Checkbox,
}

impl From<KindArg> for AttributeType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Text => AttributeType::Text,
            KindArg::Number => AttributeType::Number,
            KindArg::Select => AttributeType::Select,
            KindArg::Checkbox => AttributeType::Checkbox,
        }
    }
}

#[derive(Subcommand)]
pub enum AttributeAction {
    /// List attributes grouped by category
    List,
    /// Create an attribute
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        code: String,
        #[arg(long, value_enum, default_value = "text")]
        kind: KindArg,
        #[arg(long)]
        required: bool,
    },
    /// Delete an attribute
    Delete { id: i64 },
    /// List the predefined values of a select/checkbox attribute
    Values { id: i64 },
    /// Add a predefined value
    AddValue {
        id: i64,
        #[arg(long)]
        en: String,
        #[arg(long)]
        me: String,
    },
    /// Remove a predefined value
    DeleteValue { id: i64, value_id: i64 },
}

pub async fn run(ctx: &AppContext, action: AttributeAction) -> Result<()> {
    ctx.require(Route::Attributes)?;
    let screen = AttributesScreen::new(Arc::new(ctx.client.clone()));
    screen
        .load()
        .await
        .map_err(|e| inline_error(e, "Failed to load attributes"))?;

    match action {
        AttributeAction::List => {
            for group in screen.groups().await {
                println!("{}", group.name);
                for attribute in group.attributes {
                    println!(
                        "  {:>5}  {:<24} {:<16} {}{}",
                        attribute.id,
                        attribute.name,
                        attribute.code,
                        attribute.kind.as_str(),
                        if attribute.is_required { " (required)" } else { "" }
                    );
                }
            }
        }
        AttributeAction::Create {
            name,
            code,
            kind,
            required,
        } => {
            let payload = AttributePayload {
                name,
                code,
                kind: kind.into(),
                is_required: required,
            };
            screen
                .create(&payload)
                .await
                .map_err(|e| inline_error(e, "Failed to save attribute"))?;
            println!("Attribute {} created", payload.code);
        }
        AttributeAction::Delete { id } => {
            screen
                .delete(id)
                .await
                .map_err(|e| inline_error(e, "Failed to delete attribute"))?;
            println!("Attribute #{} deleted", id);
        }
        AttributeAction::Values { id } => {
            open(&screen, id).await?;
            print_values(&screen).await;
        }
        AttributeAction::AddValue { id, en, me } => {
            open(&screen, id).await?;
            screen
                .add_value(&AttributeValuePayload {
                    value_en: en,
                    value_me: me,
                })
                .await
                .map_err(|e| inline_error(e, "Failed to add value"))?;
            print_values(&screen).await;
        }
        AttributeAction::DeleteValue { id, value_id } => {
            open(&screen, id).await?;
            screen
                .delete_value(value_id)
                .await
                .map_err(|e| inline_error(e, "Failed to delete value"))?;
            print_values(&screen).await;
        }
    }
    Ok(())
}

async fn open(screen: &AttributesScreen, id: i64) -> Result<()> {
    screen
        .open_values(id)
        .await
        .map_err(|e| inline_error(e, "Failed to load values"))
}

async fn print_values(screen: &AttributesScreen) {
    for value in screen.state().await.values.items {
        println!("{:>5}  {} / {}", value.id, value.value_en, value.value_me);
    }
}
