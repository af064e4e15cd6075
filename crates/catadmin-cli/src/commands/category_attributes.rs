use std::sync::Arc;

use anyhow::{Result, bail};
use catadmin_application::CategoryAttributesScreen;
use catadmin_core::Route;
use catadmin_core::attribute::CategoryAttributePayload;
use clap::{Args, Subcommand};

use super::inline_error;
use crate::bootstrap::AppContext;

#[derive(Args)]
pub struct PivotArgs {
    #[arg(long)]
    required: bool,
    #[arg(long)]
    show_in_filter: bool,
    #[arg(long)]
    unique_per_listing: bool,
    #[arg(long, default_value_t = 0)]
    sort_order: i64,
}

#[derive(Subcommand)]
pub enum CategoryAttributeAction {
    /// Category hierarchy, optionally filtered by name
    Categories {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Attributes attached to a category
    Show { category_id: i64 },
    /// Attach an attribute to a category
    Attach {
        category_id: i64,
        attribute_id: i64,
        #[command(flatten)]
        settings: PivotArgs,
    },
    /// Change the settings of an attached attribute
    Update {
        category_id: i64,
        pivot_id: i64,
        #[command(flatten)]
        settings: PivotArgs,
    },
    /// Detach an attribute from a category
    Detach {
        category_id: i64,
        pivot_id: i64,
        /// Delete the association row by id instead of the (category, attribute) pair
        #[arg(long)]
        by_pivot: bool,
    },
}

pub async fn run(ctx: &AppContext, action: CategoryAttributeAction) -> Result<()> {
    ctx.require(Route::CategoryAttributes)?;
    let api = Arc::new(ctx.client.clone());
    let screen = CategoryAttributesScreen::new(api.clone(), api.clone(), api);
    screen
        .load()
        .await
        .map_err(|e| inline_error(e, "Failed to load data"))?;

    match action {
        CategoryAttributeAction::Categories { search } => {
            screen.set_search(search).await;
            for entry in screen.category_entries().await? {
                println!("{:>5}  {}", entry.category.id, entry.label);
            }
            return Ok(());
        }
        CategoryAttributeAction::Show { category_id } => {
            select(&screen, category_id).await?;
        }
        CategoryAttributeAction::Attach {
            category_id,
            attribute_id,
            settings,
        } => {
            select(&screen, category_id).await?;
            screen
                .save(None, &payload(attribute_id, settings))
                .await
                .map_err(|e| inline_error(e, "Failed to save attribute"))?;
        }
        CategoryAttributeAction::Update {
            category_id,
            pivot_id,
            settings,
        } => {
            select(&screen, category_id).await?;
            let assigned = screen.state().await.assigned;
            let Some(existing) = assigned.iter().find(|ca| ca.id == pivot_id) else {
                bail!("Category #{} has no attached attribute #{}", category_id, pivot_id);
            };
            let Some(attribute_id) = existing.attribute_id() else {
                bail!("Attached attribute #{} has no attribute id", pivot_id);
            };
            screen
                .save(Some(existing), &payload(attribute_id, settings))
                .await
                .map_err(|e| inline_error(e, "Failed to save attribute"))?;
        }
        CategoryAttributeAction::Detach {
            category_id,
            pivot_id,
            by_pivot,
        } => {
            select(&screen, category_id).await?;
            let removed = if by_pivot {
                screen.delete_pivot(pivot_id).await
            } else {
                screen.remove(pivot_id).await
            };
            removed.map_err(|e| inline_error(e, "Failed to remove attribute"))?;
        }
    }

    for ca in screen.state().await.assigned {
        let settings = ca.settings();
        println!(
            "{:>5}  {:<24} {:<9} required={} filter={} unique={} sort={}",
            ca.id,
            ca.display_name(),
            ca.kind().as_str(),
            settings.is_required,
            settings.show_in_filter,
            settings.unique_per_listing,
            settings.sort_order
        );
    }
    Ok(())
}

async fn select(screen: &CategoryAttributesScreen, category_id: i64) -> Result<()> {
    screen
        .select_category(category_id)
        .await
        .map_err(|e| inline_error(e, "Failed to load category attributes"))
}

fn payload(attribute_id: i64, settings: PivotArgs) -> CategoryAttributePayload {
    CategoryAttributePayload {
        attribute_id,
        is_required: settings.required,
        show_in_filter: settings.show_in_filter,
        unique_per_listing: settings.unique_per_listing,
        sort_order: settings.sort_order,
    }
}
