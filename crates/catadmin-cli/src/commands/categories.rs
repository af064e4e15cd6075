use std::sync::Arc;

use anyhow::Result;
use catadmin_application::{AdminCategoriesScreen, CategoriesScreen, CategoryFormScreen};
use catadmin_core::Route;
use catadmin_core::category::CategoryPayload;
use clap::Subcommand;

use super::inline_error;
use crate::bootstrap::AppContext;

#[derive(Subcommand)]
pub enum CategoryAction {
    /// Collapsible tree as shown in the category table
    Tree {
        /// Ancestor-inclusive name filter
        #[arg(long, default_value = "")]
        search: String,
        /// Categories to expand
        #[arg(long, value_delimiter = ',')]
        expand: Vec<i64>,
        /// Expand every category
        #[arg(long)]
        all: bool,
    },
    /// Roots with their direct children
    List,
    /// Parent picker options
    Parents {
        /// Category being edited; it and its subtree are left out
        #[arg(long)]
        exclude: Option<i64>,
    },
    /// Create a category
    Create {
        #[arg(long)]
        name_en: String,
        #[arg(long)]
        name_me: String,
        #[arg(long)]
        parent: Option<i64>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Rename or move a category
    Update {
        id: i64,
        #[arg(long)]
        name_en: Option<String>,
        #[arg(long)]
        name_me: Option<String>,
        /// New parent; 0 makes the category a root
        #[arg(long)]
        parent: Option<i64>,
    },
    /// Delete a category
    Delete { id: i64 },
    /// Set the sort value of a category
    Sort { id: i64, sort: i64 },
}

pub async fn run(ctx: &AppContext, action: CategoryAction) -> Result<()> {
    let api = Arc::new(ctx.client.clone());
    match action {
        CategoryAction::Tree {
            search,
            expand,
            all,
        } => {
            ctx.require(Route::Categories)?;
            let screen = CategoriesScreen::new(api);
            load(&screen).await?;
            screen.set_search(search).await;

            let expanded: Vec<i64> = if all {
                screen.state().await.list.items.iter().map(|c| c.id).collect()
            } else {
                expand
            };
            for id in expanded {
                screen.toggle(id).await;
            }

            for row in screen.rows().await? {
                let marker = match (row.has_children, row.is_expanded) {
                    (false, _) => " ",
                    (true, true) => "▾",
                    (true, false) => "▸",
                };
                println!(
                    "{}{} {} [#{} sort {}]{}",
                    "  ".repeat(row.level),
                    marker,
                    row.category.display_name(),
                    row.category.id,
                    row.category.sort_key(),
                    if row.category.status { "" } else { " (inactive)" }
                );
            }
        }
        CategoryAction::List => {
            ctx.require(Route::AdminCategories)?;
            let screen = AdminCategoriesScreen::new(api);
            screen
                .load()
                .await
                .map_err(|e| inline_error(e, "Failed to load categories"))?;
            for row in screen.rows().await? {
                let prefix = if row.level > 0 { "  └ " } else { "" };
                println!("{}{} [#{}]", prefix, row.category.display_name(), row.category.id);
            }
        }
        CategoryAction::Parents { exclude } => {
            ctx.require(Route::Categories)?;
            let screen = CategoriesScreen::new(api);
            load(&screen).await?;
            for option in screen.parent_options(exclude).await? {
                println!("{:>5}  {}", option.id, option.label);
            }
        }
        CategoryAction::Create {
            name_en,
            name_me,
            parent,
            icon,
            color,
        } => {
            ctx.require(Route::CategoryNew)?;
            let form = CategoryFormScreen::create(api);
            form.set_payload(CategoryPayload {
                parent_id: parent.filter(|p| *p != 0),
                name_en,
                name_me,
                icon,
                color,
                status: None,
            })
            .await;
            form.save().await.map_err(|e| inline_error(e, "Failed to save category"))?;
            println!("Category created");
        }
        CategoryAction::Update {
            id,
            name_en,
            name_me,
            parent,
        } => {
            ctx.require(Route::CategoryEdit(id))?;
            let form = CategoryFormScreen::edit(api, id);
            form.load().await.map_err(|e| inline_error(e, "Failed to load category"))?;
            let mut payload = form.state().await.payload;
            if let Some(name_en) = name_en {
                payload.name_en = name_en;
            }
            if let Some(name_me) = name_me {
                payload.name_me = name_me;
            }
            if let Some(parent) = parent {
                payload.parent_id = Some(parent).filter(|p| *p != 0);
            }
            form.set_payload(payload).await;
            form.save().await.map_err(|e| inline_error(e, "Failed to save category"))?;
            println!("Category #{} updated", id);
        }
        CategoryAction::Delete { id } => {
            ctx.require(Route::Categories)?;
            let screen = CategoriesScreen::new(api);
            screen
                .delete(id)
                .await
                .map_err(|e| inline_error(e, "Failed to delete category"))?;
            println!("Category #{} deleted", id);
        }
        CategoryAction::Sort { id, sort } => {
            ctx.require(Route::Categories)?;
            let screen = CategoriesScreen::new(api);
            load(&screen).await?;
            screen.edit_sort(id, sort).await;
            screen
                .commit_sort(id)
                .await
                .map_err(|e| inline_error(e, "Failed to update sort"))?;
            println!("Category #{} sort set to {}", id, sort);
        }
    }
    Ok(())
}

async fn load(screen: &CategoriesScreen) -> Result<()> {
    screen
        .load()
        .await
        .map_err(|e| inline_error(e, "Failed to load categories"))
}
