use std::sync::Arc;

use anyhow::Result;
use catadmin_application::UsersScreen;
use catadmin_core::Route;
use catadmin_core::user::UserUpdate;
use clap::Subcommand;

use super::inline_error;
use crate::bootstrap::AppContext;

#[derive(Subcommand)]
pub enum UserAction {
    /// List users
    List,
    /// Change a user's name or email
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Grant or revoke the admin ability
    ToggleAdmin { id: i64 },
    /// Delete a user
    Delete { id: i64 },
}

pub async fn run(ctx: &AppContext, action: UserAction) -> Result<()> {
    ctx.require(Route::Users)?;
    let screen = UsersScreen::new(Arc::new(ctx.client.clone()));

    let result = match action {
        UserAction::List => screen.load().await,
        UserAction::Update { id, name, email } => {
            screen.update(id, &UserUpdate { name, email }).await
        }
        UserAction::ToggleAdmin { id } => screen.toggle_admin(id).await,
        UserAction::Delete { id } => screen.delete(id).await,
    };
    result.map_err(|e| inline_error(e, "Request failed"))?;

    let state = screen.state().await;
    if let Some(error) = state.error {
        eprintln!("warning: {}", error);
    }
    for user in state.items {
        println!(
            "{:>5}  {:<24} {:<32} {}",
            user.id,
            user.name,
            user.email,
            if user.is_admin() { "admin" } else { "" }
        );
    }
    Ok(())
}
