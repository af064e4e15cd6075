use anyhow::{Result, bail};
use catadmin_core::auth::RegisterRequest;
use catadmin_core::Route;
use clap::Subcommand;

use super::inline_error;
use crate::bootstrap::AppContext;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Defaults to --password
        #[arg(long)]
        password_confirmation: Option<String>,
    },
    /// Sign out, locally even if the backend is unreachable
    Logout,
    /// Show the signed-in user
    Me,
    /// Show the local session without contacting the backend
    Status,
}

pub async fn run(ctx: &AppContext, action: AuthAction) -> Result<()> {
    match action {
        AuthAction::Login { email, password } => {
            let payload = ctx
                .session
                .login(&email, &password)
                .await
                .map_err(|e| inline_error(e, "Login failed"))?;
            let name = payload.user.map(|u| u.name).unwrap_or(email);
            println!("Signed in as {}", name);
            println!("Landing on {}", ctx.router.open(Route::Home));
        }
        AuthAction::Register {
            name,
            email,
            password,
            password_confirmation,
        } => {
            let request = RegisterRequest {
                name,
                email,
                password_confirmation: password_confirmation.unwrap_or_else(|| password.clone()),
                password,
            };
            ctx.session
                .register(&request)
                .await
                .map_err(|e| inline_error(e, "Registration failed"))?;
            println!("Account created for {}", request.email);
        }
        AuthAction::Logout => {
            ctx.session.logout().await?;
            println!("Signed out");
        }
        AuthAction::Me => {
            ctx.require(Route::Dashboard)?;
            match ctx.session.fetch_me().await? {
                Some(user) => {
                    println!("#{} {} <{}>", user.id, user.name, user.email);
                    println!("abilities: {}", user.abilities.join(", "));
                }
                None => bail!("The backend returned no profile"),
            }
        }
        AuthAction::Status => {
            let session = ctx.session.session();
            println!("backend:   {}", ctx.config.api.base_url);
            println!("signed in: {}", session.is_authenticated());
            let abilities: Vec<&str> = session.abilities.iter().map(String::as_str).collect();
            println!("abilities: {}", abilities.join(", "));
        }
    }
    Ok(())
}
