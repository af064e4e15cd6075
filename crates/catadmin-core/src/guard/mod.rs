//! Routes and the guards that gate them.
//!
//! Guards are pure decisions over a [`Session`] snapshot. Re-running them on
//! every session change is the router's job.

use std::fmt;

use crate::session::Session;
use crate::user::ADMIN_ABILITY;

/// Console screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    Users,
    Categories,
    Attributes,
    CategoryAttributes,
    AdminCategories,
    CategoryNew,
    CategoryEdit(i64),
}

impl Route {
    /// URL path of this route.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Users => "/admin/users".to_string(),
            Route::Categories => "/admin/categories".to_string(),
            Route::Attributes => "/admin/attributes".to_string(),
            Route::CategoryAttributes => "/admin/category-attributes".to_string(),
            Route::AdminCategories => "/admin/categories-admin".to_string(),
            Route::CategoryNew => "/admin/categories/new".to_string(),
            Route::CategoryEdit(id) => format!("/admin/categories/{}/edit", id),
        }
    }

    /// Parses a URL path back into a route.
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        let route = match trimmed {
            "" => Route::Home,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/dashboard" => Route::Dashboard,
            "/admin/users" => Route::Users,
            "/admin/categories" => Route::Categories,
            "/admin/attributes" => Route::Attributes,
            "/admin/category-attributes" => Route::CategoryAttributes,
            "/admin/categories-admin" => Route::AdminCategories,
            "/admin/categories/new" => Route::CategoryNew,
            other => {
                let id = other
                    .strip_prefix("/admin/categories/")?
                    .strip_suffix("/edit")?
                    .parse()
                    .ok()?;
                Route::CategoryEdit(id)
            }
        };
        Some(route)
    }

    /// The guard protecting this route.
    pub fn guard(&self) -> Guard {
        match self {
            Route::Login | Route::Register => Guard::Public,
            Route::Home => Guard::HomeRedirect,
            Route::Dashboard => Guard::Auth,
            Route::Users
            | Route::Categories
            | Route::Attributes
            | Route::CategoryAttributes
            | Route::AdminCategories
            | Route::CategoryNew
            | Route::CategoryEdit(_) => Guard::Ability(Some(ADMIN_ABILITY.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of evaluating a guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Mount the protected screen.
    Render,
    /// Do not render; go to the given route instead.
    Redirect(Route),
}

/// Access rule attached to a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    /// Always renders.
    Public,
    /// Never renders itself: sends signed-out users to login, others to the dashboard.
    HomeRedirect,
    /// Requires a token.
    Auth,
    /// Requires a token and, when set, the named ability.
    Ability(Option<String>),
}

impl Guard {
    pub fn evaluate(&self, session: &Session) -> GuardDecision {
        match self {
            Guard::Public => GuardDecision::Render,
            Guard::HomeRedirect => {
                if session.is_authenticated() {
                    GuardDecision::Redirect(Route::Dashboard)
                } else {
                    GuardDecision::Redirect(Route::Login)
                }
            }
            Guard::Auth => auth_guard(session),
            Guard::Ability(required) => ability_guard(session, required.as_deref()),
        }
    }
}

/// Token required; otherwise redirect to login.
pub fn auth_guard(session: &Session) -> GuardDecision {
    if session.is_authenticated() {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect(Route::Login)
    }
}

/// Token required, then the ability when one is named.
///
/// A missing ability is a silent redirect to the dashboard, not an error.
pub fn ability_guard(session: &Session, required: Option<&str>) -> GuardDecision {
    if !session.is_authenticated() {
        return GuardDecision::Redirect(Route::Login);
    }
    match required {
        Some(ability) if !session.has_ability(ability) => GuardDecision::Redirect(Route::Dashboard),
        _ => GuardDecision::Render,
    }
}

/// Client-side navigation sink.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}
