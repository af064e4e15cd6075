//! Guarded navigation.
//!
//! The router owns the current route. Every navigation resolves guard
//! redirects before the route is published, and a background task re-runs
//! the mounted route's guard on each session change so that a downgrade
//! evicts the screen.

use std::sync::Arc;

use catadmin_core::{GuardDecision, Navigator, Route, Session, SessionHandle};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Upper bound on chained redirects; the route table needs at most two.
const MAX_REDIRECTS: usize = 8;

pub struct Router {
    session: SessionHandle,
    current: watch::Sender<Route>,
}

impl Router {
    /// Starts at [`Route::Home`], resolved against the current session.
    pub fn new(session: SessionHandle) -> Self {
        let initial = resolve(Route::Home, &session.snapshot());
        let (current, _) = watch::channel(initial);
        Self { session, current }
    }

    pub fn current(&self) -> Route {
        *self.current.borrow()
    }

    /// Receiver notified whenever the mounted route changes.
    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.current.subscribe()
    }

    /// Requests `route`; returns the route actually mounted after redirects.
    pub fn open(&self, route: Route) -> Route {
        let target = resolve(route, &self.session.snapshot());
        if target != route {
            debug!(requested = %route, mounted = %target, "Navigation redirected");
        }
        self.mount(target);
        target
    }

    /// Re-runs the mounted route's guard. Returns the new route if the
    /// screen was evicted.
    pub fn reevaluate(&self) -> Option<Route> {
        let mounted = self.current();
        let target = resolve(mounted, &self.session.snapshot());
        if target == mounted {
            return None;
        }
        info!(from = %mounted, to = %target, "Session change evicted screen");
        self.mount(target);
        Some(target)
    }

    /// Re-evaluates on every session notification.
    ///
    /// The task holds only a weak reference and stops once the router is
    /// dropped or the session closes.
    pub fn spawn_guard_loop(self: &Arc<Self>) -> JoinHandle<()> {
        let mut changes = self.session.subscribe();
        let mut mounted = self.current.subscribe();
        let router = Arc::downgrade(self);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    changed = changes.changed() => {
                        let Some(router) = changed.ok().and_then(|_| router.upgrade()) else {
                            break;
                        };
                        router.reevaluate();
                    }
                    // errs once the router's route sender is gone
                    route = mounted.changed() => {
                        if route.is_err() {
                            break;
                        }
                    }
                }
            }
            debug!("Guard loop stopped");
        })
    }

    fn mount(&self, route: Route) {
        self.current.send_if_modified(|current| {
            if *current == route {
                false
            } else {
                *current = route;
                true
            }
        });
    }
}

impl Navigator for Router {
    fn navigate(&self, route: Route) {
        self.open(route);
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("current", &self.current())
            .finish()
    }
}

/// Follows guard redirects from `route` until a route renders.
pub fn resolve(route: Route, session: &Session) -> Route {
    let mut route = route;
    for _ in 0..MAX_REDIRECTS {
        match route.guard().evaluate(session) {
            GuardDecision::Render => return route,
            GuardDecision::Redirect(next) => route = next,
        }
    }
    Route::Login
}

#[cfg(test)]
mod tests {
    use super::*;
    use catadmin_core::storage::{ABILITIES_KEY, TOKEN_KEY};
    use catadmin_core::{InMemoryKeyValueStore, SessionUpdate};
    use std::time::Duration;

    fn handle(entries: &[(&str, &str)]) -> SessionHandle {
        let store = InMemoryKeyValueStore::with_entries(entries.iter().copied());
        SessionHandle::hydrate(Arc::new(store))
    }

    #[test]
    fn test_home_resolves_by_token() {
        let signed_out = handle(&[]);
        assert_eq!(Router::new(signed_out).current(), Route::Login);

        let signed_in = handle(&[(TOKEN_KEY, "t")]);
        assert_eq!(Router::new(signed_in).current(), Route::Dashboard);
    }

    #[test]
    fn test_open_admin_route_without_ability() {
        let router = Router::new(handle(&[(TOKEN_KEY, "t")]));
        assert_eq!(router.open(Route::Categories), Route::Dashboard);
        assert_eq!(router.open(Route::Login), Route::Login);
    }

    #[test]
    fn test_open_admin_route_signed_out() {
        let router = Router::new(handle(&[]));
        assert_eq!(router.open(Route::CategoryEdit(3)), Route::Login);
        assert_eq!(router.open(Route::Dashboard), Route::Login);
    }

    #[test]
    fn test_open_admin_route_with_ability() {
        let router = Router::new(handle(&[(TOKEN_KEY, "t"), (ABILITIES_KEY, r#"["admin"]"#)]));
        assert_eq!(router.open(Route::CategoryEdit(3)), Route::CategoryEdit(3));
        assert_eq!(router.current(), Route::CategoryEdit(3));
    }

    #[test]
    fn test_reevaluate_after_logout() {
        let session = handle(&[(TOKEN_KEY, "t"), (ABILITIES_KEY, r#"["admin"]"#)]);
        let router = Router::new(session.clone());
        router.open(Route::Users);
        assert_eq!(router.reevaluate(), None);

        session.clear_session().unwrap();
        assert_eq!(router.reevaluate(), Some(Route::Login));
    }

    #[tokio::test]
    async fn test_ability_downgrade_evicts_mounted_screen() {
        let session = handle(&[(TOKEN_KEY, "t"), (ABILITIES_KEY, r#"["admin"]"#)]);
        let router = Arc::new(Router::new(session.clone()));
        router.open(Route::Categories);

        let mut mounted = router.subscribe();
        let task = router.spawn_guard_loop();

        session
            .set_session(SessionUpdate::token("t").with_abilities(Vec::<String>::new()))
            .unwrap();

        tokio::time::timeout(Duration::from_secs(2), mounted.changed())
            .await
            .expect("guard loop did not react")
            .unwrap();
        assert_eq!(*mounted.borrow(), Route::Dashboard);

        task.abort();
    }

    #[tokio::test]
    async fn test_guard_loop_stops_when_router_is_dropped() {
        let session = handle(&[(TOKEN_KEY, "t")]);
        let router = Arc::new(Router::new(session.clone()));
        let task = router.spawn_guard_loop();
        let weak = Arc::downgrade(&router);

        drop(router);

        tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .expect("guard loop kept running")
            .unwrap();
        assert!(weak.upgrade().is_none());
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_guard_loop_stops_when_everything_is_dropped() {
        let session = handle(&[(TOKEN_KEY, "t"), (ABILITIES_KEY, r#"["admin"]"#)]);
        let router = Arc::new(Router::new(session.clone()));
        router.open(Route::Users);
        let task = router.spawn_guard_loop();

        session.clear_session().unwrap();
        drop(session);
        drop(router);

        tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .expect("guard loop kept running")
            .unwrap();
    }

    #[test]
    fn test_navigator_impl_mounts_login() {
        let router = Router::new(handle(&[(TOKEN_KEY, "t")]));
        let navigator: &dyn Navigator = &router;
        navigator.navigate(Route::Login);
        assert_eq!(router.current(), Route::Login);
    }
}
