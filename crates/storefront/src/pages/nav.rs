//! Navigation bar.

use crate::guards::Route;
use crate::session::SessionStore;

/// What the navigation bar shows for the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBar {
    /// Links in display order.
    pub links: Vec<(Route, &'static str)>,
    /// `Welcome, <name> (<role label>)` when logged in.
    pub greeting: Option<String>,
}

impl NavBar {
    #[must_use]
    pub fn for_session(session: &SessionStore) -> Self {
        let mut links = vec![(Route::Products, "Products"), (Route::Cart, "Cart")];

        let greeting = session.claims().map(|claims| {
            links.push((Route::Orders, "My Orders"));
            if session.is_admin() {
                links.push((Route::Admin, "Admin Dashboard"));
            }
            format!("Welcome, {} ({})", claims.display_name(), claims.role.label())
        });

        Self { links, greeting }
    }

    /// Whether a logout action is offered.
    #[must_use]
    pub const fn can_logout(&self) -> bool {
        self.greeting.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    use super::*;
    use crate::storage::MemoryStore;

    fn session(payload: Option<serde_json::Value>) -> SessionStore {
        let mut session = SessionStore::restore(Arc::new(MemoryStore::new())).unwrap();
        if let Some(payload) = payload {
            let token = format!("h.{}.s", URL_SAFE_NO_PAD.encode(payload.to_string()));
            session.login(&token).unwrap();
        }
        session
    }

    fn routes(nav: &NavBar) -> Vec<Route> {
        nav.links.iter().map(|(route, _)| *route).collect()
    }

    #[test]
    fn test_logged_out() {
        let nav = NavBar::for_session(&session(None));
        assert_eq!(routes(&nav), [Route::Products, Route::Cart]);
        assert!(!nav.can_logout());
    }

    #[test]
    fn test_customer() {
        let nav = NavBar::for_session(&session(Some(
            serde_json::json!({"id": "u1", "name": "Ada", "role": "customer"}),
        )));
        assert_eq!(routes(&nav), [Route::Products, Route::Cart, Route::Orders]);
        assert_eq!(nav.greeting.as_deref(), Some("Welcome, Ada (Customer)"));
    }

    #[test]
    fn test_admin() {
        let nav = NavBar::for_session(&session(Some(
            serde_json::json!({"id": "u2", "name": "Grace", "role": "admin"}),
        )));
        assert_eq!(
            routes(&nav),
            [Route::Products, Route::Cart, Route::Orders, Route::Admin]
        );
        assert_eq!(nav.greeting.as_deref(), Some("Welcome, Grace (Administrator)"));
    }
}
