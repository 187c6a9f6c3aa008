//! Route guards.
//!
//! Pages are gated by two predicates over the session store: one requiring a
//! token, one requiring the admin role. They are evaluated on every
//! navigation and nothing about the decision is cached.
//!
//! # Example
//!
//! ```rust,ignore
//! let landed = guards::navigate(Route::Admin, ctx.session_mut(), Utc::now())?;
//! if landed != Route::Admin {
//!     // redirected
//! }
//! ```

use chrono::{DateTime, Utc};
use tracing::debug;

use shopfront_core::Role;

use crate::session::{SessionError, SessionStore};

/// Pages of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Entry page (`/`).
    Login,
    Signup,
    Dashboard,
    Products,
    Cart,
    Orders,
    Admin,
    AdminAddProduct,
}

/// Who may view a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

impl Route {
    /// URL path of the route.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Signup => "/signup",
            Self::Dashboard => "/dashboard",
            Self::Products => "/products",
            Self::Cart => "/cart",
            Self::Orders => "/orders",
            Self::Admin => "/admin",
            Self::AdminAddProduct => "/admin/add-product",
        }
    }

    /// Resolve a URL path. Unknown paths land on the entry page.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "/signup" => Self::Signup,
            "/dashboard" => Self::Dashboard,
            "/products" => Self::Products,
            "/cart" => Self::Cart,
            "/orders" => Self::Orders,
            "/admin" => Self::Admin,
            "/admin/add-product" => Self::AdminAddProduct,
            _ => Self::Login,
        }
    }

    /// Access level required to view the route.
    #[must_use]
    pub const fn access(self) -> Access {
        match self {
            Self::Login | Self::Signup => Access::Public,
            Self::Dashboard | Self::Products | Self::Cart | Self::Orders => Access::Authenticated,
            Self::Admin | Self::AdminAddProduct => Access::Admin,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Why a guard refused a navigation, and where to go instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardRejection {
    /// No session: go to the entry page.
    RedirectToEntry,
    /// Authenticated but not an admin (or not authenticated at all for an
    /// admin route): go to the catalog.
    RedirectToCatalog,
}

impl GuardRejection {
    /// The route the user is sent to.
    #[must_use]
    pub const fn target(self) -> Route {
        match self {
            Self::RedirectToEntry => Route::Login,
            Self::RedirectToCatalog => Route::Products,
        }
    }
}

/// Allow only sessions holding a token.
///
/// # Errors
///
/// Returns `GuardRejection::RedirectToEntry` when there is no token.
pub const fn require_auth(session: &SessionStore) -> Result<(), GuardRejection> {
    if session.is_authenticated() {
        Ok(())
    } else {
        Err(GuardRejection::RedirectToEntry)
    }
}

/// Allow only authenticated sessions whose claims carry the admin role.
///
/// # Errors
///
/// Returns `GuardRejection::RedirectToCatalog` otherwise.
pub fn require_admin(session: &SessionStore) -> Result<(), GuardRejection> {
    if !session.is_authenticated() {
        return Err(GuardRejection::RedirectToCatalog);
    }
    match session.role() {
        Some(Role::Admin) => Ok(()),
        Some(Role::Customer) | None => Err(GuardRejection::RedirectToCatalog),
    }
}

/// Check a route against the session without following redirects.
///
/// # Errors
///
/// Returns the rejection of the guard protecting the route.
pub fn check(route: Route, session: &SessionStore) -> Result<(), GuardRejection> {
    match route.access() {
        Access::Public => Ok(()),
        Access::Authenticated => require_auth(session),
        Access::Admin => require_admin(session),
    }
}

/// Navigate to `route`, returning the route actually landed on.
///
/// Expiry is enforced first, then the route's guard is evaluated. A redirect
/// target is itself guarded, so a logged-out user bounced from `/admin` to
/// `/products` ends on `/`.
///
/// # Errors
///
/// Returns `SessionError::Storage` if an expired token cannot be removed.
pub fn navigate(
    route: Route,
    session: &mut SessionStore,
    now: DateTime<Utc>,
) -> Result<Route, SessionError> {
    session.enforce_expiry(now)?;

    let mut current = route;
    // Each redirect moves strictly down Admin -> Authenticated -> Public
    for _ in 0..3 {
        match check(current, session) {
            Ok(()) => break,
            Err(rejection) => {
                debug!(from = %current, to = %rejection.target(), "Route guard redirect");
                current = rejection.target();
            }
        }
    }
    Ok(current)
}
