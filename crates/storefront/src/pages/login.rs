//! Login page (`/`) and logout.

use tracing::{info, instrument};

use super::form::required;
use super::{Notifier, fail};
use crate::error::Result;
use crate::guards::Route;
use crate::models::LoginRequest;
use crate::state::AppContext;

pub const LOGIN_FAILED: &str = "Login failed";

/// Login form fields.
#[derive(Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Exchange credentials for a token, start the session and go to the catalog.
///
/// A token the client cannot decode leaves the user logged out.
///
/// # Errors
///
/// Returns the validation, API or session error after notifying the user.
#[instrument(skip(ctx, form, notifier), fields(email = %form.email))]
pub async fn submit(ctx: &mut AppContext, form: &LoginForm, notifier: &dyn Notifier) -> Result<Route> {
    let email = required("Email", &form.email).map_err(|e| fail(notifier, e, "login", LOGIN_FAILED))?;
    if form.password.is_empty() {
        return Err(fail(
            notifier,
            super::FormError::Required("Password"),
            "login",
            LOGIN_FAILED,
        ));
    }

    let request = LoginRequest {
        email,
        password: &form.password,
    };
    let response = ctx
        .api()
        .login(&request)
        .await
        .map_err(|e| fail(notifier, e, "login", LOGIN_FAILED))?;

    let claims = ctx
        .session_mut()
        .login(&response.token)
        .map_err(|e| fail(notifier, e, "login", LOGIN_FAILED))?;
    info!(user_id = %claims.user_id, role = %claims.role, "Logged in");

    Ok(Route::Products)
}

/// End the session and return to the entry page.
///
/// # Errors
///
/// Returns an error if the persisted token cannot be removed. The in-memory
/// session is cleared regardless.
pub fn logout(ctx: &mut AppContext) -> Result<Route> {
    ctx.session_mut().logout()?;
    info!("Logged out");
    Ok(Route::Login)
}
