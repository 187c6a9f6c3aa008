//! Signup page (`/signup`).

use tracing::{info, instrument};

use shopfront_core::Email;

use super::form::required;
use super::{FormError, Notifier, fail};
use crate::error::Result;
use crate::guards::Route;
use crate::models::SignupRequest;
use crate::state::AppContext;

pub const SIGNUP_SUCCESS: &str = "Signup successful! Redirecting to login...";
pub const SIGNUP_FAILED: &str = "Signup failed";

/// Signup form fields.
#[derive(Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl SignupForm {
    /// Check that every field is filled in and the email is well formed.
    ///
    /// # Errors
    ///
    /// Returns the first `FormError` found.
    pub fn validate(&self) -> std::result::Result<Email, FormError> {
        required("Name", &self.name)?;
        let email = Email::parse(required("Email", &self.email)?)?;
        if self.password.is_empty() {
            return Err(FormError::Required("Password"));
        }
        Ok(email)
    }
}

/// Register an account, then send the user to the login page.
///
/// # Errors
///
/// Returns the validation or API error after notifying the user.
#[instrument(skip(ctx, form, notifier), fields(email = %form.email))]
pub async fn submit(ctx: &AppContext, form: &SignupForm, notifier: &dyn Notifier) -> Result<Route> {
    let email = form
        .validate()
        .map_err(|e| fail(notifier, e, "signup", SIGNUP_FAILED))?;

    let request = SignupRequest {
        name: form.name.trim(),
        email: email.as_str(),
        password: &form.password,
    };
    ctx.api()
        .signup(&request)
        .await
        .map_err(|e| fail(notifier, e, "signup", SIGNUP_FAILED))?;

    info!("Account created");
    notifier.notify(SIGNUP_SUCCESS);
    Ok(Route::Login)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, password: &str) -> SignupForm {
        SignupForm {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_validate_requires_all_fields() {
        assert_eq!(form("", "a@b.co", "pw").validate(), Err(FormError::Required("Name")));
        assert_eq!(form("Ada", " ", "pw").validate(), Err(FormError::Required("Email")));
        assert_eq!(form("Ada", "a@b.co", "").validate(), Err(FormError::Required("Password")));
    }

    #[test]
    fn test_validate_checks_email_shape() {
        assert!(matches!(
            form("Ada", "not-an-email", "pw").validate(),
            Err(FormError::InvalidEmail(_))
        ));
        assert_eq!(
            form("Ada", " ada@example.com ", "pw").validate().map(|e| e.to_string()),
            Ok("ada@example.com".to_string())
        );
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", form("Ada", "a@b.co", "hunter2"));
        assert!(!debug.contains("hunter2"));
    }
}
