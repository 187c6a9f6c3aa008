//! Page workflows.
//!
//! Each page fetches what it shows, derives a view from it, and turns user
//! actions into API calls. Outcomes are announced through a [`Notifier`]: a
//! success notice, or on failure the server's message or the page's fallback
//! text. A failed action leaves the page's prior state unchanged.
//!
//! Workflows also return their result so the front end can decide what to do
//! next (navigate, set an exit status).

pub mod add_product;
pub mod admin;
pub mod catalog;
pub mod checkout;
mod form;
pub mod login;
pub mod nav;
pub mod orders;
pub mod signup;

pub use add_product::AddProductPage;
pub use admin::AdminPage;
pub use catalog::CatalogPage;
pub use checkout::CheckoutPage;
pub use form::{FormError, ProductForm};
pub use login::LoginForm;
pub use nav::NavBar;
pub use orders::OrdersPage;
pub use signup::SignupForm;

use crate::error::AppError;

/// User-facing notification surface.
pub trait Notifier {
    /// Show a one-line notice.
    fn notify(&self, message: &str);

    /// Ask a yes/no question. Returns `true` to proceed.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Report a failed action and tell the user about it.
pub(crate) fn fail<E>(notifier: &dyn Notifier, err: E, context: &str, fallback: &str) -> AppError
where
    E: Into<AppError>,
{
    let err = err.into();
    err.report(context);
    notifier.notify(&err.user_message(fallback));
    err
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use reqwest::StatusCode;

    use super::*;
    use crate::api::ApiError;

    #[derive(Default)]
    struct RecordingNotifier {
        notices: RefCell<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str) {
            self.notices.borrow_mut().push(message.to_string());
        }

        fn confirm(&self, _prompt: &str) -> bool {
            false
        }
    }

    #[test]
    fn test_fail_shows_server_message() {
        let notifier = RecordingNotifier::default();
        let err = ApiError::Server {
            status: StatusCode::BAD_REQUEST,
            message: Some("User already exists".to_string()),
        };
        let err = fail(&notifier, err, "signup", signup::SIGNUP_FAILED);

        assert!(matches!(err, AppError::Api(_)));
        assert_eq!(*notifier.notices.borrow(), ["User already exists"]);
    }

    #[test]
    fn test_fail_falls_back() {
        let notifier = RecordingNotifier::default();
        let err = ApiError::Server {
            status: StatusCode::BAD_GATEWAY,
            message: None,
        };
        fail(&notifier, err, "orders", orders::FETCH_FAILED);
        assert_eq!(*notifier.notices.borrow(), ["Failed to fetch orders"]);
    }
}
