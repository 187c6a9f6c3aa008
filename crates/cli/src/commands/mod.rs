//! Subcommand implementations.
//!
//! Each command enters its page through the route guards first, so a command
//! the session may not use fails the same way navigating to the page would.

pub mod admin;
pub mod session;
pub mod shop;

use thiserror::Error;

use shopfront_storefront::cart::UnknownAction;
use shopfront_storefront::{AppContext, AppError, Route};

/// Errors that end a command with a non-zero exit status.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    App(#[from] AppError),

    /// A route guard sent the user elsewhere.
    #[error("{requested} is not available to this session (redirected to {landed})")]
    Redirected { requested: Route, landed: Route },

    #[error("No product with ID {0}")]
    UnknownProduct(String),

    #[error(transparent)]
    UnknownAction(#[from] UnknownAction),

    #[error("The '{0}' action needs a product ID")]
    MissingProductId(String),
}

/// Pass the route guard for `route`.
fn enter(ctx: &mut AppContext, route: Route) -> Result<(), CliError> {
    let landed = ctx.navigate(route)?;
    if landed == route {
        Ok(())
    } else {
        Err(CliError::Redirected {
            requested: route,
            landed,
        })
    }
}
