//! Wire types exchanged with the storefront REST API.
//!
//! The API speaks camelCase JSON and names document IDs `_id`. These types
//! accept `id` as an alias so fixtures and alternative backends decode too.

pub mod auth;
pub mod cart;
pub mod order;
pub mod product;
pub mod session;

pub use auth::{LoginRequest, LoginResponse, MessageResponse, SignupRequest};
pub use cart::{AddToCartRequest, ServerCart, ServerCartItem};
pub use order::{NewOrder, NewOrderLine, Order, OrderLine, ProductRef, ProductSummary};
pub use product::{Product, ProductInput};
pub use session::Claims;
