//! HTTP boundary for the letter register.
//!
//! Public routes (tracking lookup, health check) and admin routes
//! (listing, CRUD, dashboard). Admin routes sit behind a bearer-token
//! gate that rejects before any store access:
//! Extension → Cache-Control → Auth → Access log → Handler.
//!
//! `register_router()` returns a `Router` that can be mounted on any
//! axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::register_router;
pub use server::{serve, start_server_on, RegisterServer, ServerError};
pub use types::ApiContext;
