//! Register API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. Access logger, records every request including rejected ones
//! 2. Admin gate, bearer token check (admin routes only)

pub mod audit;
pub mod auth;
