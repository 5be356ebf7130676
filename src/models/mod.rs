pub mod document;
pub mod enums;
pub mod filters;

pub use document::*;
pub use filters::*;
