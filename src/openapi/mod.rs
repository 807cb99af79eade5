//! OpenAPI document synthesis.
//!
//! [`ApiDoc`] accumulates route registrations made through the [`Api`]
//! context and compiles them into a complete OpenAPI 3.1 document on demand.

mod build;
mod types;

pub use build::*;
pub use types::*;
