//! Project scaffolding for `routedoc init`.
//!
//! Renders a small starter project from compiled askama templates: a Cargo
//! manifest, a `src/main.rs` that registers a first route and prints the
//! resulting document, a sample route manifest, and optionally an empty
//! config file.

mod project;
mod templates;

pub use project::*;
pub use templates::*;
