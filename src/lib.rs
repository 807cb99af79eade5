//! # routedoc
//!
//! **routedoc** is a command-line companion for declarative HTTP applications.
//! Its core synthesizes a complete [OpenAPI 3.1](https://spec.openapis.org/oas/v3.1.0)
//! document from the route registrations an application makes at startup; the
//! CLI around it scaffolds new projects and serializes documents to disk.
//!
//! ## Overview
//!
//! Applications declare routes through a small registration surface: HTTP
//! verb methods, an `info` merger, and content-type `accept` declarations.
//! [`ApiDoc`] records those declarations without ever executing a handler and
//! compiles them on demand into a document that downstream OpenAPI tooling
//! accepts verbatim.
//!
//! ## Modules
//!
//! - **[`openapi`]** - document types and the [`ApiDoc`] builder
//! - **[`content_type`]** - content-type alias resolution and [`ContentFilter`]
//! - **[`manifest`]** - declarative route manifests and project metadata
//! - **[`generator`]** - project scaffolding for `routedoc init`
//! - **[`cli`]** - clap command definitions and dispatch
//!
//! ## Quick Start
//!
//! ```
//! use routedoc::{accept, handler, ApiDoc};
//!
//! let mut doc = ApiDoc::default();
//! doc.api(|api| {
//!     api.accept(["json"])?;
//!     api.post("/pets", handler(|| {}))?
//!         .desc("Add a pet\nStores a new pet record.");
//!     api.get("/pets/:id", (accept(["json", "text/html"])?, handler(|| {})))?;
//!     Ok(())
//! })?;
//!
//! let spec = doc.spec();
//! assert_eq!(spec.paths["/pets/:id"].parameters[0].name, "id");
//! # Ok::<(), routedoc::RegistrationError>(())
//! ```
//!
//! Request-body content types resolve when `spec()` runs: a route-level
//! filter wins over the application-wide `accept`, and a route with neither
//! is documented with a permissive `*/*` body.
//!
//! ## CLI
//!
//! ```bash
//! routedoc init --path my-app
//! routedoc openapi --path my-app my-app/openapi.yaml
//! ```

pub mod cli;
pub mod content_type;
pub mod generator;
pub mod manifest;
pub mod openapi;

pub use content_type::{accept, resolve, resolve_all, ContentFilter, ContentTypeError};
pub use manifest::{build_doc, load_manifest, ProjectMeta, RouteDecl, RouteManifest};
pub use openapi::{
    handler, path_parameters, Api, ApiDoc, ApiSpec, Handler, MediaType, Operation,
    OperationHandle, Parameter, ParameterLocation, PathItem, RegistrationError, RequestBody,
    RouteArg, RouteArgs,
};
