//! Route manifest loading and project metadata.
//!
//! The CLI builds documentation from two inputs: the project's `Cargo.toml`
//! (for the default `info.title`/`info.version`) and a declarative route
//! manifest, YAML or JSON, that mirrors what the application registers at
//! startup:
//!
//! ```yaml
//! accept: [json]
//! routes:
//!   - method: post
//!     path: /pets/:id
//!     accept: [json, text/html]
//!     description: |
//!       Replace one pet
//!       Updates the pet record in place.
//! ```

use crate::content_type;
use crate::openapi::{handler, ApiDoc, ApiSpec, RouteArg};
use anyhow::{bail, Context};
use http::Method;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

const METHODS: [&str; 8] = [
    "get", "post", "put", "delete", "patch", "options", "head", "trace",
];

/// Project identity used to seed the document's `info` object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMeta {
    pub name: String,
    pub version: String,
}

impl Default for ProjectMeta {
    fn default() -> Self {
        ProjectMeta {
            name: "api".to_string(),
            version: "0.0.0".to_string(),
        }
    }
}

impl ProjectMeta {
    /// Read `[package] name`/`version` from a Cargo manifest.
    pub fn from_cargo_toml(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            bail!("Cargo.toml not found in: {}", path.display());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let manifest: toml::Value = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        let package = manifest
            .get("package")
            .ok_or_else(|| anyhow::anyhow!("no [package] table in {}", path.display()))?;
        let name = package
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("no package name in {}", path.display()))?
            .to_string();
        let version = package
            .get("version")
            .and_then(|v| v.as_str())
            .unwrap_or("0.0.0")
            .to_string();
        Ok(ProjectMeta { name, version })
    }
}

/// Declarative description of an application's route registrations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteManifest {
    /// Overrides the title taken from Cargo.toml
    pub title: Option<String>,
    /// Overrides the version taken from Cargo.toml
    pub version: Option<String>,
    /// Extra fields merged into the document's `info` object
    #[serde(default)]
    pub info: IndexMap<String, Value>,
    /// Application-wide accepted content types
    pub accept: Option<Vec<String>>,
    #[serde(default)]
    pub routes: Vec<RouteDecl>,
}

/// One route registration in the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteDecl {
    pub method: String,
    pub path: String,
    /// Accepted content types for this route only
    pub accept: Option<Vec<String>>,
    pub description: Option<String>,
}

/// Load a manifest from a YAML (`.yaml`/`.yml`) or JSON file.
pub fn load_manifest(path: &Path) -> anyhow::Result<RouteManifest> {
    if !path.exists() {
        bail!("route manifest not found in: {}", path.display());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let manifest: RouteManifest = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?
    };
    debug!(
        path = %path.display(),
        routes = manifest.routes.len(),
        "loaded route manifest"
    );
    Ok(manifest)
}

/// Build the OpenAPI document a manifest describes.
///
/// Feeds the manifest through the same registration surface an application
/// uses, so manifest-driven and code-driven documents cannot drift apart.
pub fn build_doc(manifest: &RouteManifest, meta: ProjectMeta) -> anyhow::Result<ApiSpec> {
    let mut meta = meta;
    if let Some(title) = &manifest.title {
        meta.name = title.clone();
    }
    if let Some(version) = &manifest.version {
        meta.version = version.clone();
    }

    let mut parsed = Vec::with_capacity(manifest.routes.len());
    for decl in &manifest.routes {
        let lower = decl.method.to_ascii_lowercase();
        if !METHODS.contains(&lower.as_str()) {
            bail!(
                "unsupported HTTP method '{}' for path '{}'",
                decl.method,
                decl.path
            );
        }
        let method = Method::from_bytes(lower.to_ascii_uppercase().as_bytes())
            .with_context(|| format!("invalid HTTP method '{}'", decl.method))?;
        parsed.push((method, decl));
    }

    let mut doc = ApiDoc::new(meta);
    doc.api(|api| {
        if !manifest.info.is_empty() {
            api.info(&manifest.info);
        }
        if let Some(tokens) = &manifest.accept {
            api.accept(tokens.iter().cloned())?;
        }
        for (method, decl) in parsed {
            let mut args: Vec<RouteArg> = Vec::new();
            if let Some(tokens) = &decl.accept {
                args.push(content_type::accept(tokens.iter().cloned())?.into());
            }
            args.push(handler(|| {}).into());
            let handle = api.route(method, &decl.path, args)?;
            if let Some(text) = &decl.description {
                handle.desc(text);
            }
        }
        Ok(())
    })?;
    Ok(doc.spec())
}
