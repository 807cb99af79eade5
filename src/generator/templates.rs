use askama::Template;
use std::fs;
use std::path::Path;

/// Template data for the scaffolded Cargo.toml
#[derive(Template)]
#[template(path = "Cargo.toml.txt", escape = "none")]
pub struct CargoTomlTemplate<'a> {
    /// Package name
    pub name: &'a str,
}

/// Template data for the scaffolded src/main.rs
#[derive(Template)]
#[template(path = "main.rs.txt", escape = "none")]
pub struct MainRsTemplate<'a> {
    /// Application name shown in the starter route
    pub name: &'a str,
}

/// Template data for the sample route manifest
#[derive(Template)]
#[template(path = "api.yaml.txt", escape = "none")]
pub struct ApiManifestTemplate<'a> {
    /// Application name used in the manifest comment
    pub name: &'a str,
}

/// Render a template to a file, honoring the overwrite policy.
///
/// Existing files are left alone unless `force` is set, so regenerating a
/// project never clobbers user edits silently.
pub fn write_rendered(path: &Path, template: &impl Template, force: bool) -> anyhow::Result<bool> {
    if path.exists() && !force {
        println!("⚠️  Skipping existing file: {path:?}");
        return Ok(false);
    }
    let rendered = template.render()?;
    fs::write(path, rendered)?;
    println!("✅ Generated {path:?}");
    Ok(true)
}
