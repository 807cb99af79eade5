use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};

use super::templates::{
    write_rendered, ApiManifestTemplate, CargoTomlTemplate, MainRsTemplate,
};

/// Options for [`scaffold_project`].
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Project root directory
    pub path: PathBuf,
    /// Application name; defaults to the directory name
    pub name: Option<String>,
    /// Optional config file to create, relative to the project root
    pub conf: Option<PathBuf>,
    /// Overwrite existing generated files
    pub force: bool,
}

/// Generate a starter project file structure.
///
/// Creates `Cargo.toml` (only when absent; an existing manifest is never
/// rewritten), `src/main.rs`, a sample `api.yaml` route manifest, and the
/// optional config file. Refuses to run against a project that already has a
/// `src` directory unless `force` is set.
pub fn scaffold_project(opts: &InitOptions) -> anyhow::Result<PathBuf> {
    let project_dir = &opts.path;
    fs::create_dir_all(project_dir)
        .with_context(|| format!("failed to create {}", project_dir.display()))?;

    let src_dir = project_dir.join("src");
    if src_dir.exists() && !opts.force {
        bail!(
            "the 'src' directory already exists in {} (use --force to overwrite generated files)",
            project_dir.display()
        );
    }

    let name = match &opts.name {
        Some(name) => name.clone(),
        None => project_name(project_dir),
    };

    let cargo_toml = project_dir.join("Cargo.toml");
    if !cargo_toml.exists() {
        write_rendered(&cargo_toml, &CargoTomlTemplate { name: &name }, false)?;
    }

    fs::create_dir_all(&src_dir)
        .with_context(|| format!("failed to create {}", src_dir.display()))?;
    write_rendered(
        &src_dir.join("main.rs"),
        &MainRsTemplate { name: &name },
        opts.force,
    )?;
    write_rendered(
        &project_dir.join("api.yaml"),
        &ApiManifestTemplate { name: &name },
        opts.force,
    )?;

    if let Some(conf) = &opts.conf {
        let conf_path = project_dir.join(conf);
        if let Some(parent) = conf_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        if !conf_path.exists() {
            fs::write(&conf_path, "")
                .with_context(|| format!("failed to create {}", conf_path.display()))?;
            println!("✅ Generated {conf_path:?}");
        }
    }

    Ok(project_dir.clone())
}

// Directory names make poor package names as-is; normalize like a slug.
fn project_name(dir: &Path) -> String {
    let raw = dir
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "my-app".to_string());
    let slug: String = raw
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let slug = slug.trim_matches('-').to_string();
    if slug.is_empty() {
        "my-app".to_string()
    } else {
        slug
    }
}
