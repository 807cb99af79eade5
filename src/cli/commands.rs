use crate::generator::{scaffold_project, InitOptions};
use crate::manifest::{build_doc, load_manifest, ProjectMeta};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Command-line interface for routedoc
#[derive(Parser)]
#[command(name = "routedoc")]
#[command(about = "Companion CLI: scaffold projects and synthesize OpenAPI documents", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a starter project file structure in the target directory
    Init {
        /// Project root directory (defaults to the working dir)
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Name for the app (defaults to the directory name)
        #[arg(short, long)]
        name: Option<String>,

        /// Path to a default config file, relative to the project root
        #[arg(short, long)]
        conf: Option<PathBuf>,

        /// Overwrite existing generated files
        #[arg(short, long, default_value_t = false)]
        force: bool,
    },
    /// Build the OpenAPI document from the project's route manifest
    Openapi {
        /// Path to the route manifest (YAML or JSON), relative to the project root
        #[arg(short, long, default_value = "api.yaml")]
        api: PathBuf,

        /// Project root directory containing Cargo.toml
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Output file; a .yaml/.yml extension selects YAML, anything else JSON
        #[arg(default_value = "output.json")]
        output: PathBuf,
    },
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if scaffolding fails, the manifest or Cargo.toml cannot
/// be loaded, or the output file cannot be written.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Init {
            path,
            name,
            conf,
            force,
        } => {
            let project_dir = scaffold_project(&InitOptions {
                path: path.clone(),
                name: name.clone(),
                conf: conf.clone(),
                force: *force,
            })?;
            info!(path = %project_dir.display(), "project scaffolded");
            Ok(())
        }
        Commands::Openapi { api, path, output } => {
            let meta = ProjectMeta::from_cargo_toml(&path.join("Cargo.toml"))?;
            let api_path = if api.is_absolute() {
                api.clone()
            } else {
                path.join(api)
            };
            let manifest = load_manifest(&api_path)?;
            let doc = build_doc(&manifest, meta)?;
            write_doc(&doc, output)?;
            info!(output = %output.display(), "OpenAPI document written");
            Ok(())
        }
    }
}

fn write_doc(doc: &crate::openapi::ApiSpec, output: &Path) -> anyhow::Result<()> {
    let is_yaml = matches!(
        output.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let serialized = if is_yaml {
        serde_yaml::to_string(doc)?
    } else {
        serde_json::to_string_pretty(doc)?
    };
    fs::write(output, serialized)?;
    println!("✅ Wrote OpenAPI document to {output:?}");
    Ok(())
}
