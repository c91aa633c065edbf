use std::path::PathBuf;

use clap::{Parser, Subcommand};
use framing_core::kernel::Result;
use framing_core::{ComponentDescriptor, FramingSettings};

/// Framing: dependency-ordered component initialization
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Directory component paths are resolved against
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Comma-separated component directories, in precedence order
    #[arg(long, value_name = "DIRS", value_delimiter = ',')]
    pub directories: Option<Vec<PathBuf>>,

    /// Do not search framing_modules directories
    #[arg(long)]
    pub no_modules: bool,

    /// Enable configuration injection through the `config` component
    #[arg(long)]
    pub config: bool,

    /// Settings file (JSON, YAML or TOML); flags override its values
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Log at debug level
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List discovered components and their imports
    List,
    /// Print the root components (entry points)
    Roots,
    /// Print the initialization plan as JSON
    Plan {
        /// Only plan the graph rooted at this component
        #[arg(long)]
        entry_point: Option<String>,
    },
    /// Build the dependency graph and report problems
    Check,
}

/// Install the logger. `--debug` forces debug level, otherwise `RUST_LOG` applies.
pub fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    // A logger may already be installed when embedded.
    let _ = builder.try_init();
}

/// Settings from the optional settings file, with command-line flags applied on top.
pub async fn load_settings(args: &CliArgs) -> Result<FramingSettings> {
    let mut settings = match &args.settings {
        Some(path) => FramingSettings::from_file(path).await?,
        None => FramingSettings::default(),
    };
    if let Some(base_dir) = &args.base_dir {
        settings.base_dir = base_dir.clone();
    }
    if let Some(directories) = &args.directories {
        settings.component_directories = directories.clone();
    }
    if args.no_modules {
        settings.search_modules_directories = false;
    }
    if args.config {
        settings.use_config = true;
    }
    Ok(settings)
}

/// One block per component: `name (module)` then its imports, if any.
pub fn describe_component(descriptor: &ComponentDescriptor) -> String {
    let mut out = format!("{} ({})", descriptor.name, descriptor.module_name);
    if !descriptor.imports.is_empty() {
        out.push_str(&format!("\n  imports: {}", descriptor.imports.join(", ")));
    }
    if !descriptor.optional_imports.is_empty() {
        out.push_str(&format!("\n  optional: {}", descriptor.optional_imports.join(", ")));
    }
    out
}
