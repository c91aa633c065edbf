mod cli;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use framing_core::kernel::Result;
use framing_core::Framing;
use log::{debug, error};

use crate::cli::{CliArgs, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    cli::init_logging(args.debug);
    debug!("Parsed args: {:?}", args);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: CliArgs) -> Result<()> {
    let settings = cli::load_settings(&args).await?;
    let framing = Framing::from_settings(settings);

    match args.command {
        Commands::List => {
            for descriptor in framing.discover().await? {
                println!("{}", cli::describe_component(&descriptor));
            }
        }
        Commands::Roots => {
            let graph = framing.load_graph().await?;
            for name in graph.root_names() {
                println!("{}", name);
            }
        }
        Commands::Plan { entry_point } => {
            let mut stdout = std::io::stdout().lock();
            framing.write_plan(entry_point.as_deref(), &mut stdout).await?;
            let _ = writeln!(stdout);
        }
        Commands::Check => {
            let graph = framing.load_graph().await?;
            let roots = framing.select_roots(&graph, None)?;
            let path = framing_core::InitializationPath::from_roots(&graph, &roots)?;
            path.validate()?;
            println!("ok");
        }
    }
    Ok(())
}
