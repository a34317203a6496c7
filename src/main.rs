use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use odx::logging::init_logging;
use odx::{OdbLexic, OdbObject};

#[derive(Parser)]
#[command(name = "odx", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the package version
    Version,
    /// Print version, compiler, platform and build stamp as JSON
    Info,
    /// Initialize the ODB environment and print what was exported
    Env,
    /// Print the SQL selecting `columns` from the database at `path`
    Select {
        path: std::path::PathBuf,
        /// Comma separated column list, e.g. "lat,lon,obsvalue@body"
        columns: String,
        /// Optional WHERE expression
        #[arg(long = "where")]
        filter: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Version => println!("{}", odx::build::version()),
        Commands::Info => {
            println!("{}", serde_json::to_string_pretty(&odx::build::info())?);
        }
        Commands::Env => {
            let env = odx::ensure_initialized().context("failed to initialize ODB environment")?;
            println!("{}", serde_json::to_string_pretty(&env.report())?);
        }
        Commands::Select {
            path,
            columns,
            filter,
        } => {
            let env = odx::ensure_initialized().context("failed to initialize ODB environment")?;
            let lexic: OdbLexic = env.lexic().clone();
            let object = OdbObject::with_lexic(&path, lexic)
                .with_context(|| format!("cannot open {}", path.display()))?;
            debug!(name = ?object.name(), "Selecting");
            println!("{}", object.select(&columns, filter.as_deref())?);
        }
    }

    Ok(())
}
