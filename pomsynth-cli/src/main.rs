//! pomsynth -- synthesize a Maven pom.xml from a tree of compiled archives.
//!
//! # Usage
//!
//! ```text
//! pomsynth generate ./artifacts -o pom.xml
//! pomsynth generate --mode filename
//! pomsynth --output json generate
//! pomsynth config validate
//! pomsynth config show --section scanner
//! ```

use clap::Parser;

use pomsynth_cli::cli::{Cli, Commands};
use pomsynth_cli::commands::{self, ConfigSource};
use pomsynth_cli::error::CliError;
use pomsynth_cli::logging;
use pomsynth_cli::output::OutputWriter;
use pomsynth_core::config::PomsynthConfig;

fn main() {
    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to start async runtime: {e}");
            std::process::exit(CliError::Io(e).exit_code());
        }
    };

    let code = runtime.block_on(async move {
        match run(cli).await {
            Ok(()) => 0,
            Err(e) => {
                tracing::error!(error = %e, "command failed");
                eprintln!("error: {e}");
                e.exit_code()
            }
        }
    });

    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let source = ConfigSource::new(cli.config);

    // Logging needs a config before commands reload it; a broken file is
    // reported by the command itself.
    let log_config = source
        .load()
        .await
        .map(|c| c.general)
        .unwrap_or_else(|_| PomsynthConfig::default().general);
    if let Err(e) = logging::init_tracing(&log_config, cli.log_level.as_deref()) {
        eprintln!("warning: {e}");
    }

    pomsynth_core::metrics::describe_all();
    tracing::debug!(config = %source.path().display(), "pomsynth starting");

    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, &source, &writer).await,
        Commands::Config(args) => commands::config::execute(args, &source, &writer).await,
    }
}
