use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "infradot",
    about = "Convert an infrastructure topology description into a Graphviz DOT diagram"
)]
struct Cli {
    /// Topology description to read
    #[arg(short = 'f', long = "file", value_name = "INPUT")]
    input: PathBuf,

    /// DOT file to write
    #[arg(short = 't', long = "to", value_name = "OUTPUT")]
    output: PathBuf,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // usage problems print clap's message and end without output
            let _ = e.print();
            return Ok(());
        }
    };

    infradot::convert_file(&cli.input, &cli.output)?;
    info!(input = %cli.input.display(), output = %cli.output.display(), "wrote diagram");
    Ok(())
}
