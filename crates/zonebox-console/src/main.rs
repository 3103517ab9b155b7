use std::io::Write;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use zonebox_console::client::DEFAULT_ENDPOINT;
use zonebox_console::{Controller, InterpretClient};

#[derive(Parser)]
#[command(name = "zonebox")]
#[command(about = "Shape a zoning envelope with plain-language commands")]
struct Cli {
    /// Interpret endpoint of a running zonebox-server
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
    /// Only understand "height <n>" locally, without calling the server
    #[arg(long, default_value_t = false)]
    offline: bool,
}

fn prompt() -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Failures stay out of the user's way unless RUST_LOG asks for them.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut controller = if cli.offline {
        Controller::offline()
    } else {
        Controller::online(InterpretClient::new(cli.endpoint))
    };

    println!("{}", controller.scene());
    prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(mut input) = lines.next_line().await? {
        controller.submit(&mut input).await;
        println!("{}", controller.scene());
        prompt()?;
    }
    println!();
    Ok(())
}
