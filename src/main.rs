//! roster - prints the id, name and age of every student.

use classroom_roster::cli::Cli;
use classroom_roster::config::Config;
use classroom_roster::error::Result;
use classroom_roster::logging;
use classroom_roster::output::LinePrinter;
use classroom_roster::runner::QueryRunner;
use tracing::{debug, error};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    logging::init_stderr_logging();

    if let Err(e) = run().await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let config_path = cli.config_path();
    debug!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let connection = cli.resolve_connection(&config)?;
    let runner = QueryRunner::new(connection, config.query);

    let mut printer = LinePrinter::stdout();
    runner.run(&mut printer).await?;

    Ok(())
}
