//! Standalone migration runner, grounded in the teacher's `migrate_cli`
//! (a small clap CLI invoked outside the request path) but stripped to this
//! service's single concern — this crate has no data-migration registry to
//! select from, only the schema migrations under `./migrations`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use server_core::config::Config;
use server_core::server::app;

#[derive(Parser)]
#[command(name = "migrate_cli", about = "Run or inspect database migrations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply all pending migrations.
    Run,
    /// Print applied migrations and their checksums.
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::from_env().context("failed to load configuration")?;
    let pool = app::connect_pool(&config.database_url)
        .await
        .context("failed to connect to database")?;

    match cli.command {
        Command::Run => {
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("migration failed")?;
            println!("migrations applied");
        }
        Command::Status => {
            let applied = sqlx::query_as::<_, (i64, String)>(
                "SELECT version, description FROM _sqlx_migrations ORDER BY version",
            )
            .fetch_all(&pool)
            .await
            .context("failed to read migration history")?;
            for (version, description) in applied {
                println!("{version}\t{description}");
            }
        }
    }

    Ok(())
}
