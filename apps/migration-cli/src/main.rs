use clap::{Parser, ValueEnum};
use migration::MigrationCommand;
use sea_orm::Database;

#[derive(Clone, ValueEnum)]
enum Cmd {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Skittles club database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Cmd,

    /// Database URL; falls back to the DATABASE_URL environment variable
    #[arg(short, long)]
    url: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let url = match args.url.or_else(|| std::env::var("DATABASE_URL").ok()) {
        Some(url) => url,
        None => {
            eprintln!("❌ No database URL: pass --url or set DATABASE_URL");
            std::process::exit(2);
        }
    };

    let command = match args.command {
        Cmd::Up => MigrationCommand::Up,
        Cmd::Down => MigrationCommand::Down,
        Cmd::Fresh => MigrationCommand::Fresh,
        Cmd::Reset => MigrationCommand::Reset,
        Cmd::Refresh => MigrationCommand::Refresh,
        Cmd::Status => MigrationCommand::Status,
    };

    let db = match Database::connect(&url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migration::migrate(&db, command).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
