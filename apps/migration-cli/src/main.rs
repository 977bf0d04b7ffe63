use clap::{Parser, ValueEnum};
use migration::{count_applied_migrations, latest_migration_version, migrate, MigrationCommand};
use waymark::{connect_db, DbKind, DbOwner, DbProfile};

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(c: Command) -> Self {
        match c {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Env {
    Prod,
    Test,
}

// In-memory SQLite is not offered: each run would migrate a throwaway database.
#[derive(Clone, Copy, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Waymark database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Runtime environment
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,

    /// Database type
    #[arg(short, long, value_enum, default_value = "postgres")]
    db: Db,
}

#[tokio::main]
async fn main() {
    waymark::telemetry::init_tracing();

    let args = Args::parse();

    let profile = match args.env {
        Env::Prod => DbProfile::Prod,
        Env::Test => DbProfile::Test,
    };
    let kind = match args.db {
        Db::Postgres => DbKind::Postgres,
        Db::SqliteFile => DbKind::SqliteFile,
    };

    if let Err(e) = run(profile, kind, args.command).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}

async fn run(
    profile: DbProfile,
    kind: DbKind,
    command: Command,
) -> Result<(), Box<dyn std::error::Error>> {
    let conn = connect_db(profile, kind, DbOwner::Owner).await?;
    migrate(&conn, command.into()).await?;

    if let Command::Status = command {
        let applied = count_applied_migrations(&conn).await?;
        let latest = latest_migration_version(&conn).await?;
        println!(
            "applied migrations: {applied}, latest: {}",
            latest.as_deref().unwrap_or("none")
        );
    }

    conn.close().await?;
    Ok(())
}
