use clap::{Parser, Subcommand};
use std::path::PathBuf;

use practice_tracker::db::DynError;
use practice_tracker::{config, db, serve};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Track piano pieces, exercises and practice sessions"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the practice tracker API over HTTP
    Serve {
        /// Path to SQLite database file (created if missing)
        sqlite_file: Option<PathBuf>,

        /// Path to config file (TOML format)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Port to listen on (overrides config file, default 8080)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Create the database schema and exit
    Init {
        /// Path to SQLite database file (created if missing)
        sqlite_file: PathBuf,
    },
}

fn main() -> Result<(), DynError> {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Command::Serve {
            sqlite_file,
            config: config_path,
            port,
        } => {
            let file_config = config_path
                .as_deref()
                .map(config::load_config)
                .transpose()?;
            let sqlite_file = sqlite_file
                .or_else(|| file_config.as_ref().map(|c| c.db_path.clone()))
                .ok_or("Database path required (positional argument or --config)")?;
            let port = port
                .or(file_config.as_ref().and_then(|c| c.port))
                .unwrap_or(8080);
            serve::serve(sqlite_file, port)
        }
        Command::Init { sqlite_file } => init(sqlite_file),
    }
}

fn init(sqlite_file: PathBuf) -> Result<(), DynError> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let pool = db::open_database_pool(&sqlite_file).await?;
        db::init_database_schema(&pool).await?;
        db::check_schema_version(&pool).await?;
        println!("SQLite database: {}", sqlite_file.display());
        Ok(())
    })
}
