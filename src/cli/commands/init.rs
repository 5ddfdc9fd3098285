use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (an existing file is kept)
///  - the private image and cache folders
///  - the SQLite database with all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.as_deref())?;
    let path = Config::config_file();

    println!("⚙️  Initializing compound-assist…");
    println!("📄 Config file : {}", path.display());
    println!("🗄️  Database   : {}", &cfg.database);
    println!("🖼️  Images     : {}", &cfg.files_dir);

    let pool = DbPool::new(&cfg.database)?;
    success(format!("Database initialized at {}", &cfg.database));

    ttlog_quiet(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &cfg.database),
    );

    println!("🎉 compound-assist initialization completed!");
    Ok(())
}
