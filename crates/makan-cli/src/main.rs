mod clipboard;
mod config;
mod export_cmd;
mod menu_cmds;
mod order_cmds;
mod resolve;
mod serve_cmd;
mod summary_cmd;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use makan_db::pool;

use config::MakanConfig;

#[derive(Parser)]
#[command(name = "makan", about = "Coordinate office lunch orders from pasted chat menus")]
struct Cli {
    /// Database URL (overrides MAKAN_DATABASE_URL env var)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a makan config file (no database required)
    Init {
        /// PostgreSQL connection URL
        #[arg(long, default_value = "postgresql://localhost:5432/makan")]
        db_url: String,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Initialize the makan database (requires config file or env vars)
    DbInit,
    /// Menu management
    Menu {
        #[command(subcommand)]
        command: MenuCommands,
    },
    /// Order management
    Order {
        #[command(subcommand)]
        command: OrderCommands,
    },
    /// Print the chat-ready order summary for a menu
    Summary {
        /// Menu UUID or "latest"
        menu: String,
        /// Also copy the summary to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Export a menu with its orders as JSON
    Export {
        /// Menu UUID or "latest"
        menu: String,
        /// Output file path (defaults to stdout)
        #[arg(long)]
        output: Option<String>,
    },
    /// Run the share server so colleagues can browse menus and order
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port to listen on
        #[arg(long, default_value_t = 8642)]
        port: u16,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum MenuCommands {
    /// Create a menu from a pasted chat message (reads stdin by default)
    Create {
        /// Menu date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<chrono::NaiveDate>,
        /// Create the menu with ordering already closed
        #[arg(long)]
        closed: bool,
        /// Read the message from a file instead of stdin
        #[arg(long)]
        file: Option<String>,
    },
    /// Preview extraction for a pasted message without storing anything
    Parse {
        /// Read the message from a file instead of stdin
        #[arg(long)]
        file: Option<String>,
    },
    /// Show one menu, or list all menus when MENU is omitted
    Show {
        /// Menu UUID or "latest" (omit to list all)
        menu: Option<String>,
    },
    /// Close ordering on a menu
    Close {
        /// Menu UUID or "latest"
        menu: String,
    },
    /// Reopen ordering on a menu
    Reopen {
        /// Menu UUID or "latest"
        menu: String,
    },
    /// Delete a menu, its items, and its orders
    Delete {
        /// Menu UUID or "latest"
        menu: String,
    },
}

#[derive(Subcommand)]
pub enum OrderCommands {
    /// Add an order to a menu
    Add {
        /// Menu UUID or "latest"
        menu: String,
        /// Customer name
        #[arg(long)]
        name: String,
        /// Menu item with quantity, e.g. "Nasi Putih=2" (repeatable; quantity defaults to 1)
        #[arg(long = "item", required = true)]
        items: Vec<String>,
        /// Free-text remarks
        #[arg(long)]
        remarks: Option<String>,
    },
    /// List a menu's orders in submission order
    List {
        /// Menu UUID or "latest"
        menu: String,
    },
    /// Mark an order as paid
    Paid {
        /// Order UUID
        order_id: String,
        /// Mark as unpaid instead
        #[arg(long)]
        unpaid: bool,
    },
    /// Delete an order
    Delete {
        /// Order UUID
        order_id: String,
    },
}

/// Execute the `makan init` command: write config file.
fn cmd_init(db_url: &str, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        database: config::DatabaseSection {
            url: db_url.to_string(),
        },
    };

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  database.url = {db_url}");
    println!();
    println!("Next: run `makan db-init` to create and migrate the database.");

    Ok(())
}

/// Execute the `makan db-init` command: create database and run migrations.
async fn cmd_db_init(cli_db_url: Option<&str>) -> anyhow::Result<()> {
    let resolved = MakanConfig::resolve(cli_db_url)?;

    println!("Initializing makan database...");

    // 1. Create the database if it does not exist.
    pool::ensure_database_exists(&resolved.db_config).await?;

    // 2. Connect to the target database.
    let db_pool = pool::create_pool(&resolved.db_config).await?;

    // 3. Run migrations.
    pool::run_migrations(&db_pool).await?;

    // 4. Print success with table counts.
    let counts = pool::table_counts(&db_pool).await?;
    println!("Database ready. Tables:");
    for (table, count) in &counts {
        println!("  {table}: {count} rows");
    }

    // 5. Clean shutdown.
    db_pool.close().await;

    println!("makan db-init complete.");
    Ok(())
}

/// Execute the `makan completions` command: write a completion script to stdout.
fn cmd_completions(shell: Shell) {
    clap_complete::generate(shell, &mut Cli::command(), "makan", &mut std::io::stdout());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { db_url, force } => {
            cmd_init(&db_url, force)?;
        }
        Commands::DbInit => {
            cmd_db_init(cli.database_url.as_deref()).await?;
        }
        Commands::Menu { command } => match command {
            // Parse is a pure preview; it never touches the database.
            MenuCommands::Parse { file } => {
                menu_cmds::cmd_parse(file.as_deref())?;
            }
            command => {
                let resolved = MakanConfig::resolve(cli.database_url.as_deref())?;
                let db_pool = pool::create_pool(&resolved.db_config).await?;
                let result = menu_cmds::run_menu_command(command, &db_pool).await;
                db_pool.close().await;
                result?;
            }
        },
        Commands::Order { command } => {
            let resolved = MakanConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = order_cmds::run_order_command(command, &db_pool).await;
            db_pool.close().await;
            result?;
        }
        Commands::Summary { menu, copy } => {
            let resolved = MakanConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = summary_cmd::run_summary(&db_pool, &menu, copy).await;
            db_pool.close().await;
            result?;
        }
        Commands::Export { menu, output } => {
            let resolved = MakanConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = export_cmd::run_export(&db_pool, &menu, output.as_deref()).await;
            db_pool.close().await;
            result?;
        }
        Commands::Serve { bind, port } => {
            let resolved = MakanConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = serve_cmd::run_serve(db_pool.clone(), &bind, port).await;
            db_pool.close().await;
            result?;
        }
        Commands::Completions { shell } => {
            cmd_completions(shell);
        }
    }

    Ok(())
}
