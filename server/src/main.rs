mod config;
mod graphql;
mod http;
mod render;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use platform_obs::{ObsConfig, init_tracing};
use products_tips::{EmployeeId, TipBoard, TipForm};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    http::{AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "bote", version, about = "Split a shared tip pool by hours worked")]
struct Cli {
    #[arg(long, global = true, value_name = "DIR", help = "Directory holding the slot files")]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the board over HTTP + GraphQL.
    Serve(ServeCommand),
    #[command(flatten)]
    Action(Action),
}

/// One-shot board actions. Numeric arguments are read like form fields:
/// anything that is not a number counts as 0.
#[derive(Subcommand, Debug)]
enum Action {
    /// Show the pool and every employee's share.
    Show {
        #[arg(long, help = "Print the board as JSON")]
        json: bool,
    },
    /// Add money to the pool and recompute every share.
    Fund {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Forget the pool total. Shares keep their values until the next change.
    Clear,
    /// Register an employee with the hours worked.
    Add {
        name: String,
        #[arg(allow_hyphen_values = true)]
        hours: String,
    },
    /// Remove an employee. Remaining shares are not recomputed.
    Remove { id: EmployeeId },
    /// Take an employee out and add them back with corrected values.
    Edit {
        id: EmployeeId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        hours: Option<String>,
    },
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "127.0.0.1")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

impl From<ServeCommand> for ServeConfig {
    fn from(value: ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    let obs = match cli.command {
        Command::Serve(_) => ObsConfig::default(),
        Command::Action(_) => ObsConfig::for_cli(),
    };
    init_tracing(obs)?;
    let config = AppConfig::load()?.with_data_dir(cli.data_dir);

    match cli.command {
        Command::Serve(cmd) => run_server(cmd, config).await,
        Command::Action(action) => run_action(action, &config),
    }
}

fn open_board(config: &AppConfig) -> Result<TipBoard<platform_store::DynStore>> {
    let store = config
        .store
        .open()
        .with_context(|| format!("failed to open {}", config.store.data_dir.display()))?;
    TipBoard::open(store).context("failed to load tip board")
}

fn run_action(action: Action, config: &AppConfig) -> Result<()> {
    let mut board = open_board(config)?;
    let mut form = TipForm::default();

    match action {
        Action::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&board.snapshot())?);
                return Ok(());
            }
        }
        Action::Fund { amount } => {
            form.set_pool_amount(&amount);
            form.submit_pool(&mut board)?;
        }
        Action::Clear => {
            board.clear_pool()?;
        }
        Action::Add { name, hours } => {
            form.set_name(&name);
            form.set_hours(&hours);
            form.submit_employee(&mut board)?;
        }
        Action::Remove { id } => {
            board.remove_employee(id)?;
        }
        Action::Edit { id, name, hours } => {
            if form.begin_edit(&mut board, id)? {
                if let Some(name) = name {
                    form.set_name(&name);
                }
                if let Some(hours) = hours {
                    form.set_hours(&hours);
                }
                let outcome = form.submit_employee(&mut board)?;
                if !outcome.is_applied() {
                    warn!(%id, "edited employee was not re-added");
                }
            }
        }
    }

    print!(
        "{}",
        render::board_table(&board.snapshot(), &board.headcount_label())
    );
    Ok(())
}

async fn run_server(cmd: ServeCommand, config: AppConfig) -> Result<()> {
    let board = Arc::new(Mutex::new(open_board(&config)?));
    let schema = graphql::build_schema(board.clone());
    info!(data_dir = %config.store.data_dir.display(), "tip board ready");
    let state = AppState {
        schema,
        board,
        cors_allowed_origins: config.cors_allowed_origins,
    };
    http::serve(cmd.into(), state).await
}
