// src/main.rs
mod app;
mod config;
mod controller;
mod detail;
mod input;
mod launcher;
mod logging;
mod models;
mod network;
mod table;
mod theme;
mod ui;
mod utils;

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::event;
use tokio::runtime::{Handle, Runtime};
use tracing::info;

use crate::app::App;
use crate::config::Settings;
use crate::controller::{UserListController, ViewState};
use crate::launcher::SystemLauncher;
use crate::network::{ApiClient, UserSource};
use crate::utils::{Term, init_terminal, restore_terminal};

#[derive(Parser, Debug)]
#[command(name = "userdeck", version, about = "Browse a remote user directory in the terminal")]
struct Cli {
    /// Extra configuration file, applied on top of the user config
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Do not capture the mouse
    #[arg(long)]
    no_mouse: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a single user and print it as JSON
    Show { id: u64 },
    /// Fetch the user list once and print one line per user
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(url) = cli.base_url {
        settings.api_base_url = url;
    }
    if cli.no_mouse {
        settings.mouse = false;
    }
    let _log_guard = logging::init(&settings)?;

    let rt = Runtime::new()?;
    let client = ApiClient::new(settings.api_base_url.clone());
    info!(base_url = %client.base_url(), "starting userdeck");

    match cli.command {
        Some(Command::Show { id }) => show_user(&rt, &client, id),
        Some(Command::List) => list_users(&rt, &client),
        None => run_tui(&rt, &settings, client),
    }
}

fn list_users(rt: &Runtime, client: &ApiClient) -> Result<()> {
    let mut controller = UserListController::new();
    rt.block_on(controller.load(client));
    match controller.state() {
        ViewState::Loaded(users) => {
            for user in users {
                println!("{:>4}  {:<28} {:<28} {}", user.id, user.name, user.email, user.flat_address());
            }
            Ok(())
        }
        ViewState::Errored(message) => anyhow::bail!("{message}"),
        ViewState::NotLoaded | ViewState::Loading => anyhow::bail!("user list was not loaded"),
    }
}

fn show_user(rt: &Runtime, client: &ApiClient, id: u64) -> Result<()> {
    let user = rt.block_on(client.fetch_one(id))?;
    println!("{}", serde_json::to_string_pretty(&user)?);
    Ok(())
}

fn run_tui(rt: &Runtime, settings: &Settings, client: ApiClient) -> Result<()> {
    let mut app = App::new(Arc::new(client), Box::new(SystemLauncher::default()));
    let tick_rate = Duration::from_millis(settings.tick_rate_ms);

    let mut terminal = init_terminal(settings.mouse)?;
    let result = run(&mut terminal, &mut app, rt.handle(), tick_rate);
    // Restore even when the loop failed.
    restore_terminal(&mut terminal)?;
    result
}

fn run(terminal: &mut Term, app: &mut App, runtime: &Handle, tick_rate: Duration) -> Result<()> {
    app.start(runtime);

    loop {
        app.tick();
        terminal.draw(|f| ui::render(f, app))?;

        if app.should_quit {
            break;
        }

        if event::poll(tick_rate)? {
            let event = event::read()?;
            if let Some(action) = input::map_event(app, event) {
                app.dispatch(action);
            }
        }
    }

    info!("quit");
    Ok(())
}
