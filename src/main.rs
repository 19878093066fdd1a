//! prefsync: drive the extension popup's preference engine from a terminal.
//!
//! Run with:  `RUST_LOG=info prefsync <command>` (see `prefsync --help`).

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use prefsync_config::{default_path, load as load_config};
use prefsync_core::{ActionIcon, Message, Step, TabHost, TabId};
use prefsync_popup::{MemoryView, Popup};
use prefsync_store::{FileStore, StoreWatcher};
use prefsync_theme::ThemeTable;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "prefsync", version, about = "Headless extension popup preferences")]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/prefsync/prefsync.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the popup and print what it renders.
    Show,
    /// Click the power control.
    Power,
    /// Click the feature toggle stored under KEY.
    Toggle { key: String },
    /// Step the theme.
    Theme {
        #[arg(value_enum)]
        direction: Direction,
    },
    /// Click settings-group header N.
    Group { index: usize },
    /// Click the reload affordance.
    Reload,
    /// Keep the popup open, re-rendering on store changes.
    Watch,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Direction {
    Next,
    Prev,
}

impl From<Direction> for Step {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Next => Step::Next,
            Direction::Prev => Step::Previous,
        }
    }
}

/// Stand-in for the browser: icon updates and tab reloads are only logged.
#[derive(Debug, Clone, Copy)]
struct HeadlessBrowser;

impl ActionIcon for HeadlessBrowser {
    async fn set_icon(&self, path: &str) -> prefsync_core::Result<()> {
        tracing::info!("Action icon -> {path}");
        Ok(())
    }
}

impl TabHost for HeadlessBrowser {
    async fn query(&self, patterns: &[String]) -> prefsync_core::Result<Vec<TabId>> {
        tracing::info!("No browser attached; no tabs match {patterns:?}");
        Ok(Vec::new())
    }

    async fn reload(&self, tab: TabId) -> prefsync_core::Result<()> {
        tracing::info!("Reload tab {tab}");
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Structured logging — RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::info!("prefsync v{} starting", env!("CARGO_PKG_VERSION"));

    let config = load_config(cli.config.unwrap_or_else(default_path))?;
    let store = FileStore::new(config.store_path());
    let view = MemoryView::new(config.toggles.len(), config.groups.len());

    let mut popup = Popup::open(
        &config,
        ThemeTable::builtin(),
        store,
        view,
        HeadlessBrowser,
        HeadlessBrowser,
    )
    .await?;

    match cli.command.unwrap_or(Command::Show) {
        Command::Show => {}
        Command::Power => popup.dispatch(Message::PowerClicked).await?,
        Command::Toggle { key } => {
            popup.click_toggle_key(&key).await?;
        }
        Command::Theme { direction } => popup.dispatch(Message::ThemeStep(direction.into())).await?,
        Command::Group { index } => popup.dispatch(Message::GroupHeaderClicked(index)).await?,
        Command::Reload => popup.dispatch(Message::ReloadClicked).await?,
        Command::Watch => return watch(popup).await,
    }

    print_view(popup.view())
}

async fn watch(mut popup: Popup<FileStore, MemoryView, HeadlessBrowser, HeadlessBrowser>) -> Result<()> {
    let (_watcher, mut changes) = StoreWatcher::spawn(popup.store().path());
    print_view(popup.view())?;

    loop {
        tokio::select! {
            change = changes.recv() => {
                if change.is_none() {
                    break;
                }
                popup.handle(Message::StoreChanged).await;
                print_view(popup.view())?;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted; closing popup");
                break;
            }
        }
    }
    Ok(())
}

fn print_view(view: &MemoryView) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(view)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["prefsync", "theme", "prev"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Theme { direction: Direction::Prev })));
        assert_eq!(Step::from(Direction::Prev), Step::Previous);

        let cli = Cli::try_parse_from(["prefsync", "toggle", "toggleNavState"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Toggle { ref key }) if key == "toggleNavState"));

        assert!(Cli::try_parse_from(["prefsync"]).unwrap().command.is_none());
        assert!(Cli::try_parse_from(["prefsync", "group", "x"]).is_err());
        assert!(Cli::try_parse_from(["prefsync", "theme", "sideways"]).is_err());
    }
}
