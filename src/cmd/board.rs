//! Board commands: `roadmap show`, `roadmap suggest`, `roadmap labels`.
//!
//! Flags are replayed as intents on a fresh [`Board`], the same path an
//! interactive UI takes.

use anyhow::{Context, Result};
use std::path::PathBuf;

use roadmap::board::events::{Board, Intent, Reaction};
use roadmap::board::models::Dataset;
use roadmap::config::Config;
use roadmap::ui;

use super::super::{Cli, FilterArgs};

/// Build the runtime config and open a board session on the resolved dataset.
pub fn open_board(cli: &Cli, project_dir: PathBuf) -> Result<(Config, Board)> {
    let config = Config::new(
        project_dir,
        cli.verbose,
        cli.data_file.clone(),
        cli.lang,
    )?;
    let data_file = config.data_file()?;
    let dataset = Dataset::load(&data_file)
        .with_context(|| format!("Failed to load roadmap data from {}", data_file.display()))?;
    let board = Board::new(dataset, config.settings())?;
    Ok((config, board))
}

/// Replay command-line facets as intents.
pub fn apply_filters(board: &mut Board, filters: &FilterArgs) {
    if let Some(text) = &filters.text {
        board.dispatch(Intent::CommitTextFilter(text.clone()));
    }
    if let Some(state) = filters.state {
        board.dispatch(Intent::SetIssueState(Some(state)));
    }
    if let Some(status) = &filters.status {
        board.dispatch(Intent::ToggleStatus(status.clone()));
    }
    for label in &filters.labels {
        if !board.filters().has_label(label) {
            board.dispatch(Intent::ToggleLabel(label.clone()));
        }
    }
}

pub fn cmd_show(cli: &Cli, project_dir: PathBuf, filters: &FilterArgs, json: bool) -> Result<()> {
    let (config, mut board) = open_board(cli, project_dir)?;
    apply_filters(&mut board, filters);
    let view = board.view();

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        ui::print_board(&view, config.language());
    }
    Ok(())
}

pub fn cmd_suggest(
    cli: &Cli,
    project_dir: PathBuf,
    query: &str,
    filters: &FilterArgs,
    json: bool,
) -> Result<()> {
    let (_, mut board) = open_board(cli, project_dir)?;
    apply_filters(&mut board, filters);

    let suggestions = match board.dispatch(Intent::InputTextChanged(query.to_string())) {
        Reaction::Suggestions(suggestions) => suggestions,
        Reaction::Rendered(_) => Vec::new(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
    } else if suggestions.is_empty() {
        println!("No suggestions for '{}'", query);
    } else {
        ui::print_suggestions(&suggestions);
    }
    Ok(())
}

pub fn cmd_labels(cli: &Cli, project_dir: PathBuf, json: bool) -> Result<()> {
    let (_, board) = open_board(cli, project_dir)?;
    let menu = board.view().label_menu;

    if json {
        println!("{}", serde_json::to_string_pretty(&menu)?);
    } else if menu.is_empty() {
        println!("No labels on this board.");
    } else {
        ui::print_labels(&menu);
    }
    Ok(())
}
