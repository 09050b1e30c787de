//! Command-line interface for tictactoe_minimax.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_minimax::{Player, SearchConfig};
use tracing::{debug, instrument};

/// Tic-tac-toe minimax - perfect play for the computer player
#[derive(Parser, Debug)]
#[command(name = "tictactoe_minimax")]
#[command(about = "Minimax move selection for tic-tac-toe", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Search settings shared by every command
    #[command(flatten)]
    pub search: SearchArgs,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Search configuration and overrides
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Path to a TOML search configuration
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Plies to look ahead (1-9)
    #[arg(short, long, global = true)]
    pub depth: Option<u8>,

    /// Mark the computer plays for (x or o)
    #[arg(short, long, global = true)]
    pub goal: Option<char>,

    /// The opponent moves first
    #[arg(long, global = true)]
    pub min_first: bool,
}

impl SearchArgs {
    /// Loads the config file (or defaults) and applies the overrides.
    #[instrument(skip(self))]
    pub fn resolve(&self) -> Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::from_file(path)?,
            None => SearchConfig::default(),
        };

        if let Some(depth) = self.depth {
            config = config.with_depth(depth);
        }
        if let Some(symbol) = self.goal {
            let goal = Player::from_symbol(symbol).context("Invalid --goal")?;
            config = config.with_goal(goal);
        }
        if self.min_first {
            config = config.with_max_first(false);
        }

        config.validate()?;
        debug!(?config, "Search config resolved");
        Ok(config)
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Choose the next move for a position
    Decide {
        /// Position as nine cells: 0 for empty, x or o (e.g. x000o0000)
        sequence: String,

        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },

    /// Let the strategy play both sides from the empty board
    Selfplay,

    /// Build the full game tree and report its size
    Tree {
        /// Position to grow the tree from
        #[arg(default_value = "000000000")]
        sequence: String,
    },
}
