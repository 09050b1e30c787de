//! Tic-tac-toe minimax - CLI
//!
//! Runs the minimax strategy on a position, plays it against itself, or
//! measures the game tree.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use serde::Serialize;
use std::time::Instant;
use tictactoe_minimax::{Player, Position, SearchConfig, Sequence, StateTree, Utility};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.search.resolve()?;

    match cli.command {
        Command::Decide { sequence, json } => run_decide(config, &sequence, json),
        Command::Selfplay => run_selfplay(config),
        Command::Tree { sequence } => run_tree(config, &sequence),
    }
}

/// Outcome of `decide`.
#[derive(Debug, Serialize)]
struct Decision {
    /// Position searched from.
    from: Sequence,
    /// Mark to move.
    mover: Player,
    /// Chosen successor, if the game is not over.
    to: Option<Sequence>,
    /// Cell the mover marks.
    position: Option<Position>,
    /// Minimax value of the chosen successor for the goal mark.
    utility: Option<Utility>,
}

/// Choose and print the next move for a position.
#[instrument(skip(config))]
fn run_decide(config: SearchConfig, sequence: &str, json: bool) -> Result<()> {
    let from: Sequence = sequence.parse()?;
    let mut tree = StateTree::from_sequence(config, from)?;
    let mover = tree.mark_to_move(&from);

    let to = tree.minimax_decision();
    let mut utility = None;
    if let Some(next) = to {
        tree.change_state(next)?;
        utility = tree.current().utility();
    }

    let decision = Decision {
        from,
        mover,
        to,
        position: to.and_then(|next| from.move_to(&next)),
        utility,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&decision)?);
    } else {
        match (decision.to, decision.position, decision.utility) {
            (Some(to), Some(position), Some(utility)) => {
                println!("{} plays {}: {} (utility {})", mover, position, to, utility)
            }
            _ => println!("Game is over: {:?}", from.to_board().status()),
        }
    }
    Ok(())
}

/// Play the strategy against itself and print every position.
#[instrument(skip(config))]
fn run_selfplay(config: SearchConfig) -> Result<()> {
    let mut tree = StateTree::new(config)?;
    println!("{}\n", tree.current().sequence().to_board());

    while let Some(next) = tree.minimax_decision() {
        tree.change_state(next)?;
        println!("{}\n", next.to_board());
    }

    let status = tree.current().sequence().to_board().status();
    info!(?status, "Self-play finished");
    println!("Result: {:?}", status);
    Ok(())
}

/// Generate the state tree eagerly and report its size.
#[instrument(skip(config))]
fn run_tree(config: SearchConfig, sequence: &str) -> Result<()> {
    let from: Sequence = sequence.parse()?;
    let mut tree = StateTree::from_sequence(config, from)?;

    let start = Instant::now();
    let nodes = tree.generate_states();
    println!("Generated {} states in {:.3?}", nodes, start.elapsed());
    Ok(())
}
