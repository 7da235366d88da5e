use crate::input::{parse_command, Command};
use crate::ui::{self, report::ComputerMoveReport};
use anyhow::{bail, Context, Result};
use kaizo_core::engine::config::EngineConfig;
use kaizo_core::engine::search::MinimaxEngine;
use kaizo_core::engine::Searcher;
use kaizo_core::logic::board::Side;
use kaizo_core::logic::game::{GameState, GameStatus};
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub first: Side,
    pub hints: bool,
    pub json: bool,
}

/// Plays one game over `input` and `out`. Returns the status the game was
/// left in, which is still `Playing` when the player quit.
pub fn run<R: BufRead, W: Write>(
    config: Arc<EngineConfig>,
    options: Options,
    mut input: R,
    mut out: W,
) -> Result<GameStatus> {
    let mut game = GameState::new(options.first);
    let mut engine = MinimaxEngine::new(config);
    info!(first = ?options.first, depth = engine.config().max_depth, "game started");

    while game.status == GameStatus::Playing {
        match game.turn {
            Side::Human => {
                if !human_turn(&mut game, options, &mut input, &mut out)? {
                    writeln!(out, "Bye.")?;
                    info!(plies = game.history.len(), "player left");
                    return Ok(game.status);
                }
            }
            Side::Computer => computer_turn(&mut game, &mut engine, options, &mut out)?,
        }
    }

    write!(out, "\n{}", ui::board::render(&game.board, None))?;
    if let Some(message) = ui::announce(game.status) {
        writeln!(out, "{message}")?;
    }
    info!(status = ?game.status, plies = game.history.len(), "game finished");
    Ok(game.status)
}

/// Returns `false` when the player quits or the input runs out.
fn human_turn<R: BufRead, W: Write>(
    game: &mut GameState,
    options: Options,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    let moves = game.legal_moves();
    let hints = options.hints.then_some(&moves);
    write!(out, "\n{}", ui::board::render(&game.board, hints))?;
    write!(out, "{}", ui::board::move_listing(&moves))?;

    let mut line = String::new();
    loop {
        write!(out, "Your move: ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line).context("reading a move")? == 0 {
            return Ok(false);
        }
        let (from, to) = match parse_command(&line) {
            Ok(Command::Quit) => return Ok(false),
            Ok(Command::Move { from, to }) => (from, to),
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        match game.make_move(from, to) {
            Ok(mv) => {
                writeln!(out, "You move {mv}")?;
                return Ok(true);
            }
            Err(err) => writeln!(out, "Illegal move: {err}")?,
        }
    }
}

fn computer_turn<S: Searcher, W: Write>(
    game: &mut GameState,
    engine: &mut S,
    options: Options,
    out: &mut W,
) -> Result<()> {
    let Some(outcome) = engine.search(game) else {
        bail!("the engine found no move in a running game");
    };
    game.commit(&outcome.mv)
        .with_context(|| format!("engine move {} was rejected", outcome.mv))?;

    let report = ComputerMoveReport::new(&outcome);
    if options.json {
        writeln!(out, "{}", report.to_json()?)?;
    } else {
        writeln!(out, "{report}")?;
    }
    Ok(())
}
