use std::time::{Duration, Instant};

use clap::Parser;
use schack_core::{
    board::{CoordinateMove, Position},
    perft::{divide, perft, perft_parallel},
};

/// Perft tester for schack.
///
/// Counts the leaf nodes of the legal move tree to check the move generator
/// for correctness and measure its speed.
#[derive(Parser, Debug)]
struct Args {
    /// Starting position of the board.
    ///
    /// Expects either the string "startpos" or a valid position in
    /// Forsyth-Edwards Notation (FEN). Additional alterations to the position
    /// can be specified via the --moves option.
    #[arg(short, long, default_value = "startpos", value_parser = parse_position)]
    position: Position,

    /// Additional moves to play before running perft.
    ///
    /// Moves should consist of the starting square in algebraic notation
    /// followed by the ending square in algebraic notation, plus an optional
    /// promotion target as a lowercase FEN char, e.g. `d2d4`, `e2e1q`
    #[arg(short, long, num_args(0..))]
    moves: Vec<CoordinateMove>,

    /// Exact depth to search to.
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..), default_value_t = 5)]
    depth: u8,

    /// Run in divide mode.
    ///
    /// Lists each legal move in the position along with the number of nodes
    /// found under it, which narrows a wrong count down to the move sequence
    /// that causes it.
    #[arg(long)]
    divide: bool,

    /// Search each root move on its own thread.
    #[arg(long)]
    parallel: bool,
}

fn parse_position(s: &str) -> Result<Position, String> {
    if s == "startpos" {
        Ok(Position::starting_position())
    } else {
        Position::try_parse_fen(s)
            .map_err(|e| format!("Expected `startpos` or a valid FEN string. {e}"))
    }
}

fn generic_perft(position: Position, max_depth: usize, parallel: bool) {
    let mut total_time = Duration::ZERO;
    let mut last_depth_time = Duration::ZERO;
    let mut last_depth_nodes = 0;

    for depth in 1..=max_depth {
        let start_time = Instant::now();

        let nodes = if parallel {
            perft_parallel(&position, depth)
        } else {
            perft(&position, depth)
        };

        let time_taken = start_time.elapsed();

        println!(
            "Depth: {depth}\tNodes: {nodes}\tTime taken: {:.3}s",
            time_taken.as_secs_f64()
        );

        total_time += time_taken;
        last_depth_time = time_taken;
        last_depth_nodes = nodes;
    }

    println!();

    let nodes_per_second = last_depth_nodes as f64 / last_depth_time.as_secs_f64();

    println!(
        "Total time: {:.3}s\tNodes per second: {:.0}",
        total_time.as_secs_f64(),
        nodes_per_second
    );
}

fn specific_perft(position: Position, depth: usize) {
    let mut total_nodes = 0;
    for (m, nodes) in divide(&position, depth) {
        total_nodes += nodes;
        println!("{}: {nodes}", CoordinateMove::from(m));
    }

    println!();
    println!("Nodes searched: {total_nodes}");
}

fn main() -> Result<(), String> {
    let Args {
        position,
        moves,
        depth,
        divide,
        parallel,
    } = Args::parse();

    let mut position = position;
    for coordinates in moves {
        let Some(m) = position.find_move(coordinates.from, coordinates.to, coordinates.promotion)
        else {
            return Err(format!(
                "Move `{coordinates}` is invalid to play in this position ({})",
                position.fen()
            ));
        };
        position = position.apply_unchecked(m);
    }

    if divide {
        specific_perft(position, depth as _);
    } else {
        generic_perft(position, depth as _, parallel);
    }

    Ok(())
}
