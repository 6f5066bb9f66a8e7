//! Perft: counting the leaf nodes of the legal move tree to a fixed depth.
//!
//! The counts for well-known positions are published, so perft is the
//! standard way to check a move generator for correctness.

use std::{panic, thread};

use crate::board::{Move, Position};

pub fn perft(position: &Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = position.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|m| perft(&position.apply_unchecked(m), depth - 1))
        .sum()
}

/// Perft split by root move: the node count under each legal move of the
/// position, in generation order. Depth 0 counts each root move once.
pub fn divide(position: &Position, depth: usize) -> Vec<(Move, u64)> {
    position
        .legal_moves()
        .into_iter()
        .map(|m| (m, perft(&position.apply_unchecked(m), depth.saturating_sub(1))))
        .collect()
}

/// Same count as [`perft`], with each root move searched on its own thread.
///
/// Positions are plain values, so the threads share nothing and need no
/// locking.
pub fn perft_parallel(position: &Position, depth: usize) -> u64 {
    if depth <= 1 {
        return perft(position, depth);
    }

    thread::scope(|scope| {
        let handles: Vec<_> = position
            .legal_moves()
            .into_iter()
            .map(|m| {
                let child = position.apply_unchecked(m);
                scope.spawn(move || perft(&child, depth - 1))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|panic| panic::resume_unwind(panic)))
            .sum()
    })
}
