use std::{process::ExitCode, time::Instant};

use schack_core::{board::Position, perft::perft_parallel};

#[derive(Debug, Clone)]
struct TestCase {
    fen: String,
    expected_results: Vec<u64>,
}

/// Parses one suite line: a FEN, then `;D<depth> <nodes>` entries for depths
/// 1, 2, 3 and so on.
fn parse_test_case(line: &str) -> Result<TestCase, String> {
    let (fen, results) = line
        .split_once(" ;")
        .ok_or_else(|| format!("No results on line `{line}`"))?;

    let expected_results = results
        .split(" ;")
        .map(|val| {
            let (_, nodes) = val
                .split_once(' ')
                .ok_or_else(|| format!("Malformed result `{val}`"))?;
            nodes
                .parse()
                .map_err(|e| format!("Malformed node count `{nodes}`: {e}"))
        })
        .collect::<Result<_, _>>()?;

    Ok(TestCase {
        fen: fen.to_string(),
        expected_results,
    })
}

fn parse_test_cases() -> Result<Vec<TestCase>, String> {
    include_str!("perftsuite.txt")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_test_case)
        .collect()
}

fn run_test_case(id: usize, case: &TestCase) -> bool {
    println!("Test case {id}: {}", case.fen);
    let position = match Position::try_parse_fen(&case.fen) {
        Ok(position) => position,
        Err(e) => {
            println!("Could not parse position -- ERROR: {e}");
            return false;
        }
    };

    let mut failed = false;
    for (i, &expected) in case.expected_results.iter().enumerate() {
        let depth = i + 1;
        print!("Depth {depth}: Expected {expected}, ");
        let received = perft_parallel(&position, depth);
        print!("got {received}");

        if expected == received {
            println!();
        } else {
            failed = true;
            println!(" -- ERROR");
        }
    }

    !failed
}

fn main() -> ExitCode {
    let test_cases = match parse_test_cases() {
        Ok(test_cases) => test_cases,
        Err(e) => {
            println!("Could not read the test suite: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut failed_cases = vec![];

    let start = Instant::now();
    for (i, case) in test_cases.iter().enumerate() {
        let id = i + 1;
        if !run_test_case(id, case) {
            failed_cases.push(id.to_string());
        }
    }
    let elapsed = start.elapsed();

    println!("Took {:?}.", elapsed);

    if failed_cases.is_empty() {
        println!("All test cases passed.");
        ExitCode::SUCCESS
    } else {
        println!("Failing cases: {}", failed_cases.join(", "));
        ExitCode::FAILURE
    }
}
