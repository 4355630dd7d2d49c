extern crate minimax_lib;

use minimax_lib::agent::{MinimaxAgent, play_game};
use minimax_lib::boards::tic_tac_toe::{Player, TicTacToeBoard};
use minimax_lib::minimax::MinimaxSearch;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Create a new Tic-Tac-Toe board
    let board = TicTacToeBoard::default();

    // Create a new search instance, scoring the first moves in parallel
    let search = MinimaxSearch::builder(board)
        .with_parallel_root(true)
        .build();

    // Print the value of every opening move
    let report = match search.evaluate_actions() {
        Ok(report) => report,
        Err(err) => {
            eprintln!("search failed: {err}");
            std::process::exit(1);
        }
    };
    for scored in &report.scored {
        println!("Move: {} = {}", scored.action, scored.value);
    }
    println!(
        "Searched {} positions ({} terminal)",
        report.stats.nodes, report.stats.leaves
    );

    if let Some(best) = report.best() {
        println!("The best move is: {}", best.action);
    }

    // Let two perfect players finish the game
    let mut x = MinimaxAgent::new().with_parallel_root(true);
    let mut o = MinimaxAgent::new().with_parallel_root(true);
    match play_game(board, &mut x, &mut o) {
        Ok(record) => {
            let mut replay = board;
            for action in &record.actions {
                replay = match replay.apply_action(*action) {
                    Ok(next) => next,
                    Err(err) => {
                        eprintln!("replay failed: {err}");
                        std::process::exit(1);
                    }
                };
                println!("{} plays {}\n{}\n", replay_mover(&replay), action, replay);
            }
            println!("Outcome: {:?}", record.outcome);
        }
        Err(err) => {
            eprintln!("game failed: {err}");
            std::process::exit(1);
        }
    }
}

/// The player who made the last move on `board`.
fn replay_mover(board: &TicTacToeBoard) -> Player {
    board.active_player().opponent()
}
