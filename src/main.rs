use amazons::{Game, GameConfig};
use std::env;
use std::process;

fn main() {
    let history = env::args().nth(1);

    let result = match &history {
        Some(history) => Game::from_history(history, GameConfig::default()),
        None => Ok(Game::new()),
    };

    let game = match result {
        Ok(game) => game,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    };

    println!("Game of the Amazons");
    println!("===================\n");
    println!("{}", game.ascii());

    match game.turn() {
        Some(player) => {
            let moves = game.legal_move_texts().unwrap_or_default();
            println!("\n{player} to move, {} legal moves", moves.len());
        }
        None => println!("\nGame over: {:?}", game.status()),
    }
}
