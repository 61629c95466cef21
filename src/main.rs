use std::env;
use std::process;
use std::time::Duration;

use loto_sim::board_renderer;
use loto_sim::config::{self, GameConfig};
use loto_sim::draw_loop::DrawLoop;
use loto_sim::error::GameError;
use loto_sim::game::Game;

fn main() {
    env_logger::init();

    // Optional path to a JSON config; defaults match the classic game.
    let config = match env::args().nth(1) {
        Some(path) => match config::read_config_from_json(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {path}: {e}");
                process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    if let Err(e) = run(config) {
        eprintln!("Game failed: {e}");
        process::exit(1);
    }
}

fn run(config: GameConfig) -> Result<(), GameError> {
    let interval = Duration::from_millis(config.draw_interval_ms);
    let ticket_count = config.tickets;
    let output = config.output.clone();

    let mut game = Game::new(config);
    let _ = game.generate_tickets(ticket_count)?;
    game.start()?;

    let draw_loop = DrawLoop::spawn(game, interval);
    for outcome in draw_loop.events().iter() {
        println!("Drew {} ({} cell(s) lit)", outcome.number, outcome.hits.len());
        for &winner in &outcome.new_winners {
            println!("🎉 Ticket {} completed a row!", winner + 1);
        }
    }
    let game = draw_loop.wait();

    let winners = game.winners();
    if winners.is_empty() {
        println!(
            "No winner; the pool ran dry after {} draws.",
            game.drawn().len()
        );
    } else {
        println!(
            "Finished after {} draws, {} numbers left undrawn.",
            game.drawn().len(),
            game.remaining()
        );
    }

    match board_renderer::render_boards(game.grids(), game.drawn(), &winners, &output) {
        Ok(()) => println!("Board image written to {}", output.display()),
        // Headless boxes without fonts still get the full game on stdout.
        Err(e @ GameError::FontUnavailable) => eprintln!("Skipping board image: {e}"),
        Err(e) => return Err(e),
    }
    Ok(())
}
