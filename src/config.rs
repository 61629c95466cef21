use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use crate::error::GameError;

/// Game parameters. All fields are optional in the JSON file and fall back
/// to the defaults below.
///
/// The file has the following structure:
/// {
///    "tickets": 5,
///    "draw_interval_ms": 300,
///    "seed": 1234,
///    "output": "loto_board.png"
/// }
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// How many tickets to generate. Playable range is 1..=20.
    pub tickets: usize,
    /// Pause between two draws.
    pub draw_interval_ms: u64,
    /// Fixed seed for reproducible runs; entropy-based when absent.
    pub seed: Option<u64>,
    /// Retry bound for rejection sampling before giving up.
    pub max_attempts: u32,
    /// Where the final board snapshot is written.
    pub output: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tickets: 5,
            draw_interval_ms: 300,
            seed: None,
            max_attempts: 10_000,
            output: PathBuf::from("loto_board.png"),
        }
    }
}

pub fn read_config_from_json(path: &str) -> Result<GameConfig, GameError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config: GameConfig = serde_json::from_reader(reader)?;
    Ok(config)
}
