use log::{debug, info};

use crate::config::GameConfig;
use crate::draw_engine::{DrawEngine, DrawState};
use crate::error::GameError;
use crate::grid::{Grid, pack_grid};
use crate::random_source::{RandomSource, SeededRandom, ThreadRandom};
use crate::ticket::generate_batch;
use crate::win_detector::WinDetector;

/// Playable batch size.
pub const MIN_TICKETS: usize = 1;
pub const MAX_TICKETS: usize = 20;

/// One cell on one grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub grid: usize,
    pub row: usize,
    pub column: usize,
}

/// What a single draw produced: the number, every cell it lights up, and the
/// grids that completed a row because of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOutcome {
    pub number: u8,
    pub hits: Vec<GridCell>,
    pub new_winners: Vec<usize>,
}

/// Ties the pieces together: ticket generation, grid packing, the draw
/// engine and win detection, behind the entry points the presentation layer
/// calls.
pub struct Game {
    config: GameConfig,
    rng: Box<dyn RandomSource>,
    grids: Vec<Grid>,
    engine: DrawEngine,
    detector: WinDetector,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let rng: Box<dyn RandomSource> = match config.seed {
            Some(seed) => Box::new(SeededRandom::new(seed)),
            None => Box::new(ThreadRandom),
        };
        Self::with_random(config, rng)
    }

    pub fn with_random(config: GameConfig, rng: Box<dyn RandomSource>) -> Self {
        Self {
            config,
            rng,
            grids: Vec::new(),
            engine: DrawEngine::new(),
            detector: WinDetector::new(0),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grids(&self) -> &[Grid] {
        &self.grids
    }

    pub fn drawn(&self) -> &[u8] {
        self.engine.drawn()
    }

    /// Numbers still in the pool.
    pub fn remaining(&self) -> usize {
        self.engine.remaining()
    }

    pub fn state(&self) -> DrawState {
        self.engine.state()
    }

    /// Grid indices that have completed a row so far.
    pub fn winners(&self) -> Vec<usize> {
        self.detector.winners()
    }

    /// Replace the current batch with `count` freshly generated grids. The
    /// count must lie in [1, 20]; anything else is rejected before any
    /// generation happens. Starts from a clean draw state, like the original
    /// game resets before handing out new tickets.
    pub fn generate_tickets(&mut self, count: usize) -> Result<&[Grid], GameError> {
        if !(MIN_TICKETS..=MAX_TICKETS).contains(&count) {
            return Err(GameError::InvalidConfiguration(format!(
                "ticket count must be between {MIN_TICKETS} and {MAX_TICKETS}, got {count}"
            )));
        }
        self.reset();

        let tickets = generate_batch(self.rng.as_mut(), count, self.config.max_attempts)?;
        let mut grids = Vec::with_capacity(count);
        for ticket in &tickets {
            grids.push(pack_grid(ticket, self.rng.as_mut(), self.config.max_attempts)?);
        }

        info!("generated {count} tickets");
        self.grids = grids;
        self.detector = WinDetector::new(count);
        Ok(&self.grids)
    }

    /// Begin drawing. Refused while no grids exist; the engine stays Idle.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.grids.is_empty() {
            return Err(GameError::InvalidConfiguration(
                "no tickets to draw against".into(),
            ));
        }
        self.engine.start();
        Ok(())
    }

    /// Draw the next number and run the match/win pass for it. `Ok(None)`
    /// means the pool ran dry and the engine stopped — the game simply ended.
    /// A win also stops the engine; every grid that completed a row on this
    /// draw is reported, the first one triggers the stop.
    pub fn draw_next(&mut self) -> Result<Option<DrawOutcome>, GameError> {
        let Some(number) = self.engine.draw_one(self.rng.as_mut())? else {
            info!("pool exhausted after {} draws", self.engine.drawn().len());
            return Ok(None);
        };

        let hits = self.cells_holding(number);
        let new_winners = self.detector.evaluate(self.engine.drawn(), &self.grids);
        debug!("drew {number}, {} cell(s) lit", hits.len());

        if let Some(&first) = new_winners.first() {
            info!("grid {first} completed a row, stopping the draw");
            self.engine.stop();
        }

        Ok(Some(DrawOutcome {
            number,
            hits,
            new_winners,
        }))
    }

    pub fn stop(&mut self) {
        self.engine.stop();
    }

    /// Back to square one: Idle engine, full pool, no grids. The next batch
    /// comes from a new generation request.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.grids.clear();
        self.detector = WinDetector::new(0);
    }

    fn cells_holding(&self, number: u8) -> Vec<GridCell> {
        self.grids
            .iter()
            .enumerate()
            .flat_map(|(grid, cells)| {
                cells.occupied().filter_map(move |(row, column, n)| {
                    (n == number).then_some(GridCell { grid, row, column })
                })
            })
            .collect()
    }
}
