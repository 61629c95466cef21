use crate::error::GameError;
use crate::random_source::RandomSource;
use crate::ticket::NUMBER_MAX;

/// Draw lifecycle. Stopped is reached by running out of numbers, by a win,
/// or manually; only reset leads back to Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawState {
    Idle,
    Active,
    Stopped,
}

/// Owns the pool of undrawn numbers and the draw history. The pool and the
/// drawn list stay disjoint and together always cover 1..=99.
#[derive(Debug)]
pub struct DrawEngine {
    state: DrawState,
    pool: Vec<u8>,
    drawn: Vec<u8>,
}

impl DrawEngine {
    pub fn new() -> Self {
        Self {
            state: DrawState::Idle,
            pool: (1..=NUMBER_MAX).collect(),
            drawn: Vec::new(),
        }
    }

    pub fn state(&self) -> DrawState {
        self.state
    }

    /// Numbers drawn so far, in draw order.
    pub fn drawn(&self) -> &[u8] {
        &self.drawn
    }

    pub fn is_drawn(&self, number: u8) -> bool {
        self.drawn.contains(&number)
    }

    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    /// Idle -> Active. A no-op in any other state; whether there is anything
    /// to draw against is checked at the game boundary.
    pub fn start(&mut self) {
        if self.state == DrawState::Idle {
            self.state = DrawState::Active;
        }
    }

    /// Draw one number uniformly, without replacement. Returns `Ok(None)`
    /// and moves to Stopped once the pool is exhausted; erring only when not
    /// Active.
    pub fn draw_one(&mut self, rng: &mut dyn RandomSource) -> Result<Option<u8>, GameError> {
        if self.state != DrawState::Active {
            return Err(GameError::NotActive);
        }
        if self.pool.is_empty() {
            self.state = DrawState::Stopped;
            return Ok(None);
        }

        let index = rng.next_in(0, (self.pool.len() - 1) as u8) as usize;
        let number = self.pool.swap_remove(index);
        self.drawn.push(number);
        Ok(Some(number))
    }

    /// Active -> Stopped; idempotent, no effect on Idle.
    pub fn stop(&mut self) {
        if self.state == DrawState::Active {
            self.state = DrawState::Stopped;
        }
    }

    /// Back to Idle with a full pool and an empty history, from any state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for DrawEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random_source::SeededRandom;

    #[test]
    fn test_draw_requires_active_state() {
        let mut engine = DrawEngine::new();
        let mut rng = SeededRandom::new(1);
        assert!(matches!(
            engine.draw_one(&mut rng),
            Err(GameError::NotActive)
        ));
        assert_eq!(engine.state(), DrawState::Idle);

        engine.start();
        assert_eq!(engine.state(), DrawState::Active);
        assert!(engine.draw_one(&mut rng).expect("should draw").is_some());
    }

    #[test]
    fn test_pool_and_drawn_partition_the_range() {
        let mut engine = DrawEngine::new();
        let mut rng = SeededRandom::new(2);
        engine.start();

        for expected_drawn in 1..=30usize {
            let number = engine
                .draw_one(&mut rng)
                .expect("should draw")
                .expect("pool not empty");
            assert!((1..=NUMBER_MAX).contains(&number));
            assert_eq!(engine.drawn().len(), expected_drawn);
            assert_eq!(engine.remaining(), NUMBER_MAX as usize - expected_drawn);
            assert!(engine.is_drawn(number));

            // Disjoint, and together the whole range.
            let mut all: Vec<u8> = engine.drawn().to_vec();
            all.extend(engine.pool.iter().copied());
            all.sort_unstable();
            let full: Vec<u8> = (1..=NUMBER_MAX).collect();
            assert_eq!(all, full);
        }
    }

    #[test]
    fn test_exhaustion_yields_each_number_once_then_stops() {
        let mut engine = DrawEngine::new();
        let mut rng = SeededRandom::new(3);
        engine.start();

        let mut seen = Vec::new();
        while let Some(number) = engine.draw_one(&mut rng).expect("should draw") {
            seen.push(number);
        }
        assert_eq!(seen.len(), NUMBER_MAX as usize);
        seen.sort_unstable();
        let full: Vec<u8> = (1..=NUMBER_MAX).collect();
        assert_eq!(seen, full);
        assert_eq!(engine.state(), DrawState::Stopped);

        // Stopped engine refuses further draws until reset.
        assert!(matches!(
            engine.draw_one(&mut rng),
            Err(GameError::NotActive)
        ));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut engine = DrawEngine::new();
        engine.stop();
        assert_eq!(engine.state(), DrawState::Idle);

        engine.start();
        engine.stop();
        assert_eq!(engine.state(), DrawState::Stopped);
        engine.stop();
        assert_eq!(engine.state(), DrawState::Stopped);

        engine.start();
        assert_eq!(engine.state(), DrawState::Stopped, "start from Stopped is a no-op");
    }

    #[test]
    fn test_reset_restores_full_pool() {
        let mut engine = DrawEngine::new();
        let mut rng = SeededRandom::new(4);
        engine.start();
        for _ in 0..10 {
            let _ = engine.draw_one(&mut rng).expect("should draw");
        }

        engine.reset();
        assert_eq!(engine.state(), DrawState::Idle);
        assert_eq!(engine.remaining(), NUMBER_MAX as usize);
        assert!(engine.drawn().is_empty());
    }
}
