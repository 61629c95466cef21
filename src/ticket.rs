use crate::error::GameError;
use crate::random_source::RandomSource;

/// Numbers run from 1 to 99.
pub const NUMBER_MAX: u8 = 99;
/// A ticket always carries 15 numbers.
pub const TICKET_SIZE: usize = 15;
/// Numbers fall into ten column bands of (at most) ten values each.
pub const COLUMN_COUNT: usize = 10;
/// A ticket may hold at most three numbers per column band.
pub const COLUMN_CAP: usize = 3;

/// Column band of a number: 1-10 -> 0, 11-20 -> 1, ... 91-99 -> 9.
/// The last band only spans nine values.
pub fn column_of(number: u8) -> usize {
    ((number - 1) / 10) as usize
}

/// 15 unique numbers in [1, 99], sorted ascending, no more than three per
/// column band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    numbers: Vec<u8>,
}

impl Ticket {
    pub fn numbers(&self) -> &[u8] {
        &self.numbers
    }

    pub fn contains(&self, number: u8) -> bool {
        self.numbers.binary_search(&number).is_ok()
    }

    /// Build directly from raw numbers, checking the ticket invariants.
    #[cfg(test)]
    pub fn from_numbers(mut numbers: Vec<u8>) -> Self {
        numbers.sort_unstable();
        assert_eq!(numbers.len(), TICKET_SIZE);
        let mut per_column = [0usize; COLUMN_COUNT];
        for window in numbers.windows(2) {
            assert!(window[0] < window[1], "numbers must be unique");
        }
        for &n in &numbers {
            assert!((1..=NUMBER_MAX).contains(&n));
            per_column[column_of(n)] += 1;
        }
        assert!(per_column.iter().all(|&c| c <= COLUMN_CAP));
        Self { numbers }
    }
}

/// Generate one ticket by rejection sampling: keep drawing candidates in
/// [1, 99] and accept each one that is not already on the ticket and whose
/// column band still has room. The attempt bound turns a pathological random
/// source into a reported error instead of a hang.
pub fn generate_ticket(rng: &mut dyn RandomSource, max_attempts: u32) -> Result<Ticket, GameError> {
    let mut numbers: Vec<u8> = Vec::with_capacity(TICKET_SIZE);
    let mut per_column = [0usize; COLUMN_COUNT];
    let mut attempts = 0u32;

    while numbers.len() < TICKET_SIZE {
        if attempts >= max_attempts {
            return Err(GameError::GenerationExhausted {
                context: "picking ticket numbers",
                attempts: max_attempts,
            });
        }
        attempts += 1;

        let candidate = rng.next_in(1, NUMBER_MAX);
        let column = column_of(candidate);
        if !numbers.contains(&candidate) && per_column[column] < COLUMN_CAP {
            numbers.push(candidate);
            per_column[column] += 1;
        }
    }

    numbers.sort_unstable();
    Ok(Ticket { numbers })
}

/// Generate `count` independent tickets. Count validation against the
/// playable range happens at the game boundary, not here.
pub fn generate_batch(
    rng: &mut dyn RandomSource,
    count: usize,
    max_attempts: u32,
) -> Result<Vec<Ticket>, GameError> {
    let mut tickets = Vec::with_capacity(count);
    for _ in 0..count {
        tickets.push(generate_ticket(rng, max_attempts)?);
    }
    Ok(tickets)
}
