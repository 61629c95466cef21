use crate::grid::{Grid, ROW_COUNT};

/// Latches which grids have completed a row. Works purely on the drawn
/// numbers and the packed grids; highlight state is derived elsewhere from
/// the same data.
#[derive(Debug)]
pub struct WinDetector {
    won: Vec<bool>,
}

impl WinDetector {
    pub fn new(grid_count: usize) -> Self {
        Self {
            won: vec![false; grid_count],
        }
    }

    pub fn is_won(&self, grid: usize) -> bool {
        self.won.get(grid).copied().unwrap_or(false)
    }

    /// Grid indices already latched as winners, ascending.
    pub fn winners(&self) -> Vec<usize> {
        self.won
            .iter()
            .enumerate()
            .filter_map(|(grid, &won)| won.then_some(grid))
            .collect()
    }

    /// Report the grids that newly completed a row: one whose five occupied
    /// numbers have all been drawn. A grid already latched is skipped and
    /// never reported a second time.
    pub fn evaluate(&mut self, drawn: &[u8], grids: &[Grid]) -> Vec<usize> {
        let mut newly_won = Vec::new();
        for (index, grid) in grids.iter().enumerate() {
            if self.won[index] {
                continue;
            }
            let complete = (0..ROW_COUNT)
                .any(|row| grid.row_numbers(row).all(|number| drawn.contains(&number)));
            if complete {
                self.won[index] = true;
                newly_won.push(index);
            }
        }
        newly_won
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::pack_grid;
    use crate::random_source::SeededRandom;
    use crate::ticket::generate_ticket;

    fn sample_grid(seed: u64) -> Grid {
        let mut rng = SeededRandom::new(seed);
        let ticket = generate_ticket(&mut rng, 10_000).expect("should generate");
        pack_grid(&ticket, &mut rng, 10_000).expect("should pack")
    }

    #[test]
    fn test_exactly_the_five_row_numbers_win() {
        let mut cells = [[None; 10]; 3];
        for (column, number) in [(0, 5u8), (1, 15), (2, 25), (3, 35), (4, 45)] {
            cells[0][column] = Some(number);
        }
        for (column, number) in [(1, 12u8), (3, 34), (5, 56), (7, 78), (9, 91)] {
            cells[1][column] = Some(number);
        }
        for (column, number) in [(0, 9u8), (2, 29), (4, 49), (6, 69), (8, 89)] {
            cells[2][column] = Some(number);
        }
        let grid = Grid::from_cells(cells);

        let mut detector = WinDetector::new(1);
        // Four of the five plus unrelated numbers: nothing yet.
        assert!(
            detector
                .evaluate(&[5, 15, 25, 35, 99, 60], std::slice::from_ref(&grid))
                .is_empty()
        );
        // The fifth lands: the row is complete.
        assert_eq!(
            detector.evaluate(&[5, 15, 25, 35, 99, 60, 45], std::slice::from_ref(&grid)),
            vec![0]
        );
    }

    #[test]
    fn test_complete_row_wins() {
        let grid = sample_grid(11);
        let row: Vec<u8> = grid.row_numbers(1).collect();

        let mut detector = WinDetector::new(1);
        assert_eq!(detector.evaluate(&row, std::slice::from_ref(&grid)), vec![0]);
        assert!(detector.is_won(0));
        assert_eq!(detector.winners(), vec![0]);
    }

    #[test]
    fn test_four_of_five_is_no_win() {
        let grid = sample_grid(12);
        let row: Vec<u8> = grid.row_numbers(0).collect();

        let mut detector = WinDetector::new(1);
        let partial = &row[..4];
        assert!(detector.evaluate(partial, std::slice::from_ref(&grid)).is_empty());
        assert!(!detector.is_won(0));
    }

    #[test]
    fn test_winner_is_never_reported_twice() {
        let grid = sample_grid(13);
        let row: Vec<u8> = grid.row_numbers(2).collect();

        let mut detector = WinDetector::new(1);
        assert_eq!(detector.evaluate(&row, std::slice::from_ref(&grid)), vec![0]);
        assert!(detector.evaluate(&row, std::slice::from_ref(&grid)).is_empty());

        // Still latched even when more numbers come in.
        let mut more = row.clone();
        more.extend(grid.row_numbers(0));
        assert!(detector.evaluate(&more, std::slice::from_ref(&grid)).is_empty());
        assert_eq!(detector.winners(), vec![0]);
    }

    #[test]
    fn test_simultaneous_winners_are_all_reported() {
        let first = sample_grid(14);
        let second = sample_grid(15);
        let grids = vec![first.clone(), second.clone()];

        let mut drawn: Vec<u8> = first.row_numbers(0).collect();
        drawn.extend(second.row_numbers(2));

        let mut detector = WinDetector::new(2);
        assert_eq!(detector.evaluate(&drawn, &grids), vec![0, 1]);
    }
}
