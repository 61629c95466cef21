use crate::error::GameError;
use crate::random_source::RandomSource;
use crate::ticket::{COLUMN_COUNT, NUMBER_MAX, Ticket, column_of};

/// Grid rows per ticket.
pub const ROW_COUNT: usize = 3;
/// Every row ends up with exactly five occupied cells.
pub const ROW_FILL: usize = 5;

type Cells = [[Option<u8>; COLUMN_COUNT]; ROW_COUNT];

/// Value range a filler for `column` may be synthesized from. Column 9 only
/// spans 91-99, so its band is one short.
pub fn column_band(column: usize) -> (u8, u8) {
    let low = (column * 10 + 1) as u8;
    let high = ((column * 10 + 10).min(NUMBER_MAX as usize)) as u8;
    (low, high)
}

/// A ticket laid out as 3 rows by 10 columns. Each cell either holds a
/// number belonging to that column band or is empty. Immutable once packed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Cells,
}

impl Grid {
    pub fn cell(&self, row: usize, column: usize) -> Option<u8> {
        self.cells[row][column]
    }

    /// Occupied numbers of one row, left to right.
    pub fn row_numbers(&self, row: usize) -> impl Iterator<Item = u8> + '_ {
        self.cells[row].iter().flatten().copied()
    }

    /// Every occupied cell as (row, column, number).
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, columns)| {
            columns
                .iter()
                .enumerate()
                .filter_map(move |(column, cell)| cell.map(|n| (row, column, n)))
        })
    }

    #[cfg(test)]
    pub fn from_cells(cells: Cells) -> Self {
        Self { cells }
    }
}

/// Pack a ticket into a grid.
///
/// The 15 ticket numbers are placed in ascending order: each goes into its
/// column band, on the row with the fewest numbers so far (lowest row index
/// on ties), advancing cyclically past occupied cells. A fill pass then tops
/// every row up to five occupied cells with synthesized numbers. With a full
/// 15-number ticket the placement already balances out at five per row, so
/// the fill pass is a guard for the row invariant rather than the usual path.
pub fn pack_grid(
    ticket: &Ticket,
    rng: &mut dyn RandomSource,
    max_attempts: u32,
) -> Result<Grid, GameError> {
    let mut cells: Cells = [[None; COLUMN_COUNT]; ROW_COUNT];
    let mut row_counts = [0usize; ROW_COUNT];

    for &number in ticket.numbers() {
        let column = column_of(number);

        let mut row = 0;
        for candidate in 1..ROW_COUNT {
            if row_counts[candidate] < row_counts[row] {
                row = candidate;
            }
        }
        while cells[row][column].is_some() {
            row = (row + 1) % ROW_COUNT;
        }

        cells[row][column] = Some(number);
        row_counts[row] += 1;
    }

    fill_rows(&mut cells, &mut row_counts, ticket, rng, max_attempts)?;
    Ok(Grid { cells })
}

/// Top up every row below [`ROW_FILL`] with filler numbers: pick one of the
/// row's empty columns uniformly, synthesize a candidate from that column's
/// band, and accept it unless it appears on the original ticket or elsewhere
/// in the same row. Fillers on different rows may collide.
fn fill_rows(
    cells: &mut Cells,
    row_counts: &mut [usize; ROW_COUNT],
    ticket: &Ticket,
    rng: &mut dyn RandomSource,
    max_attempts: u32,
) -> Result<(), GameError> {
    for row in 0..ROW_COUNT {
        let mut attempts = 0u32;
        while row_counts[row] < ROW_FILL {
            if attempts >= max_attempts {
                return Err(GameError::GenerationExhausted {
                    context: "synthesizing filler numbers",
                    attempts: max_attempts,
                });
            }
            attempts += 1;

            let empty: Vec<usize> = (0..COLUMN_COUNT)
                .filter(|&column| cells[row][column].is_none())
                .collect();
            let column = empty[rng.next_in(0, (empty.len() - 1) as u8) as usize];
            let (low, high) = column_band(column);
            let candidate = rng.next_in(low, high);

            let in_row = cells[row].iter().flatten().any(|&n| n == candidate);
            if !ticket.contains(candidate) && !in_row {
                cells[row][column] = Some(candidate);
                row_counts[row] += 1;
            }
        }
    }
    Ok(())
}
