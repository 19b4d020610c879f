use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

use crate::error::PuzzleError;

/// Smallest and largest supported board edge. A 5x5 board is the largest
/// whose packed key fits in a `u128`.
pub const MIN_SIZE: usize = 2;
pub const MAX_SIZE: usize = 5;

/// Direction the blank slides in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Generation order for successors.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Row and column delta applied to the blank.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        };
        write!(f, "{}", s)
    }
}

/// Packed value identity of a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateKey(u128);

pub fn index_to_coords(index: usize, size: usize) -> (usize, usize) {
    (index / size, index % size)
}

pub fn coords_to_index(row: usize, col: usize, size: usize) -> usize {
    row * size + col
}

/// One board configuration, stored row-major with `0` as the blank.
///
/// Values are immutable once built: every move produces a fresh `Puzzle`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Puzzle {
    size: usize,
    tiles: Vec<u32>,
}

impl Puzzle {
    /// The solved layout `1..N²-1` followed by the blank.
    pub fn new(size: usize) -> Result<Self, PuzzleError> {
        check_size(size)?;
        let cells = size * size;
        let mut tiles: Vec<u32> = (1..cells as u32).collect();
        tiles.push(0); // The empty space is represented by 0

        Ok(Self { size, tiles })
    }

    /// Builds a board from a row-major tile list, checking it is a square
    /// permutation of `0..N²`.
    pub fn from_tiles(tiles: Vec<u32>) -> Result<Self, PuzzleError> {
        let len = tiles.len();
        let size = (len as f64).sqrt().round() as usize;
        if size * size != len {
            return Err(PuzzleError::DimensionMismatch { len });
        }
        check_size(size)?;

        let mut seen = vec![false; len];
        for &value in &tiles {
            let slot = seen.get_mut(value as usize).ok_or_else(|| {
                PuzzleError::invariant(format!("tile {} is out of range 0..{}", value, len))
            })?;
            if *slot {
                return Err(PuzzleError::invariant(format!("tile {} appears twice", value)));
            }
            *slot = true;
        }

        Ok(Self { size, tiles })
    }

    /// A random board from the same reachability class as the solved one.
    pub fn shuffled<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self, PuzzleError> {
        let mut puzzle = Self::new(size)?;

        loop {
            puzzle.tiles.shuffle(rng);
            if puzzle.is_solvable()? {
                return Ok(puzzle);
            }
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    pub fn locate_blank(&self) -> Result<usize, PuzzleError> {
        self.tiles
            .iter()
            .position(|&value| value == 0)
            .ok_or_else(|| PuzzleError::invariant("board has no blank"))
    }

    /// A copy with the values at `a` and `b` exchanged.
    pub fn apply_swap(&self, a: usize, b: usize) -> Self {
        let mut tiles = self.tiles.clone();
        tiles.swap(a, b);
        Self {
            size: self.size,
            tiles,
        }
    }

    /// Slides the blank one cell, or `None` if that would leave the board.
    pub fn try_move(&self, direction: Direction) -> Result<Option<Self>, PuzzleError> {
        let blank = self.locate_blank()?;
        let (row, col) = index_to_coords(blank, self.size);
        let (dr, dc) = direction.as_offset();

        let new_row = row as isize + dr;
        let new_col = col as isize + dc;
        let bound = self.size as isize;
        if new_row < 0 || new_row >= bound || new_col < 0 || new_col >= bound {
            return Ok(None);
        }

        let target = coords_to_index(new_row as usize, new_col as usize, self.size);
        Ok(Some(self.apply_swap(blank, target)))
    }

    /// Whether this board is reachable from the solved layout.
    pub fn is_solvable(&self) -> Result<bool, PuzzleError> {
        let inversions = count_inversions(&self.tiles);

        if self.size % 2 == 1 {
            // Odd-sized puzzle: solvable if inversions count is even
            Ok(inversions % 2 == 0)
        } else {
            // Even-sized puzzle: solvable if (inversions + empty row index) is odd
            let (empty_row, _) = index_to_coords(self.locate_blank()?, self.size);
            Ok((inversions + empty_row) % 2 == 1)
        }
    }

    pub fn key(&self) -> StateKey {
        let bits = bits_per_cell(self.tiles.len());
        let packed = self
            .tiles
            .iter()
            .fold(0u128, |acc, &value| (acc << bits) | value as u128);
        StateKey(packed)
    }

    /// Graphviz-safe identifier spelling out every value, e.g. `S_1_2_3_0`.
    pub fn node_id(&self) -> String {
        let mut id = String::with_capacity(2 + self.tiles.len() * 3);
        id.push('S');
        for value in &self.tiles {
            id.push('_');
            id.push_str(&value.to_string());
        }
        id
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.tiles.chunks(self.size)
    }
}

impl Default for Puzzle {
    fn default() -> Self {
        Self {
            size: 3,
            tiles: vec![1, 2, 3, 4, 5, 6, 7, 8, 0],
        }
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &val in row {
                write!(f, "{:2} ", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn check_size(size: usize) -> Result<(), PuzzleError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(PuzzleError::UnsupportedSize { size })
    }
}

fn bits_per_cell(cells: usize) -> u32 {
    usize::BITS - (cells - 1).leading_zeros()
}

fn count_inversions(tiles: &[u32]) -> usize {
    tiles
        .iter()
        .enumerate()
        .filter(|&(_, &val)| val != 0)
        .map(|(i, &val)| {
            tiles[i + 1..]
                .iter()
                .filter(|&&next| next != 0 && next < val)
                .count()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn is_permutation(puzzle: &Puzzle) -> bool {
        let mut sorted = puzzle.tiles().to_vec();
        sorted.sort_unstable();
        sorted.iter().enumerate().all(|(i, &v)| v as usize == i)
    }

    #[test]
    fn default_is_solved_eight_puzzle() {
        let puzzle = Puzzle::default();
        assert_eq!(puzzle.size(), 3);
        assert_eq!(puzzle.tiles(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(Puzzle::new(3).unwrap(), puzzle);
    }

    #[test]
    fn new_builds_generalized_start() {
        let puzzle = Puzzle::new(4).unwrap();
        assert_eq!(puzzle.tiles()[..15], (1..16).collect::<Vec<u32>>()[..]);
        assert_eq!(puzzle.tiles()[15], 0);
        assert_eq!(puzzle.locate_blank().unwrap(), 15);
    }

    #[test]
    fn new_rejects_out_of_range_sizes() {
        assert_eq!(Puzzle::new(1), Err(PuzzleError::UnsupportedSize { size: 1 }));
        assert_eq!(Puzzle::new(6), Err(PuzzleError::UnsupportedSize { size: 6 }));
    }

    #[test]
    fn from_tiles_rejects_non_square_length() {
        assert_eq!(
            Puzzle::from_tiles(vec![1, 2, 0]),
            Err(PuzzleError::DimensionMismatch { len: 3 })
        );
    }

    #[test]
    fn from_tiles_rejects_duplicates_and_out_of_range() {
        assert!(matches!(
            Puzzle::from_tiles(vec![1, 1, 2, 0]),
            Err(PuzzleError::InvariantViolation { .. })
        ));
        assert!(matches!(
            Puzzle::from_tiles(vec![1, 2, 4, 0]),
            Err(PuzzleError::InvariantViolation { .. })
        ));
        // No blank at all also breaks the permutation.
        assert!(matches!(
            Puzzle::from_tiles(vec![1, 2, 3, 4]),
            Err(PuzzleError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn coords_conversions() {
        assert_eq!(index_to_coords(0, 3), (0, 0));
        assert_eq!(index_to_coords(5, 3), (1, 2));
        assert_eq!(index_to_coords(8, 3), (2, 2));
        for index in 0..16 {
            let (row, col) = index_to_coords(index, 4);
            assert_eq!(coords_to_index(row, col, 4), index);
        }
    }

    #[test]
    fn apply_swap_leaves_parent_untouched() {
        let parent = Puzzle::default();
        let child = parent.apply_swap(8, 5);
        assert_eq!(parent.tiles(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(child.tiles(), &[1, 2, 3, 4, 5, 0, 7, 8, 6]);
    }

    #[test]
    fn try_move_stays_on_board() {
        let puzzle = Puzzle::default();
        assert!(puzzle.try_move(Direction::Right).unwrap().is_none());
        assert!(puzzle.try_move(Direction::Down).unwrap().is_none());
        assert_eq!(
            puzzle.try_move(Direction::Left).unwrap().unwrap().tiles(),
            &[1, 2, 3, 4, 5, 6, 7, 0, 8]
        );
    }

    #[test]
    fn solvability_parity() {
        assert!(Puzzle::default().is_solvable().unwrap());
        assert!(Puzzle::new(4).unwrap().is_solvable().unwrap());
        let swapped = Puzzle::from_tiles(vec![2, 1, 3, 4, 5, 6, 7, 8, 0]).unwrap();
        assert!(!swapped.is_solvable().unwrap());
        let swapped = Puzzle::from_tiles(vec![2, 1, 3, 0]).unwrap();
        assert!(!swapped.is_solvable().unwrap());
    }

    #[test]
    fn shuffled_boards_are_solvable_permutations() {
        let mut rng = StdRng::seed_from_u64(7);
        for size in MIN_SIZE..=4 {
            let puzzle = Puzzle::shuffled(size, &mut rng).unwrap();
            assert!(is_permutation(&puzzle));
            assert!(puzzle.is_solvable().unwrap());
        }
    }

    #[test]
    fn keys_follow_value_identity() {
        let a = Puzzle::default();
        let b = Puzzle::from_tiles(vec![1, 2, 3, 4, 5, 6, 7, 8, 0]).unwrap();
        let c = a.apply_swap(8, 7);
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), c.key());

        // The largest board still packs losslessly.
        let big = Puzzle::new(5).unwrap();
        assert_ne!(big.key(), big.apply_swap(23, 24).key());
        assert_ne!(big.key(), big.apply_swap(0, 1).key());
    }

    #[test]
    fn node_id_and_display() {
        let puzzle = Puzzle::from_tiles(vec![3, 1, 0, 2]).unwrap();
        assert_eq!(puzzle.node_id(), "S_3_1_0_2");
        assert_eq!(puzzle.to_string(), " 3  1 \n 0  2 \n");
    }

    fn walk(size: usize, picks: &[usize]) -> Vec<(Puzzle, Direction)> {
        let mut current = Puzzle::new(size).unwrap();
        let mut steps = Vec::new();
        for &pick in picks {
            let legal: Vec<(Direction, Puzzle)> = Direction::ALL
                .iter()
                .filter_map(|&d| current.try_move(d).unwrap().map(|next| (d, next)))
                .collect();
            let (direction, next) = legal[pick % legal.len()].clone();
            steps.push((current, direction));
            current = next;
        }
        steps
    }

    proptest! {
        #[test]
        fn random_walks_keep_the_permutation_and_class(
            size in MIN_SIZE..=4usize,
            picks in proptest::collection::vec(0usize..4, 0..64),
        ) {
            for (puzzle, _) in walk(size, &picks) {
                prop_assert!(is_permutation(&puzzle));
                prop_assert!(puzzle.is_solvable().unwrap());
            }
        }

        #[test]
        fn opposite_move_undoes_a_move(
            size in MIN_SIZE..=4usize,
            picks in proptest::collection::vec(0usize..4, 1..32),
        ) {
            for (puzzle, direction) in walk(size, &picks) {
                let moved = puzzle.try_move(direction).unwrap().unwrap();
                let back = moved.try_move(direction.opposite()).unwrap().unwrap();
                prop_assert_eq!(back, puzzle);
            }
        }
    }
}
