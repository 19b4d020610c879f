//! Legal single-step successors of a configuration.

use std::rc::Rc;

use crate::error::PuzzleError;
use crate::puzzle::{Direction, Puzzle};

/// A blank slide from `parent` producing `state`.
#[derive(Debug, Clone)]
pub struct Move {
    pub direction: Direction,
    pub state: Rc<Puzzle>,
    pub parent: Rc<Puzzle>,
}

/// Every legal move out of `parent`, in `Direction::ALL` order.
pub fn legal_moves(parent: &Rc<Puzzle>) -> Result<Vec<Move>, PuzzleError> {
    let mut moves = Vec::with_capacity(Direction::ALL.len());

    for direction in Direction::ALL {
        if let Some(state) = parent.try_move(direction)? {
            moves.push(Move {
                direction,
                state: Rc::new(state),
                parent: Rc::clone(parent),
            });
        }
    }

    Ok(moves)
}
