/// Bishop move shape
/// Moves along diagonals
use crate::board::Square;
use crate::pieces::distance;

pub struct BishopMoves;

impl BishopMoves {
    pub fn is_valid(from: Square, to: Square) -> bool {
        let (dr, dc) = distance(from, to);
        dr == dc && dr != 0
    }
}
