/// Knight move shape
/// L-shaped jump (2+1), never blocked by pieces in between
use crate::board::Square;
use crate::pieces::distance;

pub struct KnightMoves;

impl KnightMoves {
    pub fn is_valid(from: Square, to: Square) -> bool {
        matches!(distance(from, to), (1, 2) | (2, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knight_jumps_from_center() {
        // Knight moves from d4 (row 4, col 3): c2, e2, b3, f3, b5, f5, c6, e6
        let targets = [(6, 2), (6, 4), (5, 1), (5, 5), (3, 1), (3, 5), (2, 2), (2, 4)];
        for to in targets {
            assert!(KnightMoves::is_valid((4, 3), to), "Knight should reach {:?}", to);
        }
    }

    #[test]
    fn test_knight_rejects_other_shapes() {
        assert!(!KnightMoves::is_valid((4, 3), (3, 3)));
        assert!(!KnightMoves::is_valid((4, 3), (2, 1)), "(2,2) is not a knight jump");
        assert!(!KnightMoves::is_valid((4, 3), (1, 4)), "(3,1) is a camel, not a knight");
    }
}
