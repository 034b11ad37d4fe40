/// Rook move shape
/// Moves horizontally and vertically (orthogonally)
use crate::board::Square;
use crate::pieces::distance;

pub struct RookMoves;

impl RookMoves {
    /// Exactly one of the row or column changes
    pub fn is_valid(from: Square, to: Square) -> bool {
        let (dr, dc) = distance(from, to);
        (dr == 0) != (dc == 0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rook_orthogonal_moves() {
        assert!(RookMoves::is_valid((4, 3), (0, 3)), "Rook should slide up the file");
        assert!(RookMoves::is_valid((4, 3), (7, 3)), "Rook should slide down the file");
        assert!(RookMoves::is_valid((4, 3), (4, 0)), "Rook should slide along the rank");
        assert!(RookMoves::is_valid((4, 3), (4, 7)));
    }

    #[test]
    fn test_rook_rejects_diagonals_and_jumps() {
        assert!(!RookMoves::is_valid((4, 3), (3, 4)));
        assert!(!RookMoves::is_valid((4, 3), (2, 4)));
        assert!(!RookMoves::is_valid((4, 3), (4, 3)), "Both deltas zero is not a move");
    }

    #[test]
    fn test_rook_move_count_empty_board() {
        let count = (0..8u8)
            .flat_map(|r| (0..8u8).map(move |c| (r, c)))
            .filter(|&to| RookMoves::is_valid((4, 3), to))
            .count();
        assert_eq!(count, 14, "Rook has 7 + 7 squares on an empty board");
    }
}
