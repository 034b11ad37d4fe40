/// Queen move shape
/// Rook shape or Bishop shape
use crate::board::Square;
use crate::pieces::bishop::BishopMoves;
use crate::pieces::rook::RookMoves;

pub struct QueenMoves;

impl QueenMoves {
    pub fn is_valid(from: Square, to: Square) -> bool {
        RookMoves::is_valid(from, to) || BishopMoves::is_valid(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queen_combines_rook_and_bishop() {
        assert!(QueenMoves::is_valid((4, 3), (0, 3)), "Queen move to d8 should be possible");
        assert!(QueenMoves::is_valid((4, 3), (4, 7)), "Queen move to h4 should be possible");
        assert!(QueenMoves::is_valid((4, 3), (0, 7)), "Queen move along the diagonal");
    }

    #[test]
    fn test_queen_move_count_empty_board() {
        let count = (0..8u8)
            .flat_map(|r| (0..8u8).map(move |c| (r, c)))
            .filter(|&to| QueenMoves::is_valid((4, 3), to))
            .count();
        assert_eq!(count, 27, "Queen on d4 sees 14 orthogonal + 13 diagonal squares");
    }

    #[test]
    fn test_queen_rejects_knight_shape() {
        assert!(!QueenMoves::is_valid((4, 3), (6, 4)));
    }
}
