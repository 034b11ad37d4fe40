/// Pawn move shape
/// Straight ahead onto empty squares, diagonally ahead onto occupied ones.
/// A pawn on its home row may advance two squares.
use crate::board::{Board, Square};
use crate::pieces::Direction;

pub struct PawnMoves;

impl PawnMoves {
    /// The diagonal shape only needs the target to be occupied: the board
    /// rejects friendly targets, and ignore-color queries rely on pawns
    /// covering their own pieces.
    pub fn is_valid(board: &Board, from: Square, to: Square, direction: Direction) -> bool {
        let forward = direction.delta();
        let dr = to.0 as i16 - from.0 as i16;
        let dc = from.1.abs_diff(to.1);
        let occupied = board.occupant(to).is_some();

        if dr == forward {
            if occupied {
                dc == 1
            } else {
                dc == 0
            }
        } else if dr == 2 * forward {
            !occupied && dc == 0 && from.0 == Self::home_row(board.rows(), direction)
        } else {
            false
        }
    }

    /// Row a pawn starts on and may double-step from
    pub fn home_row(rows: u8, direction: Direction) -> u8 {
        match direction {
            Direction::Up => rows - 2,
            Direction::Down => 1,
        }
    }

    /// Far rank where a pawn promotes
    pub fn promotion_row(rows: u8, direction: Direction) -> u8 {
        match direction {
            Direction::Up => 0,
            Direction::Down => rows - 1,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;
    use crate::pieces::{Piece, PieceKind};

    #[test]
    fn test_pawn_single_and_double_step() {
        let board = Board::new(8, 8);
        assert!(PawnMoves::is_valid(&board, (6, 4), (5, 4), Direction::Up));
        assert!(PawnMoves::is_valid(&board, (6, 4), (4, 4), Direction::Up), "Double step from home row");
        assert!(!PawnMoves::is_valid(&board, (5, 4), (3, 4), Direction::Up), "No double step off the home row");
        assert!(!PawnMoves::is_valid(&board, (6, 4), (7, 4), Direction::Up), "Pawns never move backwards");
    }

    #[test]
    fn test_dark_pawn_moves_down() {
        let board = Board::new(8, 8);
        assert!(PawnMoves::is_valid(&board, (1, 2), (2, 2), Direction::Down));
        assert!(PawnMoves::is_valid(&board, (1, 2), (3, 2), Direction::Down));
        assert!(!PawnMoves::is_valid(&board, (1, 2), (0, 2), Direction::Down));
    }

    #[test]
    fn test_pawn_blocked_straight_ahead() {
        let mut board = Board::new(8, 8);
        board.add_piece(Piece::new(PieceKind::Knight, Color::Dark), (5, 4));

        assert!(!PawnMoves::is_valid(&board, (6, 4), (5, 4), Direction::Up), "Cannot step onto an occupied square");
        // The jumped-over square is the board's path check, not the shape's
        assert!(PawnMoves::is_valid(&board, (6, 4), (4, 4), Direction::Up));
    }

    #[test]
    fn test_pawn_diagonal_needs_occupant() {
        let mut board = Board::new(8, 8);
        assert!(!PawnMoves::is_valid(&board, (6, 4), (5, 5), Direction::Up), "Diagonal onto empty square");

        board.add_piece(Piece::new(PieceKind::Knight, Color::Dark), (5, 5));
        assert!(PawnMoves::is_valid(&board, (6, 4), (5, 5), Direction::Up), "Diagonal capture");
        assert!(!PawnMoves::is_valid(&board, (6, 4), (4, 6), Direction::Up), "Capture is a single step");
    }

    #[test]
    fn test_home_and_promotion_rows_scale_with_board() {
        assert_eq!(PawnMoves::home_row(10, Direction::Up), 8);
        assert_eq!(PawnMoves::home_row(10, Direction::Down), 1);
        assert_eq!(PawnMoves::promotion_row(10, Direction::Up), 0);
        assert_eq!(PawnMoves::promotion_row(10, Direction::Down), 9);
    }
}
