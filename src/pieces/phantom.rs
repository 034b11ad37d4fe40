/// Phantom ("Boo") move shape
/// Steps like a King, plus every shape of the pieces it has absorbed.
/// Each absorbed piece is evaluated as if it stood on the Phantom's square.
use crate::board::{Board, PieceId, Square};
use crate::pieces::king::KingMoves;
use crate::pieces::shape_allows;

pub struct PhantomMoves;

impl PhantomMoves {
    pub fn is_valid(board: &Board, absorbed: &[PieceId], from: Square, to: Square) -> bool {
        if KingMoves::is_valid(from, to) {
            return true;
        }
        absorbed.iter().any(|&id| {
            board
                .get(id)
                .is_some_and(|piece| shape_allows(board, piece.kind(), from, to, false))
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
