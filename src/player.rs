// Per-player piece roster, king safety and end-of-game detection

use crate::board::{Board, Color, PieceId, Square};
use crate::reach::{ReachPolicy, ReachabilityIndex};
use tracing::trace;

/// Result of an end-of-game evaluation for the side to move
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum EndCondition {
    Ongoing,
    Checkmate,
    Stalemate,
}

/// One side of the game
///
/// The roster mirrors the player's pieces that are on the board. It is
/// kept sorted by id so that a move followed by its undo restores it
/// exactly.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Player {
    pub color: Color,
    name: String,
    pieces: Vec<PieceId>,
    king: Option<PieceId>,
    in_check: bool,
}

impl Player {
    /// Collect every piece of `color` on the board and remember the King
    pub fn new(color: Color, name: impl Into<String>, board: &Board) -> Self {
        let mut pieces = board.get_pieces(color);
        pieces.sort();
        Player {
            color,
            name: name.into(),
            pieces,
            king: board.find_king(color),
            in_check: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn pieces(&self) -> &[PieceId] {
        &self.pieces
    }

    pub fn king(&self) -> Option<PieceId> {
        self.king
    }

    pub fn is_in_check(&self) -> bool {
        self.in_check
    }

    pub fn set_in_check(&mut self, in_check: bool) {
        self.in_check = in_check;
    }

    /// Add a piece to the roster (no-op if already present)
    pub fn add_piece(&mut self, id: PieceId) {
        if let Err(i) = self.pieces.binary_search(&id) {
            self.pieces.insert(i, id);
        }
    }

    /// Remove a piece from the roster, returning whether it was there
    pub fn remove_piece(&mut self, id: PieceId) -> bool {
        match self.pieces.binary_search(&id) {
            Ok(i) => {
                self.pieces.remove(i);
                true
            }
            Err(_) => false,
        }
    }

    pub fn king_square(&self, board: &Board) -> Option<Square> {
        self.king.and_then(|king| board.location(king))
    }

    /// Can any opponent piece capture this player's King right now?
    /// A King that is no longer on the board counts as attacked.
    pub fn king_attacked(&self, board: &Board) -> bool {
        king_exposed(board, self.king, self.color)
    }

    /// Would this move leave the player's own King capturable?
    ///
    /// The board is identical before and after the call.
    pub fn moves_leaving_king_in_check(&self, board: &mut Board, piece: PieceId, target: Square) -> bool {
        let (king, color) = (self.king, self.color);
        board.simulate(piece, target, |after| king_exposed(after, king, color))
    }

    /// Every move this player can make without leaving the King in check
    pub fn legal_moves(&self, board: &mut Board) -> ReachabilityIndex {
        let mut moves = board.possible_moves(&self.pieces);
        let candidates: Vec<(PieceId, Square)> = moves.moves().collect();
        for (piece, target) in candidates {
            if self.moves_leaving_king_in_check(board, piece, target) {
                trace!(piece = piece.0, ?target, "move leaves king in check");
                moves.remove_attacker(target, piece);
            }
        }
        moves
    }

    /// Legal targets of a single piece, for move highlighting
    pub fn legal_moves_for(&self, board: &mut Board, piece: PieceId) -> Vec<Square> {
        board
            .piece_moves(piece, false)
            .into_iter()
            .filter(|&target| !self.moves_leaving_king_in_check(board, piece, target))
            .collect()
    }

    pub fn in_checkmate(&self, legal_moves: &ReachabilityIndex) -> bool {
        legal_moves.is_empty() && self.in_check
    }

    pub fn in_stalemate(&self, legal_moves: &ReachabilityIndex) -> bool {
        legal_moves.is_empty() && !self.in_check
    }

    /// Evaluate checkmate and stalemate from a single legal-move computation
    pub fn check_end_conditions(&self, board: &mut Board) -> EndCondition {
        let legal = self.legal_moves(board);
        if self.in_checkmate(&legal) {
            EndCondition::Checkmate
        } else if self.in_stalemate(&legal) {
            EndCondition::Stalemate
        } else {
            EndCondition::Ongoing
        }
    }
}

fn king_exposed(board: &Board, king: Option<PieceId>, color: Color) -> bool {
    match king.and_then(|king| board.location(king)) {
        Some(square) => {
            let opponents = board.get_opponent_pieces(color);
            !board
                .attackers_of(square, &opponents, ReachPolicy::CAPTURES)
                .is_empty()
        }
        None => true,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{Piece, PieceKind};

    fn piece(kind: PieceKind, color: Color) -> Piece {
        Piece::new(kind, color)
    }

    #[test]
    fn test_roster_and_king_from_board() {
        let board = Board::setup_variant();
        let player = Player::new(Color::Dark, "Dark", &board);

        assert_eq!(player.pieces().len(), 16);
        let king = player.king().expect("Dark has a king");
        assert_eq!(board.location(king), Some((0, 4)));
        assert_eq!(player.king_square(&board), Some((0, 4)));
        assert!(!player.king_attacked(&board));
    }

    #[test]
    fn test_opening_has_twenty_legal_moves() {
        let mut board = Board::setup_standard();
        let player = Player::new(Color::Light, "Light", &board);
        let legal = player.legal_moves(&mut board);
        assert_eq!(legal.move_count(), 20);
        assert_eq!(player.check_end_conditions(&mut board), EndCondition::Ongoing);
    }

    #[test]
    fn test_simulation_round_trip() {
        let mut board = Board::setup_variant();
        let queen = board.occupant((7, 3)).expect("queen");
        board.move_to(queen, (4, 3));
        let boo = board.occupant((6, 6)).expect("light phantom");
        board.move_to(boo, (2, 2));
        let player = Player::new(Color::Light, "Light", &board);

        let candidates: Vec<_> = board.possible_moves(player.pieces()).moves().collect();
        assert!(!candidates.is_empty());
        for (piece, target) in candidates {
            let before = board.clone();
            player.moves_leaving_king_in_check(&mut board, piece, target);
            assert_eq!(board, before, "Simulating {:?} -> {:?} must not change the board", piece, target);
        }
        board.assert_consistent();
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        let mut board = Board::new(8, 8);
        board.add_piece(piece(PieceKind::King, Color::Light), (7, 4));
        let rook = board.add_piece(piece(PieceKind::Rook, Color::Light), (5, 4));
        board.add_piece(piece(PieceKind::Rook, Color::Dark), (0, 4));
        board.add_piece(piece(PieceKind::King, Color::Dark), (0, 0));
        let player = Player::new(Color::Light, "Light", &board);

        assert!(player.moves_leaving_king_in_check(&mut board, rook, (5, 0)));
        assert!(!player.moves_leaving_king_in_check(&mut board, rook, (3, 4)), "Sliding along the pin is fine");
        assert!(!player.moves_leaving_king_in_check(&mut board, rook, (0, 4)), "Capturing the pinner is fine");

        let targets = player.legal_moves_for(&mut board, rook);
        assert!(targets.iter().all(|sq| sq.1 == 4), "Pinned rook stays on the file: {:?}", targets);
    }

    #[test]
    fn test_single_legal_response_is_not_checkmate() {
        // Light king boxed in the corner, checked by a queen that the rook can take
        let mut board = Board::new(8, 8);
        let king = board.add_piece(piece(PieceKind::King, Color::Light), (7, 7));
        board.add_piece(Piece::pawn(Color::Light), (6, 6));
        board.add_piece(Piece::pawn(Color::Light), (6, 7));
        let rook = board.add_piece(piece(PieceKind::Rook, Color::Light), (0, 0));
        board.add_piece(piece(PieceKind::Queen, Color::Dark), (7, 0));
        board.add_piece(piece(PieceKind::King, Color::Dark), (2, 3));

        let mut player = Player::new(Color::Light, "Light", &board);
        player.set_in_check(player.king_attacked(&board));
        assert!(player.is_in_check());

        let legal = player.legal_moves(&mut board);
        assert_eq!(legal.move_count(), 1, "Only Rxa1 answers the check: {:?}", legal);
        assert_eq!(legal.attackers((7, 0)), &[rook]);
        assert!(!player.in_checkmate(&legal));
        assert_eq!(board.location(king), Some((7, 7)));
        assert_eq!(player.check_end_conditions(&mut board), EndCondition::Ongoing);
    }

    #[test]
    fn test_back_rank_checkmate() {
        let mut board = Board::new(8, 8);
        board.add_piece(piece(PieceKind::King, Color::Light), (7, 7));
        board.add_piece(Piece::pawn(Color::Light), (6, 6));
        board.add_piece(Piece::pawn(Color::Light), (6, 7));
        board.add_piece(piece(PieceKind::Queen, Color::Dark), (7, 0));
        board.add_piece(piece(PieceKind::King, Color::Dark), (2, 3));

        let mut player = Player::new(Color::Light, "Light", &board);
        player.set_in_check(player.king_attacked(&board));
        let legal = player.legal_moves(&mut board);

        assert!(legal.is_empty());
        assert!(player.in_checkmate(&legal));
        assert!(!player.in_stalemate(&legal));
        assert_eq!(player.check_end_conditions(&mut board), EndCondition::Checkmate);
    }

    #[test]
    fn test_stalemate() {
        let mut board = Board::new(8, 8);
        board.add_piece(piece(PieceKind::King, Color::Dark), (0, 0));
        board.add_piece(piece(PieceKind::Queen, Color::Light), (2, 1));
        board.add_piece(piece(PieceKind::King, Color::Light), (7, 7));

        let player = Player::new(Color::Dark, "Dark", &board);
        assert!(!player.king_attacked(&board));
        let legal = player.legal_moves(&mut board);
        assert!(player.in_stalemate(&legal));
        assert_eq!(player.check_end_conditions(&mut board), EndCondition::Stalemate);
    }

    #[test]
    fn test_missing_king_counts_as_checkmate() {
        let mut board = Board::new(8, 8);
        let king = board.add_piece(piece(PieceKind::King, Color::Dark), (0, 0));
        board.add_piece(piece(PieceKind::Rook, Color::Dark), (0, 5));
        board.add_piece(piece(PieceKind::King, Color::Light), (7, 7));
        let mut player = Player::new(Color::Dark, "Dark", &board);

        board.remove_piece(king);
        assert_eq!(player.king_square(&board), None);
        player.set_in_check(player.king_attacked(&board));
        assert!(player.is_in_check());
        assert_eq!(player.check_end_conditions(&mut board), EndCondition::Checkmate);
    }

    #[test]
    fn test_roster_stays_sorted() {
        let board = Board::setup_standard();
        let mut player = Player::new(Color::Light, "Light", &board);
        let first = player.pieces()[0];
        let len = player.pieces().len();

        assert!(player.remove_piece(first));
        assert!(!player.remove_piece(first));
        player.add_piece(first);
        player.add_piece(first);
        assert_eq!(player.pieces()[0], first);
        assert_eq!(player.pieces().len(), len);
    }
}
