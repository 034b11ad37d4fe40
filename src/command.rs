// Executable, undoable moves and the single-slot undo history

use crate::board::{Board, Color, MoveEffect, PieceId, Square};
use crate::pieces::{Piece, Promotion};
use crate::player::Player;
use tracing::debug;

/// A move that remembers enough to reverse itself
///
/// `execute` applies the move to the board and both rosters; `undo`
/// puts every piece, roster entry, check flag and the halfmove clock
/// back the way they were.
#[derive(Clone, Debug)]
pub struct MoveCommand {
    mover: Color,
    piece: PieceId,
    target: Square,
    promotion: Promotion,
    /// Mover's state before execution, location included
    snapshot: Option<Piece>,
    captured: Vec<(PieceId, Square)>,
    promoted: Option<PieceId>,
    check_flags: [bool; 2],
    halfmove_clock: u32,
}

impl MoveCommand {
    pub fn new(mover: Color, piece: PieceId, target: Square, promotion: Promotion) -> Self {
        MoveCommand {
            mover,
            piece,
            target,
            promotion,
            snapshot: None,
            captured: Vec::new(),
            promoted: None,
            check_flags: [false; 2],
            halfmove_clock: 0,
        }
    }

    pub fn mover(&self) -> Color {
        self.mover
    }

    pub fn piece(&self) -> PieceId {
        self.piece
    }

    pub fn target(&self) -> Square {
        self.target
    }

    pub fn captured(&self) -> &[(PieceId, Square)] {
        &self.captured
    }

    /// The piece a pawn was promoted to, if this move promoted
    pub fn promoted(&self) -> Option<PieceId> {
        self.promoted
    }

    /// Apply the move. Legality must already be established.
    pub fn execute(&mut self, board: &mut Board, players: &mut [Player; 2], halfmove_clock: &mut u32) -> MoveEffect {
        let own = self.mover.index();
        let other = self.mover.opposite().index();

        let before = board.piece(self.piece).clone();
        let was_pawn = before.kind().is_pawn();
        let promotes = board.reaches_promotion_row(self.piece, self.target);
        self.snapshot = Some(before);
        self.check_flags = [players[0].is_in_check(), players[1].is_in_check()];
        self.halfmove_clock = *halfmove_clock;

        let effect = board.move_to(self.piece, self.target);
        self.captured = effect.captured();
        for (victim, _) in &self.captured {
            players[other].remove_piece(*victim);
        }

        if promotes {
            let promoted = board.promote(self.piece, self.promotion);
            players[own].remove_piece(self.piece);
            players[own].add_piece(promoted);
            self.promoted = Some(promoted);
        }

        *halfmove_clock = if was_pawn || !self.captured.is_empty() {
            0
        } else {
            *halfmove_clock + 1
        };

        players[own].set_in_check(false);
        let gives_check = players[other].king_attacked(board);
        players[other].set_in_check(gives_check);

        debug!(
            mover = self.mover.name(),
            piece = self.piece.0,
            target = ?self.target,
            captured = self.captured.len(),
            promoted = self.promoted.is_some(),
            "executed move"
        );
        effect
    }

    /// Reverse a previously executed move
    pub fn undo(&self, board: &mut Board, players: &mut [Player; 2], halfmove_clock: &mut u32) {
        let Some(snapshot) = &self.snapshot else {
            panic!("undoing a move that was never executed");
        };
        let own = self.mover.index();
        let other = self.mover.opposite().index();

        if let Some(promoted) = self.promoted {
            board.remove_piece(promoted);
            players[own].remove_piece(promoted);
            players[own].add_piece(self.piece);
        }

        board.restore(self.piece, snapshot);
        for &(victim, square) in &self.captured {
            board.put_back(victim, square);
            players[other].add_piece(victim);
        }

        players[0].set_in_check(self.check_flags[0]);
        players[1].set_in_check(self.check_flags[1]);
        *halfmove_clock = self.halfmove_clock;

        debug!(mover = self.mover.name(), piece = self.piece.0, "undid move");
    }
}

/// Holds at most one undoable move; recording a new one replaces it
#[derive(Clone, Debug, Default)]
pub struct History {
    last: Option<MoveCommand>,
}

impl History {
    pub fn new() -> Self {
        History { last: None }
    }

    pub fn record(&mut self, command: MoveCommand) {
        self.last = Some(command);
    }

    /// Remove and return the pending command
    pub fn take(&mut self) -> Option<MoveCommand> {
        self.last.take()
    }

    pub fn is_undo_available(&self) -> bool {
        self.last.is_some()
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
