// Board representation and move mechanics
// Mailbox grid of piece ids over an arena of pieces

use crate::error::{MoveError, MoveResult};
use crate::pieces::pawn::PawnMoves;
use crate::pieces::warden::WardenMoves;
use crate::pieces::{distance, shape_allows, Piece, PieceKind, Promotion};
use crate::reach::{ReachPolicy, ReachabilityIndex};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Type Definitions
// =============================================================================

/// Square coordinate (row, col)
/// Row 0 = Dark's back rank, last row = Light's back rank
/// Col 0 = file a
pub type Square = (u8, u8);

/// Color of a piece or side to move
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    /// Returns the opposite color
    pub fn opposite(&self) -> Color {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Color::Light => "Light",
            Color::Dark => "Dark",
        }
    }

    /// Stable index for per-color arrays
    pub fn index(&self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }
}

/// Stable handle of a piece in the board arena
/// Ids stay valid after capture; the piece just has no location.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct PieceId(pub usize);

/// What a `move_to` did, enough to reverse a step
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum MoveEffect {
    /// The piece relocated, possibly capturing the target occupant
    Step {
        piece: PieceId,
        from: Square,
        to: Square,
        captured: Option<PieceId>,
        /// A Phantom added the captured piece to its absorbed list
        absorbed: bool,
        /// A Warden's capture counter went up by one
        counted: bool,
    },
    /// A Warden fired its cone and stayed put
    Discharge {
        piece: PieceId,
        origin: Square,
        removed: Vec<(PieceId, Square)>,
        captures_before: u32,
    },
}

impl MoveEffect {
    /// Pieces taken off the board, with the square each stood on
    pub fn captured(&self) -> Vec<(PieceId, Square)> {
        match self {
            MoveEffect::Step {
                captured: Some(id),
                to,
                ..
            } => vec![(*id, *to)],
            MoveEffect::Step { .. } => Vec::new(),
            MoveEffect::Discharge { removed, .. } => removed.clone(),
        }
    }

    pub fn is_discharge(&self) -> bool {
        matches!(self, MoveEffect::Discharge { .. })
    }
}

// =============================================================================
// Board Structure
// =============================================================================

/// An N x M chess board
///
/// The grid holds piece ids; the arena holds the pieces. A piece's
/// `location` and the grid slot pointing at it are only ever written
/// together by `place` and `lift`, so the two views cannot drift apart.
/// Cloning yields a fully independent board.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    rows: u8,
    cols: u8,
    grid: Vec<Option<PieceId>>,
    pieces: Vec<Piece>,
}

impl Board {
    /// Create an empty board
    pub fn new(rows: u8, cols: u8) -> Self {
        Board {
            rows,
            cols,
            grid: vec![None; rows as usize * cols as usize],
            pieces: Vec::new(),
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Is the (possibly negative) coordinate on the board?
    pub fn in_bounds(&self, row: i16, col: i16) -> bool {
        row >= 0 && col >= 0 && row < self.rows as i16 && col < self.cols as i16
    }

    pub fn contains(&self, square: Square) -> bool {
        square.0 < self.rows && square.1 < self.cols
    }

    fn slot(&self, square: Square) -> usize {
        square.0 as usize * self.cols as usize + square.1 as usize
    }

    /// All squares in row-major order
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        let cols = self.cols;
        (0..self.rows).flat_map(move |r| (0..cols).map(move |c| (r, c)))
    }

    /// Id of the piece on a square (None when empty or off the board)
    pub fn occupant(&self, square: Square) -> Option<PieceId> {
        if self.contains(square) {
            self.grid[self.slot(square)]
        } else {
            None
        }
    }

    /// The piece on a square
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.occupant(square).map(|id| &self.pieces[id.0])
    }

    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0)
    }

    /// Panics on an id this board never issued
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.0]
    }

    pub fn location(&self, id: PieceId) -> Option<Square> {
        self.get(id).and_then(|piece| piece.location)
    }

    /// Put a new piece on an empty square
    pub fn add_piece(&mut self, piece: Piece, square: Square) -> PieceId {
        assert!(self.contains(square), "square {:?} is off the board", square);
        assert!(
            self.occupant(square).is_none(),
            "square {:?} is already occupied",
            square
        );
        let id = PieceId(self.pieces.len());
        self.pieces.push(Piece {
            location: None,
            ..piece
        });
        self.place(id, square);
        id
    }

    /// Take a piece off the board, keeping it in the arena
    /// Used for scratch boards and editors; game code goes through moves.
    pub fn remove_piece(&mut self, id: PieceId) -> Option<Square> {
        self.lift(id)
    }

    fn place(&mut self, id: PieceId, square: Square) {
        let slot = self.slot(square);
        debug_assert!(self.grid[slot].is_none(), "placing onto occupied {:?}", square);
        debug_assert!(self.pieces[id.0].location.is_none(), "piece {} placed twice", id.0);
        self.grid[slot] = Some(id);
        self.pieces[id.0].location = Some(square);
    }

    fn lift(&mut self, id: PieceId) -> Option<Square> {
        let square = self.pieces.get_mut(id.0)?.location.take()?;
        let slot = self.slot(square);
        self.grid[slot] = None;
        Some(square)
    }

    /// Pieces on the board, in row-major order
    pub fn live_pieces(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.grid.iter().filter_map(|slot| *slot)
    }

    /// All pieces of `color` currently on the board
    pub fn get_pieces(&self, color: Color) -> Vec<PieceId> {
        self.live_pieces()
            .filter(|id| self.pieces[id.0].color == color)
            .collect()
    }

    /// All pieces not of `color` currently on the board
    pub fn get_opponent_pieces(&self, color: Color) -> Vec<PieceId> {
        self.get_pieces(color.opposite())
    }

    /// Find the King of the given color
    pub fn find_king(&self, color: Color) -> Option<PieceId> {
        self.live_pieces().find(|id| {
            let piece = &self.pieces[id.0];
            piece.color == color && piece.kind.is_king()
        })
    }

    /// Deep copy for speculative analysis
    pub fn copy(&self) -> Board {
        self.clone()
    }

    /// Check that every grid slot and every piece location agree
    ///
    /// A mismatch is data corruption, so this panics.
    pub fn assert_consistent(&self) {
        for square in self.squares() {
            if let Some(id) = self.grid[self.slot(square)] {
                assert_eq!(
                    self.pieces[id.0].location,
                    Some(square),
                    "grid slot {:?} points at piece {} located elsewhere",
                    square,
                    id.0
                );
            }
        }
        for (i, piece) in self.pieces.iter().enumerate() {
            if let Some(square) = piece.location {
                assert_eq!(
                    self.grid[self.slot(square)],
                    Some(PieceId(i)),
                    "piece {} claims {:?} but the grid disagrees",
                    i,
                    square
                );
            }
        }
    }
}

// =============================================================================
// Move Legality (ignoring check)
// =============================================================================

impl Board {
    /// Does the piece's move shape reach `target`? Ignores blockers and bounds.
    pub fn valid_move(&self, id: PieceId, target: Square) -> bool {
        match self.get(id) {
            Some(piece) => match piece.location {
                Some(from) => shape_allows(self, &piece.kind, from, target, true),
                None => false,
            },
            None => false,
        }
    }

    /// Would moving to `target` fire a Warden discharge?
    pub fn is_discharge(&self, id: PieceId, target: Square) -> bool {
        match self.get(id) {
            Some(Piece {
                kind: PieceKind::Warden { captures },
                location: Some(from),
                ..
            }) => WardenMoves::is_discharge(*from, target, *captures),
            _ => false,
        }
    }

    /// Is every square strictly between the piece and `target` empty?
    ///
    /// Knights, discharges and other non-line shapes leap and always have
    /// a clear path. Straight and diagonal lines are walked.
    pub fn clear_path(&self, id: PieceId, target: Square) -> bool {
        let Some(piece) = self.get(id) else {
            return false;
        };
        let Some(from) = piece.location else {
            return false;
        };
        let (dr, dc) = distance(from, target);

        match piece.kind {
            PieceKind::Knight => return true,
            PieceKind::Warden { .. } if dr > 1 || dc > 1 => return true,
            _ => {}
        }
        if !(dr == 0 || dc == 0 || dr == dc) {
            return true;
        }

        let step_r = (target.0 as i16 - from.0 as i16).signum();
        let step_c = (target.1 as i16 - from.1 as i16).signum();
        let steps = dr.max(dc) as i16;
        (1..steps).all(|k| {
            let square = (
                (from.0 as i16 + k * step_r) as u8,
                (from.1 as i16 + k * step_c) as u8,
            );
            self.occupant(square).is_none()
        })
    }

    /// Mechanical legality of one move, ignoring check, with the reason on failure
    pub fn check_move(&self, id: PieceId, target: Square) -> MoveResult<()> {
        if !self.contains(target) {
            return Err(MoveError::OutOfBounds {
                row: target.0,
                col: target.1,
            });
        }
        let Some(from) = self.location(id) else {
            return Err(MoveError::NoPieceOnBoard { piece: id.0 });
        };
        if !self.valid_move(id, target) {
            return Err(MoveError::InvalidShape { from, to: target });
        }
        if !self.clear_path(id, target) {
            return Err(MoveError::PathBlocked { from, to: target });
        }
        if let Some(occupant) = self.piece_at(target) {
            if occupant.color == self.pieces[id.0].color {
                return Err(MoveError::SameColorTarget { square: target });
            }
        }
        Ok(())
    }

    /// Single source of truth for "this move is mechanically legal ignoring check"
    pub fn can_move(&self, id: PieceId, target: Square) -> bool {
        self.check_move(id, target).is_ok()
    }

    fn reaches(&self, id: PieceId, square: Square, policy: ReachPolicy) -> bool {
        let color = self.pieces[id.0].color;
        let target = self.piece_at(square);
        let admitted = match (policy.ignore_color, policy.capture_only) {
            (true, false) => true,
            (false, true) => target.is_some_and(|p| p.color != color),
            (true, true) => target.is_some(),
            (false, false) => target.map_or(true, |p| p.color != color),
        };
        admitted && self.valid_move(id, square) && self.clear_path(id, square)
    }

    /// Which of `pieces` reach `square` under `policy`
    pub fn attackers_of(&self, square: Square, pieces: &[PieceId], policy: ReachPolicy) -> Vec<PieceId> {
        pieces
            .iter()
            .copied()
            .filter(|&id| self.location(id).is_some() && self.reaches(id, square, policy))
            .collect()
    }

    /// For every square, which of `pieces` can reach it under the given color/capture policy
    pub fn find_possible_moves(&self, pieces: &[PieceId], ignore_color: bool, capture_only: bool) -> ReachabilityIndex {
        self.reachability(
            pieces,
            ReachPolicy {
                ignore_color,
                capture_only,
            },
        )
    }

    /// For every square, which of `pieces` can reach it under `policy`
    ///
    /// O(squares x pieces); recomputed on every call.
    pub fn reachability(&self, pieces: &[PieceId], policy: ReachPolicy) -> ReachabilityIndex {
        let mut index = ReachabilityIndex::new();
        for square in self.squares() {
            for id in self.attackers_of(square, pieces, policy) {
                index.insert(square, id);
            }
        }
        index
    }

    /// Empty or enemy-held squares the pieces can move to
    pub fn possible_moves(&self, pieces: &[PieceId]) -> ReachabilityIndex {
        self.reachability(pieces, ReachPolicy::MOVES)
    }

    /// Every square the pieces can get to, including ones held by their own side
    pub fn possible_moves_ignore_color(&self, pieces: &[PieceId]) -> ReachabilityIndex {
        self.reachability(pieces, ReachPolicy::MOVES_IGNORE_COLOR)
    }

    /// Enemy-held squares the pieces can capture
    pub fn capture_moves(&self, pieces: &[PieceId]) -> ReachabilityIndex {
        self.reachability(pieces, ReachPolicy::CAPTURES)
    }

    /// Occupied squares the pieces can reach, whoever holds them
    pub fn capture_moves_ignore_color(&self, pieces: &[PieceId]) -> ReachabilityIndex {
        self.reachability(pieces, ReachPolicy::CAPTURES_IGNORE_COLOR)
    }

    /// Squares one piece can move to (or capture on, with `capture_only`)
    pub fn piece_moves(&self, id: PieceId, capture_only: bool) -> Vec<Square> {
        self.find_possible_moves(&[id], false, capture_only).squares()
    }
}

// =============================================================================
// Move Execution
// =============================================================================

impl Board {
    /// Execute a move without checking it
    ///
    /// Validate with `can_move` first. A Phantom absorbs what it captures,
    /// a Warden counts its captures, and a discharge-shaped Warden move
    /// clears the enemy pieces in its cone instead of relocating.
    pub fn move_to(&mut self, id: PieceId, target: Square) -> MoveEffect {
        let from = match self.location(id) {
            Some(square) => square,
            None => panic!("piece {} moved while off the board", id.0),
        };
        if self.is_discharge(id, target) {
            return self.discharge(id, from, target);
        }

        let captured = self.occupant(target);
        let victim_value = captured.map_or(0, |victim| self.pieces[victim.0].value);
        if let Some(victim) = captured {
            self.lift(victim);
        }

        let mut absorbed = false;
        let mut counted = false;
        let piece = &mut self.pieces[id.0];
        match &mut piece.kind {
            PieceKind::Phantom { absorbed: list } => {
                if let Some(victim) = captured {
                    list.push(victim);
                    piece.value += victim_value;
                    absorbed = true;
                }
            }
            PieceKind::Warden { captures } => {
                if captured.is_some() {
                    *captures += 1;
                    counted = true;
                }
            }
            _ => {}
        }

        self.lift(id);
        self.place(id, target);

        MoveEffect::Step {
            piece: id,
            from,
            to: target,
            captured,
            absorbed,
            counted,
        }
    }

    fn discharge(&mut self, id: PieceId, origin: Square, target: Square) -> MoveEffect {
        let color = self.pieces[id.0].color;
        let mut removed = Vec::new();
        for (row, col) in WardenMoves::cone(origin, target) {
            if !self.in_bounds(row, col) {
                continue;
            }
            let square = (row as u8, col as u8);
            if let Some(victim) = self.occupant(square) {
                if self.pieces[victim.0].color != color {
                    self.lift(victim);
                    removed.push((victim, square));
                }
            }
        }

        let mut captures_before = 0;
        if let PieceKind::Warden { captures } = &mut self.pieces[id.0].kind {
            captures_before = *captures;
            *captures = 0;
        }

        MoveEffect::Discharge {
            piece: id,
            origin,
            removed,
            captures_before,
        }
    }

    /// Reverse a step made by `move_to`
    ///
    /// Discharges have no inverse; simulate them on a `copy()` instead.
    pub fn revert(&mut self, effect: &MoveEffect) {
        let MoveEffect::Step {
            piece,
            from,
            to,
            captured,
            absorbed,
            counted,
        } = effect
        else {
            panic!("a Warden discharge cannot be reverted in place");
        };

        self.lift(*piece);
        self.place(*piece, *from);

        if let Some(victim) = captured {
            self.place(*victim, *to);
            let victim_value = self.pieces[victim.0].value;
            let mover = &mut self.pieces[piece.0];
            match &mut mover.kind {
                PieceKind::Phantom { absorbed: list } if *absorbed => {
                    let popped = list.pop();
                    assert_eq!(popped, Some(*victim), "phantom absorption out of order");
                    mover.value -= victim_value;
                }
                PieceKind::Warden { captures } if *counted => *captures -= 1,
                _ => {}
            }
        }
    }

    /// Run `probe` against the board as it would be after the move, then roll back
    ///
    /// Steps are applied in place and reverted; discharges run on a
    /// disposable copy. Either way the board is unchanged afterwards.
    pub fn simulate<R>(&mut self, id: PieceId, target: Square, probe: impl FnOnce(&Board) -> R) -> R {
        if self.is_discharge(id, target) {
            let mut scratch = self.copy();
            scratch.move_to(id, target);
            return probe(&scratch);
        }
        let effect = self.move_to(id, target);
        let result = probe(self);
        self.revert(&effect);
        result
    }

    /// Should this pawn promote on arrival at `target`?
    pub fn reaches_promotion_row(&self, id: PieceId, target: Square) -> bool {
        match self.get(id).map(|piece| &piece.kind) {
            Some(PieceKind::Pawn { direction }) => target.0 == PawnMoves::promotion_row(self.rows, *direction),
            _ => false,
        }
    }

    /// Replace a piece in place with a freshly created promotion piece
    pub fn promote(&mut self, id: PieceId, promotion: Promotion) -> PieceId {
        let color = self.pieces[id.0].color;
        let square = match self.lift(id) {
            Some(square) => square,
            None => panic!("promoting piece {} which is off the board", id.0),
        };
        self.add_piece(Piece::new(promotion.kind(), color), square)
    }

    /// Overwrite a piece's state with a snapshot, placing it where the snapshot was
    pub(crate) fn restore(&mut self, id: PieceId, snapshot: &Piece) {
        self.lift(id);
        self.pieces[id.0] = snapshot.copy();
        if let Some(square) = snapshot.location {
            self.place(id, square);
        }
    }

    /// Put a captured piece back on the square it was taken from
    pub(crate) fn put_back(&mut self, id: PieceId, square: Square) {
        self.place(id, square);
    }
}

// =============================================================================
// Layouts
// =============================================================================

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// Standard army on an N x M board (cols >= 8)
    /// Back-rank pieces fill columns 0..8, pawns fill every column
    pub fn with_layout(rows: u8, cols: u8, custom_pieces: bool) -> Self {
        let mut board = Board::new(rows, cols);
        let last = rows - 1;

        for (col, kind) in BACK_RANK.into_iter().enumerate() {
            board.add_piece(Piece::new(kind.clone(), Color::Dark), (0, col as u8));
            board.add_piece(Piece::new(kind, Color::Light), (last, col as u8));
        }

        let specials = [
            ((1, 1), Piece::phantom(Color::Dark)),
            ((1, cols - 2), Piece::warden(Color::Dark)),
            ((rows - 2, 1), Piece::warden(Color::Light)),
            ((rows - 2, cols - 2), Piece::phantom(Color::Light)),
        ];
        for col in 0..cols {
            for (row, color) in [(1, Color::Dark), (rows - 2, Color::Light)] {
                let replaced = custom_pieces && specials.iter().any(|(sq, _)| *sq == (row, col));
                if !replaced {
                    board.add_piece(Piece::pawn(color), (row, col));
                }
            }
        }
        if custom_pieces {
            for (square, piece) in specials {
                board.add_piece(piece, square);
            }
        }
        board
    }

    /// Standard 8x8 chess starting position
    pub fn setup_standard() -> Self {
        Board::with_layout(8, 8, false)
    }

    /// 8x8 starting position with Phantoms and Wardens
    pub fn setup_variant() -> Self {
        Board::with_layout(8, 8, true)
    }
}

// =============================================================================
// Default Implementation
// =============================================================================

impl Default for Board {
    fn default() -> Self {
        Board::new(8, 8)
    }
}

// =============================================================================
// Display Implementation (for debugging)
// =============================================================================

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let files: String = (0..self.cols)
            .map(|c| format!("{} ", (b'a' + c) as char))
            .collect();
        let rule = format!("  +{}", "-+".repeat(self.cols as usize));

        writeln!(f, "   {}", files)?;
        writeln!(f, "{}", rule)?;
        for row in 0..self.rows {
            let rank = self.rows - row;
            write!(f, "{:>2}|", rank)?;
            for col in 0..self.cols {
                let c = self.piece_at((row, col)).map_or('.', Piece::symbol);
                write!(f, "{} ", c)?;
            }
            writeln!(f, "| {}", rank)?;
        }
        writeln!(f, "{}", rule)?;
        writeln!(f, "   {}", files)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
