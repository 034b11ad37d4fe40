// Piece representation and move-shape dispatch
// Each variant's shape rules live in their own file; this module ties them together

pub mod bishop;
pub mod king;
pub mod knight;
pub mod pawn;
pub mod phantom;
pub mod queen;
pub mod rook;
pub mod warden;

use crate::board::{Board, Color, PieceId, Square};
use bishop::BishopMoves;
use king::KingMoves;
use knight::KnightMoves;
use pawn::PawnMoves;
use phantom::PhantomMoves;
use queen::QueenMoves;
use rook::RookMoves;
use warden::WardenMoves;

// =============================================================================
// Material Values
// =============================================================================

pub const PAWN_VALUE: i32 = 1;
pub const KNIGHT_VALUE: i32 = 3;
pub const BISHOP_VALUE: i32 = 3;
pub const ROOK_VALUE: i32 = 5;
pub const QUEEN_VALUE: i32 = 9;
pub const KING_VALUE: i32 = 99;
/// Base value before any absorptions
pub const PHANTOM_VALUE: i32 = 5;
pub const WARDEN_VALUE: i32 = 7;

// =============================================================================
// Type Definitions
// =============================================================================

/// Direction a pawn advances in
/// Up = towards row 0, Down = towards the last row
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Row delta of a single forward step
    pub fn delta(self) -> i16 {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
        }
    }

    /// The direction pawns of a color advance in
    /// Light starts at the bottom and moves up
    pub fn for_color(color: Color) -> Direction {
        match color {
            Color::Light => Direction::Up,
            Color::Dark => Direction::Down,
        }
    }
}

/// Variant of a piece together with its variant-specific state
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum PieceKind {
    Pawn { direction: Direction },
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    /// "Boo": gains the move shape of every piece it captures
    /// Absorbed pieces stay in the board arena, off the board
    Phantom { absorbed: Vec<PieceId> },
    /// "Exile": after 3 captures it may discharge a cone instead of stepping
    Warden { captures: u32 },
}

impl PieceKind {
    /// Value of a freshly created piece of this kind
    pub fn base_value(&self) -> i32 {
        match self {
            PieceKind::Pawn { .. } => PAWN_VALUE,
            PieceKind::Knight => KNIGHT_VALUE,
            PieceKind::Bishop => BISHOP_VALUE,
            PieceKind::Rook => ROOK_VALUE,
            PieceKind::Queen => QUEEN_VALUE,
            PieceKind::King => KING_VALUE,
            PieceKind::Phantom { .. } => PHANTOM_VALUE,
            PieceKind::Warden { .. } => WARDEN_VALUE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PieceKind::Pawn { .. } => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
            PieceKind::Phantom { .. } => "Phantom",
            PieceKind::Warden { .. } => "Warden",
        }
    }

    /// Board diagram letter (uppercase form)
    pub fn symbol(&self) -> char {
        match self {
            PieceKind::Pawn { .. } => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
            PieceKind::Phantom { .. } => 'H',
            PieceKind::Warden { .. } => 'W',
        }
    }

    pub fn is_king(&self) -> bool {
        matches!(self, PieceKind::King)
    }

    pub fn is_pawn(&self) -> bool {
        matches!(self, PieceKind::Pawn { .. })
    }
}

/// Pieces a pawn may promote to
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Promotion {
    #[default]
    Queen,
    Rook,
    Knight,
    Bishop,
}

impl Promotion {
    pub fn kind(self) -> PieceKind {
        match self {
            Promotion::Queen => PieceKind::Queen,
            Promotion::Rook => PieceKind::Rook,
            Promotion::Knight => PieceKind::Knight,
            Promotion::Bishop => PieceKind::Bishop,
        }
    }

    /// Parse a promotion letter (q, r, n, b)
    pub fn from_char(c: char) -> Option<Promotion> {
        match c.to_ascii_lowercase() {
            'q' => Some(Promotion::Queen),
            'r' => Some(Promotion::Rook),
            'n' => Some(Promotion::Knight),
            'b' => Some(Promotion::Bishop),
            _ => None,
        }
    }
}

/// A piece with its color, current value and location
///
/// `location` is written only by the owning `Board`, which keeps it in
/// step with the grid slot that points back at this piece.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Piece {
    pub color: Color,
    pub(crate) kind: PieceKind,
    pub(crate) value: i32,
    pub(crate) location: Option<Square>,
}

impl Piece {
    /// Create a new piece that is not yet placed on a board
    pub fn new(kind: PieceKind, color: Color) -> Self {
        let value = kind.base_value();
        Piece {
            color,
            kind,
            value,
            location: None,
        }
    }

    pub fn pawn(color: Color) -> Self {
        Piece::new(
            PieceKind::Pawn {
                direction: Direction::for_color(color),
            },
            color,
        )
    }

    pub fn phantom(color: Color) -> Self {
        Piece::new(PieceKind::Phantom { absorbed: Vec::new() }, color)
    }

    pub fn warden(color: Color) -> Self {
        Piece::new(PieceKind::Warden { captures: 0 }, color)
    }

    pub fn kind(&self) -> &PieceKind {
        &self.kind
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn location(&self) -> Option<Square> {
        self.location
    }

    /// Clone with identical variant state but no location
    pub fn copy(&self) -> Piece {
        Piece {
            location: None,
            ..self.clone()
        }
    }

    /// Pieces absorbed so far (empty for everything but a Phantom)
    pub fn absorbed(&self) -> &[PieceId] {
        match &self.kind {
            PieceKind::Phantom { absorbed } => absorbed,
            _ => &[],
        }
    }

    /// Capture counter of a Warden, `None` for other variants
    pub fn capture_count(&self) -> Option<u32> {
        match self.kind {
            PieceKind::Warden { captures } => Some(captures),
            _ => None,
        }
    }

    /// Key the renderer uses to look up this piece's image
    pub fn image_key(&self) -> String {
        format!("{}_{}", self.color.name(), self.kind.name())
    }

    /// Board diagram letter, lowercase for Dark
    pub fn symbol(&self) -> char {
        let c = self.kind.symbol();
        if self.color == Color::Dark {
            c.to_ascii_lowercase()
        } else {
            c
        }
    }
}

// =============================================================================
// Shape Dispatch
// =============================================================================

/// Absolute (row, col) distance between two squares
pub fn distance(from: Square, to: Square) -> (u8, u8) {
    (from.0.abs_diff(to.0), from.1.abs_diff(to.1))
}

/// Does `kind` standing on `from` have a move shape reaching `to`?
///
/// Ignores obstruction and board bounds. `discharge` controls whether a
/// Warden's cone shape counts; pieces absorbed by a Phantom only lend
/// their stepping shapes.
pub(crate) fn shape_allows(
    board: &Board,
    kind: &PieceKind,
    from: Square,
    to: Square,
    discharge: bool,
) -> bool {
    if from == to {
        return false;
    }
    match kind {
        PieceKind::Pawn { direction } => PawnMoves::is_valid(board, from, to, *direction),
        PieceKind::Knight => KnightMoves::is_valid(from, to),
        PieceKind::Bishop => BishopMoves::is_valid(from, to),
        PieceKind::Rook => RookMoves::is_valid(from, to),
        PieceKind::Queen => QueenMoves::is_valid(from, to),
        PieceKind::King => KingMoves::is_valid(from, to),
        PieceKind::Phantom { absorbed } => PhantomMoves::is_valid(board, absorbed, from, to),
        PieceKind::Warden { captures } => {
            if discharge {
                WardenMoves::is_valid(from, to, *captures)
            } else {
                KingMoves::is_valid(from, to)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_values() {
        assert_eq!(Piece::pawn(Color::Light).value(), 1);
        assert_eq!(Piece::new(PieceKind::Knight, Color::Light).value(), 3);
        assert_eq!(Piece::new(PieceKind::Bishop, Color::Light).value(), 3);
        assert_eq!(Piece::new(PieceKind::Rook, Color::Light).value(), 5);
        assert_eq!(Piece::new(PieceKind::Queen, Color::Light).value(), 9);
        assert_eq!(Piece::new(PieceKind::King, Color::Light).value(), 99);
        assert_eq!(Piece::phantom(Color::Dark).value(), 5);
        assert_eq!(Piece::warden(Color::Dark).value(), 7);
    }

    #[test]
    fn test_pawn_direction_follows_color() {
        assert_eq!(
            Piece::pawn(Color::Light).kind(),
            &PieceKind::Pawn { direction: Direction::Up }
        );
        assert_eq!(
            Piece::pawn(Color::Dark).kind(),
            &PieceKind::Pawn { direction: Direction::Down }
        );
    }

    #[test]
    fn test_copy_drops_location_keeps_state() {
        let mut warden = Piece::warden(Color::Light);
        warden.kind = PieceKind::Warden { captures: 2 };
        warden.location = Some((3, 3));

        let copy = warden.copy();
        assert_eq!(copy.location(), None, "A copy is not placed anywhere");
        assert_eq!(copy.capture_count(), Some(2));
        assert_eq!(copy.color, Color::Light);
    }

    #[test]
    fn test_image_key_and_symbol() {
        assert_eq!(Piece::phantom(Color::Light).image_key(), "Light_Phantom");
        assert_eq!(Piece::warden(Color::Dark).image_key(), "Dark_Warden");
        assert_eq!(Piece::new(PieceKind::Queen, Color::Light).symbol(), 'Q');
        assert_eq!(Piece::new(PieceKind::Queen, Color::Dark).symbol(), 'q');
    }

    #[test]
    fn test_promotion_from_char() {
        assert_eq!(Promotion::from_char('q'), Some(Promotion::Queen));
        assert_eq!(Promotion::from_char('N'), Some(Promotion::Knight));
        assert_eq!(Promotion::from_char('k'), None);
        assert_eq!(Promotion::default().kind(), PieceKind::Queen);
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance((4, 4), (2, 5)), (2, 1));
        assert_eq!(distance((0, 7), (7, 0)), (7, 7));
    }
}
