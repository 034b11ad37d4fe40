/// Warden ("Exile") move shape
/// Steps like a King. Once it has captured DISCHARGE_THRESHOLD pieces it
/// may instead discharge towards a square two rows or columns away,
/// clearing enemies in a cone without moving itself.
use crate::board::Square;
use crate::pieces::distance;
use crate::pieces::king::KingMoves;

/// Captures needed before a discharge is available
pub const DISCHARGE_THRESHOLD: u32 = 3;

pub struct WardenMoves;

impl WardenMoves {
    pub fn is_valid(from: Square, to: Square, captures: u32) -> bool {
        KingMoves::is_valid(from, to) || Self::is_discharge(from, to, captures)
    }

    /// Exactly one axis at distance 2, the other at most 1, and enough captures.
    /// Legality and execution both go through this, so they cannot disagree.
    pub fn is_discharge(from: Square, to: Square, captures: u32) -> bool {
        if captures < DISCHARGE_THRESHOLD {
            return false;
        }
        let (dr, dc) = distance(from, to);
        (dr == 2 && dc <= 1) || (dc == 2 && dr <= 1)
    }

    /// Squares hit by a discharge from `from` aimed at `to`
    ///
    /// Three squares wide at depth 2 plus the centre square at depth 1.
    /// Coordinates may fall off the board; the caller filters them.
    pub fn cone(from: Square, to: Square) -> [(i16, i16); 4] {
        let (r, c) = (from.0 as i16, from.1 as i16);
        let dr = to.0 as i16 - r;
        let dc = to.1 as i16 - c;

        if dr.abs() == 2 {
            let s = dr.signum();
            [(r + 2 * s, c - 1), (r + 2 * s, c), (r + 2 * s, c + 1), (r + s, c)]
        } else {
            let s = dc.signum();
            [(r - 1, c + 2 * s), (r, c + 2 * s), (r + 1, c + 2 * s), (r, c + s)]
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
    fn test_warden_steps_like_king() {
        assert!(WardenMoves::is_valid((4, 4), (3, 3), 0));
        assert!(WardenMoves::is_valid((4, 4), (5, 4), 0));
        assert!(!WardenMoves::is_valid((4, 4), (4, 4), 5));
    }

    #[test]
    fn test_discharge_needs_three_captures() {
        assert!(!WardenMoves::is_valid((4, 4), (2, 4), 2), "Counter at 2 is not enough");
        assert!(WardenMoves::is_valid((4, 4), (2, 4), 3));
        assert!(WardenMoves::is_valid((4, 4), (2, 5), 3), "Off-centre aim is still a discharge");
        assert!(WardenMoves::is_valid((4, 4), (5, 6), 4));
    }

    #[test]
    fn test_discharge_shape_limits() {
        assert!(!WardenMoves::is_discharge((4, 4), (2, 2), 3), "(2,2) is not a discharge shape");
        assert!(!WardenMoves::is_discharge((4, 4), (1, 4), 3), "Three rows is too far");
        assert!(!WardenMoves::is_discharge((4, 4), (3, 4), 3), "A step is never a discharge");
    }

    #[test]
    fn test_cone_upwards() {
        let cone = WardenMoves::cone((4, 4), (2, 4));
        assert_eq!(cone, [(2, 3), (2, 4), (2, 5), (3, 4)]);
    }

    #[test]
    fn test_cone_sideways() {
        let left = WardenMoves::cone((4, 4), (5, 2));
        assert_eq!(left, [(3, 2), (4, 2), (5, 2), (4, 3)]);

        let right = WardenMoves::cone((0, 7), (0, 9));
        assert_eq!(right, [(-1, 9), (0, 9), (1, 9), (0, 8)], "Off-board squares are left to the caller");
    }
}
