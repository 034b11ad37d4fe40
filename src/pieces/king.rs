/// Here we define the movement shape of the almighty King !!
/// Phantom and Warden borrow this step as their base move.
use crate::board::Square;
use crate::pieces::distance;

/// KingMoves is an Unit Struct, namespace to group related functions together.
pub struct KingMoves;

impl KingMoves {
    /// One step in any of the 8 directions
    pub fn is_valid(from: Square, to: Square) -> bool {
        let (dr, dc) = distance(from, to);
        dr.max(dc) == 1
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
