// Reachability index: which pieces can reach which squares
// Output of the board's multi-piece move queries and the basis for check detection

use crate::board::{PieceId, Square};

/// Which moves a reachability query counts
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ReachPolicy {
    /// Count squares held by the mover's own color too (defended squares)
    pub ignore_color: bool,
    /// Only count squares that hold a piece
    pub capture_only: bool,
}

impl ReachPolicy {
    /// Empty squares and enemy-held squares
    pub const MOVES: ReachPolicy = ReachPolicy { ignore_color: false, capture_only: false };
    /// Every square a piece could get to, whoever stands there
    pub const MOVES_IGNORE_COLOR: ReachPolicy = ReachPolicy { ignore_color: true, capture_only: false };
    /// Enemy-held squares only
    pub const CAPTURES: ReachPolicy = ReachPolicy { ignore_color: false, capture_only: true };
    /// Any occupied square
    pub const CAPTURES_IGNORE_COLOR: ReachPolicy = ReachPolicy { ignore_color: true, capture_only: true };
}

/// A square together with the pieces that can reach it
/// `attackers` is never empty while the entry is part of an index
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CaptureSpace {
    pub square: Square,
    pub attackers: Vec<PieceId>,
}

/// Per-square aggregation of attacking pieces, kept in row-major order
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ReachabilityIndex {
    spaces: Vec<CaptureSpace>,
}

impl ReachabilityIndex {
    pub fn new() -> Self {
        ReachabilityIndex { spaces: Vec::new() }
    }

    fn position(&self, square: Square) -> Result<usize, usize> {
        self.spaces.binary_search_by_key(&square, |space| space.square)
    }

    /// Record that `attacker` reaches `square`; duplicates are ignored
    pub fn insert(&mut self, square: Square, attacker: PieceId) {
        match self.position(square) {
            Ok(i) => {
                let attackers = &mut self.spaces[i].attackers;
                if !attackers.contains(&attacker) {
                    attackers.push(attacker);
                }
            }
            Err(i) => self.spaces.insert(
                i,
                CaptureSpace {
                    square,
                    attackers: vec![attacker],
                },
            ),
        }
    }

    pub fn get(&self, square: Square) -> Option<&CaptureSpace> {
        self.position(square).ok().map(|i| &self.spaces[i])
    }

    /// Pieces reaching `square` (empty slice when none)
    pub fn attackers(&self, square: Square) -> &[PieceId] {
        self.get(square).map_or(&[], |space| space.attackers.as_slice())
    }

    pub fn contains(&self, square: Square) -> bool {
        self.position(square).is_ok()
    }

    /// Remove one attacker; an entry left without attackers disappears
    pub fn remove_attacker(&mut self, square: Square, attacker: PieceId) -> bool {
        let Ok(i) = self.position(square) else {
            return false;
        };
        let attackers = &mut self.spaces[i].attackers;
        let Some(j) = attackers.iter().position(|&a| a == attacker) else {
            return false;
        };
        attackers.remove(j);
        if attackers.is_empty() {
            self.spaces.remove(i);
        }
        true
    }

    /// Every (piece, square) pair in the index
    pub fn moves(&self) -> impl Iterator<Item = (PieceId, Square)> + '_ {
        self.spaces
            .iter()
            .flat_map(|space| space.attackers.iter().map(move |&a| (a, space.square)))
    }

    /// Squares a single piece reaches
    pub fn targets_of(&self, piece: PieceId) -> Vec<Square> {
        self.spaces
            .iter()
            .filter(|space| space.attackers.contains(&piece))
            .map(|space| space.square)
            .collect()
    }

    pub fn squares(&self) -> Vec<Square> {
        self.spaces.iter().map(|space| space.square).collect()
    }

    /// Number of squares in the index
    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    /// Total number of (piece, square) pairs
    pub fn move_count(&self) -> usize {
        self.spaces.iter().map(|space| space.attackers.len()).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
