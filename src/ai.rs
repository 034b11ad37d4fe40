// Computer opponent: fixed-priority greedy move selection
//
// No lookahead. Each turn the controller recomputes a danger map of the
// squares the opponent could take on, then in order:
//   1. gets the King out of danger
//   2. rescues a threatened Queen or Rook
//   3. plays the best-scoring legal move (gain minus value put at risk)

use crate::board::{Board, Color, PieceId, Square};
use crate::pieces::warden::WardenMoves;
use crate::pieces::PieceKind;
use crate::player::Player;
use crate::reach::ReachabilityIndex;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use tracing::trace;

/// A move picked by the computer
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ChosenMove {
    pub piece: PieceId,
    pub target: Square,
}

pub struct ComputerPlayer {
    color: Color,
    rng: StdRng,
}

impl ComputerPlayer {
    pub fn new(color: Color) -> Self {
        ComputerPlayer {
            color,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic player for tests and reproducible self-play
    pub fn with_seed(color: Color, seed: u64) -> Self {
        ComputerPlayer {
            color,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Pick a move for `player`, or `None` when there is no legal move
    ///
    /// The board is left unchanged. Telling checkmate from stalemate is
    /// up to the caller.
    pub fn choose_move(&mut self, board: &mut Board, player: &Player) -> Option<ChosenMove> {
        let legal = player.legal_moves(board);
        if legal.is_empty() {
            trace!(color = self.color.name(), "no legal moves");
            return None;
        }
        let danger = danger_map(board, self.color);

        if let (Some(king), Some(square)) = (player.king(), player.king_square(board)) {
            if danger.contains(square) {
                trace!(color = self.color.name(), "king in danger, evading");
                return self.evade(board, &legal, &danger, king, true);
            }
        }

        for piece in valuable_pieces(board, player) {
            let threatened = board.location(piece).is_some_and(|sq| danger.contains(sq));
            if threatened {
                if let Some(chosen) = self.evade(board, &legal, &danger, piece, false) {
                    trace!(piece = piece.0, "valuable piece evaded");
                    return Some(chosen);
                }
                trace!(piece = piece.0, "valuable piece could not evade");
            }
        }

        self.best_scoring(board, &legal, &danger)
    }

    /// Get `piece` out of danger
    ///
    /// Takes the sole attacker when that is profitable, otherwise moves
    /// the piece to a square the opponent cannot reach once the piece has
    /// left its origin. Other pieces this uncovers are not considered.
    fn evade(
        &mut self,
        board: &Board,
        legal: &ReachabilityIndex,
        danger: &ReachabilityIndex,
        piece: PieceId,
        fallback: bool,
    ) -> Option<ChosenMove> {
        let origin = board.location(piece)?;

        if let [attacker] = danger.attackers(origin) {
            if let Some(square) = board.location(*attacker) {
                if let Some(chosen) = self.capture_square(board, legal, danger, square) {
                    trace!(piece = piece.0, ?square, "captured the sole attacker");
                    return Some(chosen);
                }
            }
        }

        let mut vacated = board.copy();
        vacated.remove_piece(piece);
        let vacated_danger = danger_map(&vacated, self.color);
        let safe: Vec<Square> = legal
            .targets_of(piece)
            .into_iter()
            .filter(|&target| !vacated_danger.contains(target))
            .collect();

        if !safe.is_empty() {
            let captures: Vec<(Square, i32)> = safe
                .iter()
                .filter_map(|&target| board.piece_at(target).map(|victim| (target, victim.value())))
                .collect();
            let best = captures.iter().map(|&(_, value)| value).max();
            let target = match best {
                Some(best) => {
                    let top: Vec<Square> = captures
                        .iter()
                        .filter(|&&(_, value)| value == best)
                        .map(|&(target, _)| target)
                        .collect();
                    top.choose(&mut self.rng).copied()
                }
                None => safe.choose(&mut self.rng).copied(),
            };
            return target.map(|target| ChosenMove { piece, target });
        }

        if fallback {
            trace!(piece = piece.0, "no safe square, falling back to best scoring move");
            return self.best_scoring(board, legal, danger);
        }
        None
    }

    /// Take whatever stands on `square` with the piece that loses least doing it
    fn capture_square(
        &mut self,
        board: &Board,
        legal: &ReachabilityIndex,
        danger: &ReachabilityIndex,
        square: Square,
    ) -> Option<ChosenMove> {
        let victim_value = board.piece_at(square)?.value();
        let defended = danger.contains(square);

        let scored: Vec<(PieceId, i32)> = legal
            .attackers(square)
            .iter()
            .map(|&attacker| {
                let risk = if defended { board.piece(attacker).value() } else { 0 };
                (attacker, victim_value - risk)
            })
            .collect();
        let best = scored.iter().map(|&(_, score)| score).max()?;
        if best < 0 {
            return None;
        }
        let top: Vec<PieceId> = scored
            .iter()
            .filter(|&&(_, score)| score == best)
            .map(|&(attacker, _)| attacker)
            .collect();
        top.choose(&mut self.rng).map(|&piece| ChosenMove { piece, target: square })
    }

    /// Highest (gain - risk) legal move, ties broken at random
    fn best_scoring(&mut self, board: &Board, legal: &ReachabilityIndex, danger: &ReachabilityIndex) -> Option<ChosenMove> {
        let scored: Vec<(ChosenMove, i32)> = legal
            .moves()
            .map(|(piece, target)| (ChosenMove { piece, target }, score_move(board, danger, piece, target)))
            .collect();
        let best = scored.iter().map(|&(_, score)| score).max()?;
        let top: Vec<ChosenMove> = scored
            .into_iter()
            .filter(|&(_, score)| score == best)
            .map(|(chosen, _)| chosen)
            .collect();
        trace!(score = best, candidates = top.len(), "best scoring move");
        top.choose(&mut self.rng).copied()
    }
}

/// Value taken minus the mover's value if it lands on a dangerous square
///
/// A discharge takes every enemy in its cone and leaves the Warden in place.
pub fn score_move(board: &Board, danger: &ReachabilityIndex, piece: PieceId, target: Square) -> i32 {
    let mover = board.piece(piece);
    if board.is_discharge(piece, target) {
        let Some(origin) = mover.location() else {
            return 0;
        };
        return WardenMoves::cone(origin, target)
            .into_iter()
            .filter(|&(row, col)| board.in_bounds(row, col))
            .filter_map(|(row, col)| board.piece_at((row as u8, col as u8)))
            .filter(|victim| victim.color != mover.color)
            .map(|victim| victim.value())
            .sum();
    }

    let gain = board.piece_at(target).map_or(0, |victim| victim.value());
    let risk = if danger.contains(target) { mover.value() } else { 0 };
    gain - risk
}

/// Squares the opponent of `color` could capture on
///
/// Built from the opponent's reachability including squares it already
/// holds. Pawns are corrected: the squares straight ahead are dropped and
/// the empty squares diagonally ahead are added.
pub fn danger_map(board: &Board, color: Color) -> ReachabilityIndex {
    let opponents = board.get_opponent_pieces(color);
    let reach = board.possible_moves_ignore_color(&opponents);
    adjust_for_pawns(board, reach, &opponents)
}

fn adjust_for_pawns(board: &Board, mut index: ReachabilityIndex, opponents: &[PieceId]) -> ReachabilityIndex {
    for &id in opponents {
        let piece = board.piece(id);
        let (PieceKind::Pawn { direction }, Some(origin)) = (piece.kind(), piece.location()) else {
            continue;
        };

        for target in index.targets_of(id) {
            if target.1 == origin.1 {
                index.remove_attacker(target, id);
            }
        }

        let row = origin.0 as i16 + direction.delta();
        for col in [origin.1 as i16 - 1, origin.1 as i16 + 1] {
            if board.in_bounds(row, col) {
                let square = (row as u8, col as u8);
                if board.occupant(square).is_none() {
                    index.insert(square, id);
                }
            }
        }
    }
    index
}

/// Queens first, then Rooks
fn valuable_pieces(board: &Board, player: &Player) -> Vec<PieceId> {
    let mut valuable = Vec::new();
    for kind in [PieceKind::Queen, PieceKind::Rook] {
        valuable.extend(
            player
                .pieces()
                .iter()
                .copied()
                .filter(|&id| board.piece(id).kind() == &kind),
        );
    }
    valuable
}

// =============================================================================
// Unit Tests
// =============================================================================
