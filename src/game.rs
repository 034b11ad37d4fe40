// Game session: turn order, move validation, undo, scores
// The single entry point for human and computer moves alike

use crate::ai::ComputerPlayer;
use crate::board::{Board, Color, PieceId, Square};
use crate::command::{History, MoveCommand};
use crate::config::GameConfig;
use crate::error::{ConfigError, MoveError, MoveResult};
use crate::pieces::Promotion;
use crate::player::{EndCondition, Player};
use crate::reach::ReachabilityIndex;
use tracing::{debug, info, warn};

/// What an accepted move did
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MoveOutcome {
    pub mover: Color,
    pub piece: PieceId,
    pub from: Square,
    pub to: Square,
    pub captured: Vec<(PieceId, Square)>,
    pub promoted: Option<PieceId>,
    pub discharge: bool,
    /// The opponent's King is attacked after the move
    pub gives_check: bool,
    /// End condition of the side that moves next
    pub status: EndCondition,
}

/// Read-only rendering data for one piece on the board
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PieceView {
    pub id: PieceId,
    pub image_key: String,
    pub square: Square,
}

pub struct Game {
    config: GameConfig,
    board: Board,
    players: [Player; 2],
    side_to_move: Color,
    history: History,
    halfmove_clock: u32,
    scores: [u32; 2],
    status: EndCondition,
}

impl Game {
    /// Start a game laid out according to `config`
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::with_layout(config.rows, config.cols, config.custom_pieces);
        let players = [
            Player::new(Color::Light, config.name_of(Color::Light), &board),
            Player::new(Color::Dark, config.name_of(Color::Dark), &board),
        ];
        Ok(Game {
            config,
            board,
            players,
            side_to_move: Color::Light,
            history: History::new(),
            halfmove_clock: 0,
            scores: [0; 2],
            status: EndCondition::Ongoing,
        })
    }

    /// Start from an arbitrary position
    ///
    /// Check flags and the status of `side_to_move` are computed from the board.
    pub fn from_board(board: Board, side_to_move: Color) -> Self {
        let config = GameConfig {
            rows: board.rows(),
            cols: board.cols(),
            ..GameConfig::default()
        };
        let mut players = [
            Player::new(Color::Light, config.name_of(Color::Light), &board),
            Player::new(Color::Dark, config.name_of(Color::Dark), &board),
        ];
        for player in players.iter_mut() {
            let attacked = player.king_attacked(&board);
            player.set_in_check(attacked);
        }
        let mut game = Game {
            config,
            board,
            players,
            side_to_move,
            history: History::new(),
            halfmove_clock: 0,
            scores: [0; 2],
            status: EndCondition::Ongoing,
        };
        game.status = game.check_end_conditions(side_to_move);
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index()]
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// End condition of the side to move as of the last move
    pub fn status(&self) -> EndCondition {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != EndCondition::Ongoing
    }

    /// Moves since the last capture or pawn move
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn score(&self, color: Color) -> u32 {
        self.scores[color.index()]
    }

    pub fn is_undo_available(&self) -> bool {
        self.history.is_undo_available()
    }

    /// Move a piece, promoting pawns to a Queen
    pub fn attempt_move(&mut self, color: Color, piece: PieceId, target: Square) -> MoveResult<MoveOutcome> {
        self.attempt_move_with_promotion(color, piece, target, Promotion::default())
    }

    /// Validate and execute a move
    ///
    /// A rejected move leaves the game exactly as it was.
    pub fn attempt_move_with_promotion(
        &mut self,
        color: Color,
        piece: PieceId,
        target: Square,
        promotion: Promotion,
    ) -> MoveResult<MoveOutcome> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if color != self.side_to_move {
            return Err(MoveError::NotYourTurn {
                expected: self.side_to_move,
                actual: color,
            });
        }
        let (owner, from) = match self.board.get(piece) {
            Some(p) => match p.location() {
                Some(from) => (p.color, from),
                None => return Err(MoveError::NoPieceOnBoard { piece: piece.0 }),
            },
            None => return Err(MoveError::NoPieceOnBoard { piece: piece.0 }),
        };
        if owner != color {
            return Err(MoveError::NotYourPiece {
                piece: piece.0,
                color: owner,
            });
        }
        self.board.check_move(piece, target)?;
        if self.players[color.index()].moves_leaving_king_in_check(&mut self.board, piece, target) {
            return Err(MoveError::LeavesKingInCheck { square: target });
        }

        let mut command = MoveCommand::new(color, piece, target, promotion);
        let effect = command.execute(&mut self.board, &mut self.players, &mut self.halfmove_clock);

        let next = color.opposite();
        self.side_to_move = next;
        self.status = self.players[next.index()].check_end_conditions(&mut self.board);
        match self.status {
            EndCondition::Checkmate => info!(winner = color.name(), "checkmate"),
            EndCondition::Stalemate => info!(stuck = next.name(), "stalemate"),
            EndCondition::Ongoing => {}
        }

        let outcome = MoveOutcome {
            mover: color,
            piece,
            from,
            to: command.target(),
            captured: command.captured().to_vec(),
            promoted: command.promoted(),
            discharge: effect.is_discharge(),
            gives_check: self.players[next.index()].is_in_check(),
            status: self.status,
        };
        self.history.record(command);
        Ok(outcome)
    }

    /// Revert the most recent move; false when there is nothing to undo
    pub fn undo_last_move(&mut self) -> bool {
        let Some(command) = self.history.take() else {
            return false;
        };
        command.undo(&mut self.board, &mut self.players, &mut self.halfmove_clock);
        self.side_to_move = command.mover();
        self.status = EndCondition::Ongoing;
        debug!(side_to_move = self.side_to_move.name(), "undo");
        true
    }

    /// Every legal move of `color`, for highlighting
    pub fn legal_moves(&mut self, color: Color) -> ReachabilityIndex {
        self.players[color.index()].legal_moves(&mut self.board)
    }

    /// Legal targets of one piece; empty for pieces `color` does not own
    pub fn legal_moves_for(&mut self, color: Color, piece: PieceId) -> Vec<Square> {
        let owned = self
            .board
            .get(piece)
            .is_some_and(|p| p.color == color && p.location().is_some());
        if !owned {
            return Vec::new();
        }
        self.players[color.index()].legal_moves_for(&mut self.board, piece)
    }

    pub fn check_end_conditions(&mut self, color: Color) -> EndCondition {
        self.players[color.index()].check_end_conditions(&mut self.board)
    }

    /// Image key and square of every piece on the board
    pub fn piece_views(&self) -> Vec<PieceView> {
        self.board
            .live_pieces()
            .map(|id| {
                let piece = self.board.piece(id);
                PieceView {
                    id,
                    image_key: piece.image_key(),
                    square: piece.location().unwrap_or_default(),
                }
            })
            .collect()
    }

    pub fn set_player_name(&mut self, color: Color, name: &str) {
        match color {
            Color::Light => self.config.light_name = name.to_string(),
            Color::Dark => self.config.dark_name = name.to_string(),
        }
        self.players[color.index()].set_name(name);
    }

    /// Concede: the opponent scores a point and a fresh game starts
    pub fn forfeit(&mut self, color: Color) {
        let winner = color.opposite();
        self.scores[winner.index()] += 1;
        info!(
            loser = color.name(),
            winner = winner.name(),
            score = self.scores[winner.index()],
            "forfeit"
        );
        self.reset();
    }

    /// Lay out a new board, keeping names and scores
    pub fn reset(&mut self) {
        let config = &self.config;
        self.board = Board::with_layout(config.rows, config.cols, config.custom_pieces);
        self.players = [
            Player::new(Color::Light, config.name_of(Color::Light), &self.board),
            Player::new(Color::Dark, config.name_of(Color::Dark), &self.board),
        ];
        self.side_to_move = Color::Light;
        self.history.clear();
        self.halfmove_clock = 0;
        self.status = EndCondition::Ongoing;
        debug!("board reset");
    }

    /// Let the computer move for the side it plays
    ///
    /// `None` when it is not the computer's turn, the game is over, or no
    /// move exists. Computer moves always promote to a Queen.
    pub fn play_computer_turn(&mut self, ai: &mut ComputerPlayer) -> Option<MoveOutcome> {
        let color = ai.color();
        if self.is_over() || color != self.side_to_move {
            return None;
        }
        let chosen = ai.choose_move(&mut self.board, &self.players[color.index()])?;
        match self.attempt_move(color, chosen.piece, chosen.target) {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                warn!(%err, piece = chosen.piece.0, target = ?chosen.target, "computer chose a rejected move");
                None
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
