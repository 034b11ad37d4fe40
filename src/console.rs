// Text console for playing against the computer
// Line-oriented commands over any reader/writer pair, in the manner of a UCI loop

use crate::ai::ComputerPlayer;
use crate::board::{Color, Square};
use crate::game::{Game, MoveOutcome};
use crate::pieces::Promotion;
use crate::player::EndCondition;
use std::io::{self, BufRead, Write};
use tracing::warn;

/// Convert a square to console notation (e.g., (7, 4) -> "e1" on 8 rows)
pub fn square_name(square: Square, rows: u8) -> String {
    let file = (b'a' + square.1) as char;
    format!("{}{}", file, rows - square.0)
}

/// Parse console notation to a square on a board with `rows` rows
pub fn parse_square(s: &str, rows: u8, cols: u8) -> Option<Square> {
    let mut chars = s.chars();
    let file = chars.next()?.to_ascii_lowercase();
    if !file.is_ascii_lowercase() {
        return None;
    }
    let col = file as u8 - b'a';
    let rank: u8 = chars.as_str().parse().ok()?;
    if col >= cols || rank == 0 || rank > rows {
        return None;
    }
    Some((rows - rank, col))
}

fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "light" | "white" => Some(Color::Light),
        "dark" | "black" => Some(Color::Dark),
        _ => None,
    }
}

/// How a computer-vs-computer run stopped
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SelfPlayEnd {
    /// Checkmate or stalemate
    Finished(EndCondition),
    /// Every allowed turn was played
    TurnLimit,
    /// The side to move has no computer or its choice was rejected
    Stalled,
}

/// Computer against computer until the game ends or `max_turns` is used up,
/// printing the board after every turn
pub fn self_play<W: Write>(
    game: &mut Game,
    computers: &mut [Option<ComputerPlayer>; 2],
    max_turns: u32,
    output: &mut W,
) -> io::Result<SelfPlayEnd> {
    writeln!(output, "{}", game.board())?;
    for turn in 1..=max_turns {
        if game.is_over() {
            return Ok(SelfPlayEnd::Finished(game.status()));
        }
        let side = game.side_to_move();
        let Some(ai) = computers[side.index()].as_mut() else {
            return Ok(SelfPlayEnd::Stalled);
        };
        if game.play_computer_turn(ai).is_none() {
            return Ok(SelfPlayEnd::Stalled);
        }
        writeln!(output, "Turn {}: {} moved", turn, side.name())?;
        writeln!(output, "{}", game.board())?;
    }
    if game.is_over() {
        Ok(SelfPlayEnd::Finished(game.status()))
    } else {
        Ok(SelfPlayEnd::TurnLimit)
    }
}

/// Interactive session: a game plus optional computer opponents
pub struct Console {
    game: Game,
    computers: [Option<ComputerPlayer>; 2],
}

impl Console {
    pub fn new(game: Game, computers: [Option<ComputerPlayer>; 2]) -> Self {
        Console { game, computers }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Read commands until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> io::Result<()> {
        writeln!(output, "{}", self.game.board())?;
        self.play_computers(output)?;

        for line in input.lines() {
            let line = line?;
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            match parts[0] {
                "board" | "d" => writeln!(output, "{}", self.game.board())?,

                "moves" => self.show_moves(&parts[1..], output)?,

                "move" => {
                    if self.human_move(&parts[1..], output)? {
                        self.play_computers(output)?;
                    }
                }

                "undo" => {
                    if self.game.undo_last_move() {
                        writeln!(output, "{}", self.game.board())?;
                        self.play_computers(output)?;
                    } else {
                        writeln!(output, "nothing to undo")?;
                    }
                }

                "status" => self.show_status(output)?,

                "forfeit" => {
                    let side = self.game.side_to_move();
                    self.game.forfeit(side);
                    writeln!(
                        output,
                        "{} forfeits. Score: {} {} - {} {}",
                        self.game.player(side).name(),
                        self.game.player(Color::Light).name(),
                        self.game.score(Color::Light),
                        self.game.score(Color::Dark),
                        self.game.player(Color::Dark).name(),
                    )?;
                    writeln!(output, "{}", self.game.board())?;
                    self.play_computers(output)?;
                }

                "name" => match (parts.get(1).and_then(|s| parse_color(s)), parts.len() > 2) {
                    (Some(color), true) => {
                        let name = parts[2..].join(" ");
                        self.game.set_player_name(color, &name);
                        writeln!(output, "{} is now {}", color.name(), name)?;
                    }
                    _ => {
                        warn!(%line, "bad name command");
                        writeln!(output, "usage: name <light|dark> <name>")?;
                    }
                },

                "quit" => break,

                _ => {
                    warn!(%line, "unknown command");
                    writeln!(output, "unknown command: {}", parts[0])?;
                }
            }
        }
        Ok(())
    }

    fn square_arg(&self, arg: Option<&&str>) -> Option<Square> {
        let board = self.game.board();
        arg.and_then(|s| parse_square(s, board.rows(), board.cols()))
    }

    fn show_moves<W: Write>(&mut self, args: &[&str], output: &mut W) -> io::Result<()> {
        let Some(square) = self.square_arg(args.first()) else {
            writeln!(output, "usage: moves <square>")?;
            return Ok(());
        };
        let Some(piece) = self.game.board().occupant(square) else {
            writeln!(output, "no piece on {}", args[0])?;
            return Ok(());
        };
        let color = self.game.board().piece(piece).color;
        let rows = self.game.board().rows();
        let targets: Vec<String> = self
            .game
            .legal_moves_for(color, piece)
            .into_iter()
            .map(|target| square_name(target, rows))
            .collect();
        writeln!(output, "{}", targets.join(" "))
    }

    /// Returns whether a move was played
    fn human_move<W: Write>(&mut self, args: &[&str], output: &mut W) -> io::Result<bool> {
        let (Some(from), Some(to)) = (self.square_arg(args.first()), self.square_arg(args.get(1))) else {
            warn!(?args, "unparseable move");
            writeln!(output, "usage: move <from> <to> [q|r|n|b]")?;
            return Ok(false);
        };
        let promotion = args
            .get(2)
            .and_then(|s| s.chars().next())
            .and_then(Promotion::from_char)
            .unwrap_or_default();
        let Some(piece) = self.game.board().occupant(from) else {
            writeln!(output, "no piece on {}", args[0])?;
            return Ok(false);
        };

        let side = self.game.side_to_move();
        if self.computers[side.index()].is_some() {
            warn!(side = side.name(), "human move on the computer's turn");
            writeln!(output, "it is the computer's turn")?;
            return Ok(false);
        }
        match self.game.attempt_move_with_promotion(side, piece, to, promotion) {
            Ok(outcome) => {
                self.report(&outcome, output)?;
                Ok(true)
            }
            Err(err) => {
                warn!(%err, "move rejected");
                writeln!(output, "illegal move: {}", err)?;
                Ok(false)
            }
        }
    }

    /// Let computer players move while it is their turn
    fn play_computers<W: Write>(&mut self, output: &mut W) -> io::Result<()> {
        while !self.game.is_over() {
            let side = self.game.side_to_move();
            let Some(ai) = self.computers[side.index()].as_mut() else {
                break;
            };
            match self.game.play_computer_turn(ai) {
                Some(outcome) => self.report(&outcome, output)?,
                None => break,
            }
        }
        Ok(())
    }

    fn report<W: Write>(&self, outcome: &MoveOutcome, output: &mut W) -> io::Result<()> {
        let rows = self.game.board().rows();
        write!(
            output,
            "{} {} {}{}",
            self.game.player(outcome.mover).name(),
            square_name(outcome.from, rows),
            square_name(outcome.to, rows),
            if outcome.discharge { " (discharge)" } else { "" },
        )?;
        if !outcome.captured.is_empty() {
            write!(output, " captures {}", outcome.captured.len())?;
        }
        if outcome.gives_check {
            write!(output, " check")?;
        }
        writeln!(output)?;
        writeln!(output, "{}", self.game.board())?;
        if outcome.status != EndCondition::Ongoing {
            self.show_status(output)?;
        }
        Ok(())
    }

    fn show_status<W: Write>(&self, output: &mut W) -> io::Result<()> {
        let side = self.game.side_to_move();
        let name = self.game.player(side).name();
        match self.game.status() {
            EndCondition::Checkmate => writeln!(output, "checkmate, {} loses", name),
            EndCondition::Stalemate => writeln!(output, "stalemate, {} cannot move", name),
            EndCondition::Ongoing if self.game.player(side).is_in_check() => {
                writeln!(output, "{} to move, in check", name)
            }
            EndCondition::Ongoing => writeln!(output, "{} to move", name),
        }
    }
}
