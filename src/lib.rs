// Chess variant rules engine
// N x M boards with two extra pieces: the Phantom, which takes on the moves
// of what it captures, and the Warden, which discharges a cone after three
// captures. Includes a greedy computer opponent and single-move undo.

pub mod ai;
pub mod board;
pub mod command;
pub mod config;
pub mod console;
pub mod error;
pub mod game;
pub mod pieces;
pub mod player;
pub mod reach;
