//! Player commands
//!
//! The engine consumes `Command` values; `parse_command` is the minimal text
//! front end the binary uses to produce them. Anything unrecognised becomes
//! `NoOp`.

use std::str::FromStr;

use crate::core::types::Direction;

/// Closed set of commands the turn engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Step back to the previous recorded position
    MoveBack,
    AttackUp,
    AttackDown,
    AttackLeft,
    AttackRight,
    Quit,
    NoOp,
}

impl Command {
    pub fn movement(direction: Direction) -> Self {
        match direction {
            Direction::Up => Command::MoveUp,
            Direction::Down => Command::MoveDown,
            Direction::Left => Command::MoveLeft,
            Direction::Right => Command::MoveRight,
        }
    }

    pub fn attack(direction: Direction) -> Self {
        match direction {
            Direction::Up => Command::AttackUp,
            Direction::Down => Command::AttackDown,
            Direction::Left => Command::AttackLeft,
            Direction::Right => Command::AttackRight,
        }
    }

    /// Direction of a cardinal move, if this is one
    pub fn move_direction(&self) -> Option<Direction> {
        match self {
            Command::MoveUp => Some(Direction::Up),
            Command::MoveDown => Some(Direction::Down),
            Command::MoveLeft => Some(Direction::Left),
            Command::MoveRight => Some(Direction::Right),
            _ => None,
        }
    }

    /// Direction of an attack, if this is one
    pub fn attack_direction(&self) -> Option<Direction> {
        match self {
            Command::AttackUp => Some(Direction::Up),
            Command::AttackDown => Some(Direction::Down),
            Command::AttackLeft => Some(Direction::Left),
            Command::AttackRight => Some(Direction::Right),
            _ => None,
        }
    }
}

fn parse_direction(word: &str) -> Option<Direction> {
    match word {
        "up" | "u" => Some(Direction::Up),
        "down" | "d" => Some(Direction::Down),
        "left" | "l" => Some(Direction::Left),
        "right" | "r" => Some(Direction::Right),
        _ => None,
    }
}

/// Turn one line of input into a command
///
/// Accepts `up|down|left|right`, `back`, `attack <dir>` (or `a <dir>`) and
/// `quit`, case-insensitive with surrounding whitespace ignored.
pub fn parse_command(input: &str) -> Command {
    let lowered = input.trim().to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();

    match words.as_slice() {
        ["quit"] | ["q"] | ["exit"] => Command::Quit,
        ["back"] | ["b"] => Command::MoveBack,
        ["attack" | "a", dir] => parse_direction(dir).map_or(Command::NoOp, Command::attack),
        [dir] => parse_direction(dir).map_or(Command::NoOp, Command::movement),
        _ => Command::NoOp,
    }
}

impl FromStr for Command {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse_command(s))
    }
}
