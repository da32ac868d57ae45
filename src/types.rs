//! Core vocabulary shared by every module: the letter/state alphabets, head
//! directions, the constants a `TuringMachine` collaborator is expected to
//! agree on, and the error type for anything that can go wrong reading or
//! running one.

use thiserror::Error;

/// A symbol drawn from a tape alphabet. Unlike a single `char`, a `Letter`
/// may be a multi-character string — the translator's composite cells pack
/// two original letters and two head marks into one `Letter`.
pub type Letter = String;

/// The name of a machine state.
pub type StateId = String;

/// The blank symbol. Written in `.tm` files as `_`.
pub const BLANK: &str = "_";
/// The designated start state every machine begins in.
pub const INITIAL_STATE: &str = "q0";
/// The designated accepting state. Reaching it halts the machine with
/// acceptance.
pub const ACCEPTING_STATE: &str = "qacc";

/// Move the head one cell left.
pub const HEAD_LEFT: &str = "L";
/// Move the head one cell right.
pub const HEAD_RIGHT: &str = "R";
/// Leave the head where it is.
pub const HEAD_STAY: &str = "S";

/// The direction a tape head moves after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Stay,
}

impl Direction {
    /// Parses one of the three direction tokens (`L`/`R`/`S`).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            HEAD_LEFT => Some(Direction::Left),
            HEAD_RIGHT => Some(Direction::Right),
            HEAD_STAY => Some(Direction::Stay),
            _ => None,
        }
    }

    /// Renders the direction back to its token form.
    pub fn token(self) -> &'static str {
        match self {
            Direction::Left => HEAD_LEFT,
            Direction::Right => HEAD_RIGHT,
            Direction::Stay => HEAD_STAY,
        }
    }
}

/// Errors surfaced by the `machine` and `format` modules: malformed `.tm`
/// files, invalid symbols, and runtime errors while stepping a machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TuringMachineError {
    /// A letter or state name failed [`validate_symbol`].
    #[error("invalid symbol {0:?}: symbols must be non-empty and contain no whitespace")]
    InvalidSymbol(String),
    /// A transition's letter or direction vector did not have the
    /// machine's declared tape arity.
    #[error("transition arity mismatch: expected {expected} tape(s), got {got}")]
    ArityMismatch { expected: usize, got: usize },
    /// No transition is defined for the current state and symbols; the
    /// machine halts without accepting.
    #[error("no transition defined for state {state} reading {symbols:?}")]
    NoTransition { state: StateId, symbols: Vec<Letter> },
    /// Reading or writing a `.tm` file failed.
    #[error("file error: {0}")]
    FileError(String),
    /// The `.tm` file's textual contents could not be parsed.
    #[error("parse error: {0}")]
    ParseError(String),
}

/// Validates a symbol (letter or state name) against the collaborator's
/// rules (§6): non-empty and free of whitespace, the only two constraints
/// the flat, whitespace-tokenized `.tm` grammar actually needs. This is
/// deliberately weaker than "contains no `encode::SEP`/`encode::HEAD_MARK`"
/// — the translator's own composite states and cells contain both, and
/// the emitted `.tm` file must be able to round-trip back through
/// [`crate::format::parse_tm`] (§8 property 1). Reserved tokens are only
/// an implicit assumption on symbols the *caller* feeds to `translate`,
/// not something this validator polices.
pub fn validate_symbol(s: &str) -> Result<(), TuringMachineError> {
    let ok = !s.is_empty() && !s.chars().any(char::is_whitespace);
    if ok {
        Ok(())
    } else {
        Err(TuringMachineError::InvalidSymbol(s.to_string()))
    }
}
