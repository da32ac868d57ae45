//! The encoding layer (§4.1): how a 2TM configuration is packed into a
//! single 1TM cell, and how a phase-tagged simulation context is packed
//! into a single 1TM state name.
//!
//! Tokens (`SEP`, the head mark) are carried over unchanged from
//! `examples/original_source/tm_convert.cpp`'s second variant rather than
//! invented fresh — see DESIGN.md.

use crate::types::{Direction, Letter, StateId};

/// Reserved separator. Three characters so it cannot collide with a
/// typical single-character alphabet. Callers of `translate` are expected
/// not to use it in their own letters/states (§3); `validate_symbol`
/// itself does not police this, since the translator's own output must
/// contain it freely and still pass validation (§8 property 1).
pub const SEP: &str = "(-)";

/// The guard cell: a left sentinel, recognizable and never moved past.
pub const GUARD: &str = "(-)(-)";

/// Prefix glued directly onto a composite-cell component to mark that the
/// corresponding simulated head is currently at this position.
pub const HEAD_MARK: &str = "v";

/// One of the ten control-state tags a composite state carries while
/// simulating a single original-machine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Phase0Start,
    Phase0Input,
    Phase0Back,
    Phase0SetupMarks,
    Phase1FindSecond,
    Phase1SetSecondMark,
    Phase1Back,
    Phase2FindFirst,
    Phase2SetFirstMark,
    Phase2Back,
}

impl Phase {
    fn tag(self) -> &'static str {
        match self {
            Phase::Phase0Start => "Phase0-Start",
            Phase::Phase0Input => "Phase0-Input",
            Phase::Phase0Back => "Phase0-Back",
            Phase::Phase0SetupMarks => "Phase0-Setup-Marks",
            Phase::Phase1FindSecond => "Phase1-Find-Second",
            Phase::Phase1SetSecondMark => "Phase1-Set-Second-Mark",
            Phase::Phase1Back => "Phase1-Back",
            Phase::Phase2FindFirst => "Phase2-Find-First",
            Phase::Phase2SetFirstMark => "Phase2-Set-First-Mark",
            Phase::Phase2Back => "Phase2-Back",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "Phase0-Start" => Phase::Phase0Start,
            "Phase0-Input" => Phase::Phase0Input,
            "Phase0-Back" => Phase::Phase0Back,
            "Phase0-Setup-Marks" => Phase::Phase0SetupMarks,
            "Phase1-Find-Second" => Phase::Phase1FindSecond,
            "Phase1-Set-Second-Mark" => Phase::Phase1SetSecondMark,
            "Phase1-Back" => Phase::Phase1Back,
            "Phase2-Find-First" => Phase::Phase2FindFirst,
            "Phase2-Set-First-Mark" => Phase::Phase2SetFirstMark,
            "Phase2-Back" => Phase::Phase2Back,
            _ => return None,
        })
    }
}

/// A 1TM state synthesized by the translator: a phase tag plus the
/// original-machine context needed to resume simulation once the phase
/// completes. Built and consumed as a typed value throughout `translate`
/// — never grepped out of an already-serialized state string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeState {
    pub phase: Phase,
    pub original_state: StateId,
    pub carried_letter: Letter,
    pub carried_dir: Letter,
}

impl CompositeState {
    pub fn new(phase: Phase, original_state: &str, carried_letter: &str, carried_dir: &str) -> Self {
        CompositeState {
            phase,
            original_state: original_state.to_string(),
            carried_letter: carried_letter.to_string(),
            carried_dir: carried_dir.to_string(),
        }
    }

    /// Serializes to the flat state name the underlying `TuringMachine`
    /// stores. Direction payloads are re-encoded (`L`→`<`, `R`→`>`) so they
    /// cannot be confused with the separator or other fields when the
    /// string is later split on `SEP`.
    pub fn pack(&self) -> StateId {
        format!(
            "{}{SEP}{}{SEP}{}{SEP}{}",
            self.phase.tag(),
            self.original_state,
            self.carried_letter,
            encode_direction_payload(&self.carried_dir),
        )
    }

    /// Inverse of [`CompositeState::pack`]. Returns `None` for any state
    /// name that isn't a packed composite state (e.g. `INITIAL_STATE`,
    /// `ACCEPTING_STATE`, or the empty-input corner-case state).
    pub fn unpack(state: &str) -> Option<Self> {
        let mut parts = state.splitn(4, SEP);
        let phase = Phase::from_tag(parts.next()?)?;
        let original_state = parts.next()?.to_string();
        let carried_letter = parts.next()?.to_string();
        let carried_dir = decode_direction_payload(parts.next()?);
        if parts.next().is_some() {
            return None;
        }
        Some(CompositeState {
            phase,
            original_state,
            carried_letter,
            carried_dir,
        })
    }

    pub fn is_phase(&self, phase: Phase) -> bool {
        self.phase == phase
    }
}

/// `pack_state` as a free function, for call sites that build a
/// `CompositeState` and pack it in one step.
pub fn pack_state(phase: Phase, original_state: &str, carried_letter: &str, carried_dir: &str) -> StateId {
    CompositeState::new(phase, original_state, carried_letter, carried_dir).pack()
}

/// Direction tokens collide with the plain `L`/`R`/`S` literals used
/// elsewhere in the composite state; re-encode them before embedding.
fn encode_direction_payload(dir: &str) -> String {
    match dir {
        "L" => "<".to_string(),
        "R" => ">".to_string(),
        other => other.to_string(),
    }
}

fn decode_direction_payload(dir: &str) -> String {
    match dir {
        "<" => "L".to_string(),
        ">" => "R".to_string(),
        other => other.to_string(),
    }
}

/// Packs one paired tape position into a single composite-cell letter:
/// `[v]a(-)[v]b`.
pub fn pack_cell(a: &str, has_head1: bool, b: &str, has_head2: bool) -> Letter {
    format!(
        "{}{a}{SEP}{}{b}",
        if has_head1 { HEAD_MARK } else { "" },
        if has_head2 { HEAD_MARK } else { "" },
    )
}

/// A decoded composite cell: the tape-1 and tape-2 components and whether
/// either simulated head currently marks this position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub a: Letter,
    pub has_head1: bool,
    pub b: Letter,
    pub has_head2: bool,
}

/// Inverse of [`pack_cell`]. Returns `None` for the guard cell (use
/// [`is_guard`] to check for that first) or any malformed letter.
pub fn unpack_cell(letter: &str) -> Option<Cell> {
    if letter == GUARD {
        return None;
    }
    let (left, right) = letter.split_once(SEP)?;
    let has_head1 = left.starts_with(HEAD_MARK);
    let has_head2 = right.starts_with(HEAD_MARK);
    Some(Cell {
        a: left.strip_prefix(HEAD_MARK).unwrap_or(left).to_string(),
        has_head1,
        b: right.strip_prefix(HEAD_MARK).unwrap_or(right).to_string(),
        has_head2,
    })
}

pub fn is_guard(letter: &str) -> bool {
    letter == GUARD
}

pub fn has_head1(letter: &str) -> bool {
    unpack_cell(letter).is_some_and(|c| c.has_head1)
}

pub fn has_head2(letter: &str) -> bool {
    unpack_cell(letter).is_some_and(|c| c.has_head2)
}

/// Converts a plain direction token into the carried-direction payload
/// stored inside a composite state (see [`CompositeState`]).
pub fn direction_to_payload(dir: Direction) -> Letter {
    dir.token().to_string()
}
