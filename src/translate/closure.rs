//! The tape-extension closure (§2, "Closure/extension pass"): lets every
//! simulation-phase state sit quietly on a fresh blank cell instead of
//! running off the edge of a tape that hasn't grown far enough yet, by
//! giving each such state a self-loop that writes a fresh paired blank
//! cell in place.
//!
//! A direct port of the "Extending Blanks" loop in `tm_convert.cpp`,
//! scanning a snapshot of the states already emitted by `simulation`
//! rather than re-deriving them combinatorially — see §5 of SPEC_FULL.md.

use std::collections::HashSet;

use crate::encode::{pack_cell, CompositeState, Phase};
use crate::types::{Direction, StateId, BLANK};

use super::Builder;

const SIMULATION_PHASES: [Phase; 6] = [
    Phase::Phase1FindSecond,
    Phase::Phase1SetSecondMark,
    Phase::Phase1Back,
    Phase::Phase2FindFirst,
    Phase::Phase2SetFirstMark,
    Phase::Phase2Back,
];

pub(super) fn extend_tape(builder: &mut Builder) {
    let states: HashSet<StateId> = builder
        .transitions
        .keys()
        .map(|(state, _)| state.clone())
        .filter(|state| {
            CompositeState::unpack(state).is_some_and(|cs| SIMULATION_PHASES.contains(&cs.phase))
        })
        .collect();

    let blank_cell = pack_cell(BLANK, false, BLANK, false);
    for state in &states {
        builder.append(state, BLANK, state, &blank_cell, Direction::Stay);
    }
}
