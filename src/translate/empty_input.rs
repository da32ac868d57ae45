//! The empty-input corner case (§4.5): `input_conditioning` only walks a
//! letter from the input alphabet onto the tape; if the original machine
//! is willing to take its very first step reading blank on both tapes,
//! the one-taped machine needs a direct path from `q0` into the
//! simulation phase chain that never depended on seeing an input letter
//! at all.
//!
//! A direct port of the "Empty input corner case" block in
//! `tm_convert.cpp`. The intermediate state it introduces is deliberately
//! not a [`crate::encode::CompositeState`] — it has no counterpart phase
//! tag in the original source either, just a throwaway label built from
//! `INITIAL_STATE` twice over — so it is constructed as a plain string.

use crate::encode::{pack_state, Phase, GUARD, SEP};
use crate::machine::TuringMachine;
use crate::types::{Direction, BLANK, INITIAL_STATE};

use super::Builder;

pub(super) fn build(builder: &mut Builder, two_tape: &TuringMachine) {
    let empty_cells = vec![BLANK.to_string(), BLANK.to_string()];
    if two_tape
        .lookup(INITIAL_STATE, &empty_cells)
        .is_none()
    {
        return;
    }

    let corner_state = format!("{INITIAL_STATE}{SEP}{INITIAL_STATE}{SEP}{BLANK}{SEP}{BLANK}");
    builder.append(INITIAL_STATE, BLANK, &corner_state, GUARD, Direction::Right);

    let resume_state = pack_state(Phase::Phase1FindSecond, INITIAL_STATE, BLANK, BLANK);
    let doubly_marked = crate::encode::pack_cell(BLANK, true, BLANK, true);
    builder.append(&corner_state, BLANK, &resume_state, &doubly_marked, Direction::Stay);
}
