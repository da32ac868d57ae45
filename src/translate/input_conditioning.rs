//! Input conditioning (§4.2): before the simulation phase chain can begin
//! simulating `M2`'s first step, the single input letter under `q0` must
//! be walked rightward past a guard cell and re-written as a doubly-marked
//! composite cell — `[v]a(-)[v]_` — with both simulated heads sitting on
//! column zero of tape 1.
//!
//! A direct port of the "Preparing input" loop in `tm_convert.cpp`.

use std::collections::BTreeSet;

use crate::encode::{pack_cell, pack_state, Phase, GUARD};
use crate::types::{Direction, Letter, BLANK, INITIAL_STATE};

use super::Builder;

pub(super) fn build(builder: &mut Builder, input_alphabet: &BTreeSet<Letter>) {
    for orig_letter in input_alphabet {
        let phase_start = pack_state(Phase::Phase0Start, INITIAL_STATE, BLANK, BLANK);
        builder.append(INITIAL_STATE, orig_letter, &phase_start, orig_letter, Direction::Stay);

        let phase_input = pack_state(Phase::Phase0Input, INITIAL_STATE, orig_letter, BLANK);
        builder.append(&phase_start, orig_letter, &phase_input, GUARD, Direction::Right);

        for letter_to_see in input_alphabet {
            let phase_next_input = pack_state(Phase::Phase0Input, INITIAL_STATE, letter_to_see, BLANK);
            builder.append(
                &phase_input,
                letter_to_see,
                &phase_next_input,
                &pack_cell(orig_letter, false, BLANK, false),
                Direction::Right,
            );
        }

        let phase_go_back = pack_state(Phase::Phase0Back, INITIAL_STATE, BLANK, BLANK);
        let carried = pack_cell(orig_letter, false, BLANK, false);
        builder.append(&phase_input, BLANK, &phase_go_back, &carried, Direction::Left);
        builder.append(&phase_go_back, &carried, &phase_go_back, &carried, Direction::Left);

        let phase_setup_marks = pack_state(Phase::Phase0SetupMarks, INITIAL_STATE, BLANK, BLANK);
        builder.append(&phase_go_back, GUARD, &phase_setup_marks, GUARD, Direction::Right);

        let phase_start_work = pack_state(Phase::Phase1FindSecond, INITIAL_STATE, orig_letter, BLANK);
        builder.append(
            &phase_setup_marks,
            &carried,
            &phase_start_work,
            &pack_cell(orig_letter, true, BLANK, true),
            Direction::Stay,
        );
    }
}
