//! Accept handling (§4.4): every simulation-phase state whose embedded
//! `OriginalState` is the accepting state is a dead end — the "accept
//! concludes the programme" guard in `Builder::append` refused to let
//! construction continue past it. This pass gives each such state an
//! explicit, final sweep into the one-taped machine's own accepting state,
//! regardless of what the tape under it looks like.
//!
//! A direct port of the "Accept translation" loop in `tm_convert.cpp`,
//! scanning a snapshot of already-emitted destination states rather than
//! deriving the accepting subset combinatorially, since it is cheap and
//! removes any doubt that every path reaching acceptance is covered.

use std::collections::HashSet;

use crate::encode::{pack_cell, CompositeState};
use crate::types::{Direction, Letter, StateId, ACCEPTING_STATE, BLANK};

use super::Builder;

pub(super) fn collapse(builder: &mut Builder, alphabet_with_blank: &[Letter]) {
    let accepting_states: HashSet<StateId> = builder
        .transitions
        .values()
        .map(|(to_state, _, _)| to_state.clone())
        .filter(|state| {
            state != ACCEPTING_STATE
                && CompositeState::unpack(state).is_some_and(|cs| cs.original_state == ACCEPTING_STATE)
        })
        .collect();

    for state in &accepting_states {
        builder.append(state, BLANK, ACCEPTING_STATE, BLANK, Direction::Stay);

        for letter_on_first in alphabet_with_blank {
            for letter_on_second in alphabet_with_blank {
                for has_head1 in [false, true] {
                    for has_head2 in [false, true] {
                        let cell = pack_cell(letter_on_first, has_head1, letter_on_second, has_head2);
                        builder.append(state, &cell, ACCEPTING_STATE, &cell, Direction::Stay);
                    }
                }
            }
        }
    }
}
