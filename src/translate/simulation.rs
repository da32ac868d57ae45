//! The simulation-phase builder (§4.3): the ten-phase sub-automaton that
//! simulates one `M2` step per original transition, plus the closures
//! that chain those phases together over `Γ∪{blank}`.
//!
//! A direct port of the six loops in `tm_convert.cpp` between "Phase 1 -
//! Transition translation" and "Phase 1 - Find second head", restructured
//! around typed dedup sets computed from the `Seed` list rather than
//! re-scanning `ottm_transitions` for states matching a phase tag —
//! see DESIGN.md.

use std::collections::HashSet;

use crate::encode::{pack_cell, pack_state, Phase, GUARD};
use crate::types::{Direction, Letter, StateId, BLANK};

use super::{Builder, Seed};

/// `(original destination state, carried letter, carried direction)` — the
/// key shared by the `Phase1-Set-Second-Mark` → `Phase1-Back` →
/// `Phase2-Find-First` family: one triple per original transition.
type TransitionKey = (StateId, Letter, Direction);

pub(super) fn build(builder: &mut Builder, seeds: &[Seed], alphabet_with_blank: &[Letter]) {
    let transition_keys = translate_seeds(builder, seeds, alphabet_with_blank);
    set_second_mark(builder, &transition_keys, alphabet_with_blank);
    phase1_back(builder, &transition_keys, alphabet_with_blank);
    let set_first_mark_keys = phase2_find_first(builder, &transition_keys, alphabet_with_blank);
    let phase2_back_keys = set_first_mark(builder, &set_first_mark_keys, alphabet_with_blank);
    phase2_backing(builder, &phase2_back_keys, alphabet_with_blank);

    let mut find_second_keys: HashSet<(StateId, Letter)> = seeds
        .iter()
        .map(|seed| (seed.q.clone(), seed.a.clone()))
        .collect();
    find_second_keys.extend(phase2_back_keys.iter().cloned());
    find_second_resume(builder, &find_second_keys, alphabet_with_blank);
}

/// Phase 1 - Transition translation: one pair of transitions per original
/// transition and per letter tape 1 could be holding, carrying the
/// original transition's consequences (`q2`, `a2`, `d1`) into the next
/// phase's state.
fn translate_seeds(
    builder: &mut Builder,
    seeds: &[Seed],
    alphabet_with_blank: &[Letter],
) -> HashSet<TransitionKey> {
    let mut keys = HashSet::new();
    for seed in seeds {
        let state_before = pack_state(Phase::Phase1FindSecond, &seed.q, &seed.a, BLANK);
        let state_after = pack_state(Phase::Phase1SetSecondMark, &seed.q2, &seed.a2, seed.d1.token());
        keys.insert((seed.q2.clone(), seed.a2.clone(), seed.d1));

        for letter_on_first in alphabet_with_blank {
            let read = pack_cell(letter_on_first, false, &seed.b, true);
            let write = pack_cell(letter_on_first, false, &seed.b2, false);
            builder.append(&state_before, &read, &state_after, &write, seed.d2);

            let read_h1 = pack_cell(letter_on_first, true, &seed.b, true);
            let write_h1 = pack_cell(letter_on_first, true, &seed.b2, false);
            builder.append(&state_before, &read_h1, &state_after, &write_h1, seed.d2);
        }
    }
    keys
}

/// Phase 1 - Setting mark of second head: from each `Set-Second-Mark`
/// state, mark the cell currently under head 2 and back up one phase.
fn set_second_mark(builder: &mut Builder, keys: &HashSet<TransitionKey>, alphabet_with_blank: &[Letter]) {
    for (q2, a2, d1) in keys {
        let current_state = pack_state(Phase::Phase1SetSecondMark, q2, a2, d1.token());
        let state_after = pack_state(Phase::Phase1Back, q2, a2, d1.token());

        for letter_on_first in alphabet_with_blank {
            for letter_on_second in alphabet_with_blank {
                let read = pack_cell(letter_on_first, false, letter_on_second, false);
                let write = pack_cell(letter_on_first, false, letter_on_second, true);
                builder.append(&current_state, &read, &state_after, &write, Direction::Left);

                let read_h1 = pack_cell(letter_on_first, true, letter_on_second, false);
                let write_h1 = pack_cell(letter_on_first, true, letter_on_second, true);
                builder.append(&current_state, &read_h1, &state_after, &write_h1, Direction::Left);
            }
        }
    }
}

/// Phase 1 - Backing: walk left, leaving every cell untouched, until the
/// guard is seen; then hand off to Phase 2.
fn phase1_back(builder: &mut Builder, keys: &HashSet<TransitionKey>, alphabet_with_blank: &[Letter]) {
    let backing_keys: Vec<(StateId, Letter, String)> = keys
        .iter()
        .map(|(q2, a2, d1)| (q2.clone(), a2.clone(), d1.token().to_string()))
        .collect();
    backing_self_loop(builder, &backing_keys, alphabet_with_blank, Phase::Phase1Back, false);
    for (q2, a2, d1) in keys {
        let current_state = pack_state(Phase::Phase1Back, q2, a2, d1.token());
        let state_find_head1 = pack_state(Phase::Phase2FindFirst, q2, a2, d1.token());
        builder.append(&current_state, GUARD, &state_find_head1, GUARD, Direction::Right);
    }
}

/// Shared shape of "walk one direction leaving the tape untouched until
/// the guard": self-loops over every cell not carrying the mark that
/// matters for this backward walk, used identically by `Phase1-Back` and
/// `Phase2-Back`. `mark_second` selects which head's mark the self-loop
/// additionally preserves verbatim (`Phase2-Back` preserves head 2's mark
/// while walking past it; `Phase1-Back` preserves head 1's). `keys` carries
/// each state's fourth (carried-direction-or-placeholder) field verbatim,
/// since `Phase2-Back` states carry a plain letter there, not a direction.
fn backing_self_loop(
    builder: &mut Builder,
    keys: &[(StateId, Letter, String)],
    alphabet_with_blank: &[Letter],
    phase: Phase,
    mark_second: bool,
) {
    for (q2, carried_letter, carried_fourth) in keys {
        let current_state = pack_state(phase, q2, carried_letter, carried_fourth);
        for letter_on_first in alphabet_with_blank {
            for letter_on_second in alphabet_with_blank {
                let cell = pack_cell(letter_on_first, false, letter_on_second, mark_second);
                builder.append(&current_state, &cell, &current_state, &cell, Direction::Left);

                let cell_marked = if mark_second {
                    pack_cell(letter_on_first, false, letter_on_second, false)
                } else {
                    pack_cell(letter_on_first, true, letter_on_second, false)
                };
                builder.append(&current_state, &cell_marked, &current_state, &cell_marked, Direction::Left);
            }
        }
    }
}

/// Phase 2 - Find first head: walk right until head 1's mark is seen,
/// then overwrite the cell with the carried letter and hand off to
/// `Phase2-Set-First-Mark` with the carried direction restored.
fn phase2_find_first(
    builder: &mut Builder,
    keys: &HashSet<TransitionKey>,
    alphabet_with_blank: &[Letter],
) -> HashSet<StateId> {
    let mut set_first_mark_states = HashSet::new();
    for (q2, a2, d1) in keys {
        let current_state = pack_state(Phase::Phase2FindFirst, q2, a2, d1.token());
        let state_after = pack_state(Phase::Phase2SetFirstMark, q2, BLANK, BLANK);
        set_first_mark_states.insert(q2.clone());

        for letter_on_first in alphabet_with_blank {
            for letter_on_second in alphabet_with_blank {
                let cell = pack_cell(letter_on_first, false, letter_on_second, false);
                let cell_second_head = pack_cell(letter_on_first, false, letter_on_second, true);
                builder.append(&current_state, &cell, &current_state, &cell, Direction::Right);
                builder.append(&current_state, &cell_second_head, &current_state, &cell_second_head, Direction::Right);

                let read = pack_cell(letter_on_first, true, letter_on_second, false);
                let write = pack_cell(a2, false, letter_on_second, false);
                builder.append(&current_state, &read, &state_after, &write, *d1);

                let read_second_head = pack_cell(letter_on_first, true, letter_on_second, true);
                let write_second_head = pack_cell(a2, false, letter_on_second, true);
                builder.append(&current_state, &read_second_head, &state_after, &write_second_head, *d1);
            }
        }
    }
    set_first_mark_states
}

/// Phase 2 - Mark first head: re-mark the cell head 1 just overwrote
/// (remembering its own original letter in the new state) and start
/// walking back.
fn set_first_mark(
    builder: &mut Builder,
    states: &HashSet<StateId>,
    alphabet_with_blank: &[Letter],
) -> HashSet<(StateId, Letter)> {
    let mut phase2_back_keys = HashSet::new();
    for q2 in states {
        let current_state = pack_state(Phase::Phase2SetFirstMark, q2, BLANK, BLANK);

        for letter_on_first in alphabet_with_blank {
            let state_after = pack_state(Phase::Phase2Back, q2, letter_on_first, BLANK);
            phase2_back_keys.insert((q2.clone(), letter_on_first.clone()));

            for letter_on_second in alphabet_with_blank {
                let cell = pack_cell(letter_on_first, false, letter_on_second, false);
                let write = pack_cell(letter_on_first, true, letter_on_second, false);
                builder.append(&current_state, &cell, &state_after, &write, Direction::Left);

                let cell_second_head = pack_cell(letter_on_first, false, letter_on_second, true);
                let write_second_head = pack_cell(letter_on_first, true, letter_on_second, true);
                builder.append(&current_state, &cell_second_head, &state_after, &write_second_head, Direction::Left);
            }
        }
    }
    phase2_back_keys
}

/// Phase 2 - Backing: walk left, leaving every cell untouched, until the
/// guard is seen, then resume `Phase1-Find-Second` from the other side.
fn phase2_backing(
    builder: &mut Builder,
    keys: &HashSet<(StateId, Letter)>,
    alphabet_with_blank: &[Letter],
) {
    let backing_keys: Vec<(StateId, Letter, String)> = keys
        .iter()
        .map(|(q2, letter1)| (q2.clone(), letter1.clone(), BLANK.to_string()))
        .collect();
    backing_self_loop(builder, &backing_keys, alphabet_with_blank, Phase::Phase2Back, true);

    for (q2, letter1) in keys {
        let current_state = pack_state(Phase::Phase2Back, q2, letter1, BLANK);
        let state_find_head2 = pack_state(Phase::Phase1FindSecond, q2, letter1, BLANK);
        builder.append(&current_state, GUARD, &state_find_head2, GUARD, Direction::Right);
    }
}

/// Phase 1 - Find second head (resume): walk right past everything but
/// head 2's mark, which either belongs to a known original transition
/// (handled by `translate_seeds`) or leaves `M2` undefined here, which is
/// exactly the rejecting behavior §7 calls for.
fn find_second_resume(
    builder: &mut Builder,
    keys: &HashSet<(StateId, Letter)>,
    alphabet_with_blank: &[Letter],
) {
    for (q, a) in keys {
        let current_state = pack_state(Phase::Phase1FindSecond, q, a, BLANK);
        for letter_on_first in alphabet_with_blank {
            for letter_on_second in alphabet_with_blank {
                let cell = pack_cell(letter_on_first, false, letter_on_second, false);
                builder.append(&current_state, &cell, &current_state, &cell, Direction::Right);

                let cell_first_head = pack_cell(letter_on_first, true, letter_on_second, false);
                builder.append(&current_state, &cell_first_head, &current_state, &cell_first_head, Direction::Right);
            }
        }
    }
}
