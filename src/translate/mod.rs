//! Orchestrates the 2TM→1TM construction (§4): input conditioning, the
//! per-step simulation phase chain, the tape-extension closure, the
//! empty-input corner case, and the final accept-state collapse, in that
//! order. A direct, phase-by-phase port of `tm_convert()`, restructured
//! around typed worklists (`Seed`, `HashSet<StateId>`,
//! `HashSet<(StateId, Letter)>`) instead of re-scanning emitted state
//! strings with substring search — see DESIGN.md.

mod accept;
mod closure;
mod empty_input;
mod input_conditioning;
mod simulation;

use std::collections::HashMap;

use crate::encode::CompositeState;
use crate::error::TranslateError;
use crate::machine::{TransitionTable, TuringMachine};
use crate::types::{Direction, Letter, StateId, ACCEPTING_STATE, BLANK};

/// One transition of the two-taped machine, unpacked into its individual
/// fields for convenient reuse across the phase builders.
#[derive(Debug, Clone)]
pub(crate) struct Seed {
    pub q: StateId,
    pub a: Letter,
    pub b: Letter,
    pub q2: StateId,
    pub a2: Letter,
    pub b2: Letter,
    pub d1: Direction,
    pub d2: Direction,
}

/// Accumulates the one-taped transition table under construction.
pub(crate) struct Builder {
    pub transitions: TransitionTable,
}

impl Builder {
    fn new() -> Self {
        Builder {
            transitions: HashMap::new(),
        }
    }

    /// Inserts one 1TM transition — the single place the "accept concludes
    /// the programme" rule is enforced: if `from_state` already embeds a
    /// completed original-machine acceptance and `to_state` isn't itself
    /// the plain accepting state, the insert is dropped. This is what lets
    /// every other pass build blindly and leaves the cleanup to
    /// `accept::collapse`.
    pub fn append(
        &mut self,
        from_state: &str,
        from_letter: &str,
        to_state: &str,
        to_letter: &str,
        direction: Direction,
    ) {
        if to_state != ACCEPTING_STATE {
            if let Some(cs) = CompositeState::unpack(from_state) {
                if cs.original_state == ACCEPTING_STATE {
                    return;
                }
            }
        }
        self.transitions.insert(
            (from_state.to_string(), vec![from_letter.to_string()]),
            (to_state.to_string(), vec![to_letter.to_string()], vec![direction]),
        );
    }
}

/// Compiles a two-taped machine into a behaviorally equivalent one-taped
/// machine (§4).
pub fn translate(two_tape: &TuringMachine) -> Result<TuringMachine, TranslateError> {
    if two_tape.num_tapes != 2 {
        return Err(TranslateError::NotTwoTaped(two_tape.num_tapes));
    }

    let seeds = collect_seeds(two_tape)?;
    log::debug!("collected {} seed transition(s) from the two-taped machine", seeds.len());

    let mut alphabet_with_blank = two_tape.working_alphabet();
    alphabet_with_blank.push(BLANK.to_string());
    log::debug!("working alphabet (with blank) has {} letter(s)", alphabet_with_blank.len());

    let mut builder = Builder::new();
    input_conditioning::build(&mut builder, &two_tape.input_alphabet);
    log::debug!("input conditioning emitted {} transition(s)", builder.transitions.len());

    simulation::build(&mut builder, &seeds, &alphabet_with_blank);
    log::debug!("simulation phase chain emitted {} transition(s) total", builder.transitions.len());

    closure::extend_tape(&mut builder);
    empty_input::build(&mut builder, two_tape);
    accept::collapse(&mut builder, &alphabet_with_blank);
    log::debug!("translation complete: {} transition(s)", builder.transitions.len());

    Ok(TuringMachine::from_parts(
        1,
        two_tape.input_alphabet.clone(),
        builder.transitions,
    ))
}

fn collect_seeds(two_tape: &TuringMachine) -> Result<Vec<Seed>, TranslateError> {
    let mut seeds = Vec::with_capacity(two_tape.transitions.len());
    for ((q, read), (q2, write, dirs)) in &two_tape.transitions {
        if read.len() != 2 {
            return Err(TranslateError::MalformedArity(read.len()));
        }
        if write.len() != 2 || dirs.len() != 2 {
            return Err(TranslateError::MalformedArity(write.len().max(dirs.len())));
        }
        seeds.push(Seed {
            q: q.clone(),
            a: read[0].clone(),
            b: read[1].clone(),
            q2: q2.clone(),
            a2: write[0].clone(),
            b2: write[1].clone(),
            d1: dirs[0],
            d2: dirs[1],
        });
    }
    Ok(seeds)
}
