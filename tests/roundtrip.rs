//! Property test for the round-trip invariant in §8: for a small random
//! two-taped machine and a small random input word, the translated
//! one-taped machine's accept/reject verdict must agree with directly
//! simulating the two-taped machine, within a step budget proportional to
//! `|w|^2`.

use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;

use tm_translator::machine::{Simulation, StepResult, TransitionTable, TuringMachine};
use tm_translator::translate::translate;
use tm_translator::types::{Direction, Letter, ACCEPTING_STATE, BLANK, INITIAL_STATE};

const ALPHABET_POOL: [&str; 3] = ["a", "b", "c"];
const EXTRA_STATE_POOL: [&str; 2] = ["q1", "q2"];
const DIRECTIONS: [Direction; 3] = [Direction::Left, Direction::Right, Direction::Stay];

/// One raw, not-yet-validated transition edge, expressed as small indices
/// so proptest can shrink it; mapped onto actual states/letters in
/// [`build_machine`].
#[derive(Debug, Clone)]
struct RawEdge {
    from_state: u8,
    read_a: u8,
    read_b: u8,
    to_state: u8,
    write_a: u8,
    write_b: u8,
    dir_a: u8,
    dir_b: u8,
}

fn raw_edge_strategy() -> impl Strategy<Value = RawEdge> {
    (
        any::<u8>(),
        any::<u8>(),
        any::<u8>(),
        any::<u8>(),
        any::<u8>(),
        any::<u8>(),
        any::<u8>(),
        any::<u8>(),
    )
        .prop_map(
            |(from_state, read_a, read_b, to_state, write_a, write_b, dir_a, dir_b)| RawEdge {
                from_state,
                read_a,
                read_b,
                to_state,
                write_a,
                write_b,
                dir_a,
                dir_b,
            },
        )
}

/// Builds a small, valid two-taped `TuringMachine` from the raw edges and a
/// chosen alphabet/state-set size. `sigma_size` in `1..=3`, `extra_states`
/// in `0..=2` (states are always `q0`, the chosen extras, and `qacc`).
fn build_machine(sigma_size: usize, extra_states: usize, edges: &[RawEdge]) -> TuringMachine {
    let sigma: Vec<Letter> = ALPHABET_POOL[..sigma_size].iter().map(|s| s.to_string()).collect();
    let sigma_with_blank: Vec<Letter> = sigma.iter().cloned().chain([BLANK.to_string()]).collect();

    let mut non_accepting_states: Vec<String> = vec![INITIAL_STATE.to_string()];
    non_accepting_states.extend(EXTRA_STATE_POOL[..extra_states].iter().map(|s| s.to_string()));
    let mut all_states = non_accepting_states.clone();
    all_states.push(ACCEPTING_STATE.to_string());

    let mut transitions: TransitionTable = HashMap::new();
    for edge in edges {
        let from = &non_accepting_states[edge.from_state as usize % non_accepting_states.len()];
        let a = &sigma_with_blank[edge.read_a as usize % sigma_with_blank.len()];
        let b = &sigma_with_blank[edge.read_b as usize % sigma_with_blank.len()];
        let to = &all_states[edge.to_state as usize % all_states.len()];
        let a2 = &sigma_with_blank[edge.write_a as usize % sigma_with_blank.len()];
        let b2 = &sigma_with_blank[edge.write_b as usize % sigma_with_blank.len()];
        let d1 = DIRECTIONS[edge.dir_a as usize % DIRECTIONS.len()];
        let d2 = DIRECTIONS[edge.dir_b as usize % DIRECTIONS.len()];

        transitions.insert(
            (from.clone(), vec![a.clone(), b.clone()]),
            (to.clone(), vec![a2.clone(), b2.clone()], vec![d1, d2]),
        );
    }

    let input_alphabet: BTreeSet<Letter> = sigma.into_iter().collect();
    TuringMachine::new(2, input_alphabet, transitions).expect("generated machine is always valid")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn translated_verdict_matches_direct_simulation(
        sigma_size in 1usize..=3,
        extra_states in 0usize..=2,
        edges in proptest::collection::vec(raw_edge_strategy(), 0..12),
        input_len in 0usize..=6,
        input_picks in proptest::collection::vec(any::<u8>(), 0..6),
    ) {
        let two_tape = build_machine(sigma_size, extra_states, &edges);
        let sigma: Vec<Letter> = ALPHABET_POOL[..sigma_size].iter().map(|s| s.to_string()).collect();
        let input: Vec<Letter> = input_picks
            .iter()
            .take(input_len)
            .map(|pick| sigma[*pick as usize % sigma.len()].clone())
            .collect();

        let direct_budget = 200;
        let mut direct_sim = Simulation::new(&two_tape, &input);
        let direct_verdict = direct_sim.run(direct_budget);

        // Inconclusive within the direct budget: nothing to compare against.
        if direct_verdict == StepResult::Continue {
            return Ok(());
        }

        // Each original step costs the one-taped machine O(current tape
        // length) steps, and that length is bounded by the input plus the
        // number of original steps actually taken (every original step
        // extends a tape by at most one cell). Scaling off the *observed*
        // `direct_sim.steps_taken()` rather than `|w|^2` alone keeps the
        // translated budget generous even for machines that accept only
        // after many original steps on a short input.
        let one_tape = translate(&two_tape).expect("translation always succeeds on a two-taped machine");
        let direct_steps = direct_sim.steps_taken();
        let tape_bound = input.len() + direct_steps + 1;
        let translated_budget = 100 * (direct_steps + 1) * tape_bound + 500;
        let mut translated_sim = Simulation::new(&one_tape, &input);
        let translated_verdict = translated_sim.run(translated_budget);

        match direct_verdict {
            StepResult::Accepted => prop_assert_eq!(translated_verdict, StepResult::Accepted),
            StepResult::Halted => prop_assert_ne!(translated_verdict, StepResult::Accepted),
            StepResult::Continue => unreachable!(),
        }
    }
}
