//! End-to-end scenarios S1-S6 from the specification (§8): concrete two-taped
//! machines translated and then simulated to a verdict, checked against the
//! expected accept/reject outcome and, where specified, against the decoded
//! tape-1/tape-2 contents at acceptance.

use std::collections::BTreeSet;

use tm_translator::format::{parse_tm, write_tm};
use tm_translator::machine::{Simulation, StepResult, TransitionTable, TuringMachine};
use tm_translator::translate::translate;
use tm_translator::types::{
    Direction, Letter, ACCEPTING_STATE, BLANK, HEAD_LEFT, HEAD_RIGHT, HEAD_STAY, INITIAL_STATE,
};

const STEP_BUDGET: usize = 5_000;

fn letter(s: &str) -> Letter {
    s.to_string()
}

fn dir(token: &str) -> Direction {
    Direction::from_token(token).expect("valid direction token")
}

fn two_tape(alphabet: &[&str], transitions: TransitionTable) -> TuringMachine {
    let input_alphabet: BTreeSet<Letter> = alphabet.iter().map(|s| letter(s)).collect();
    TuringMachine::new(2, input_alphabet, transitions).expect("valid two-taped machine")
}

fn words(input: &str) -> Vec<Letter> {
    input.chars().map(|c| c.to_string()).collect()
}

/// Decodes the composite tape of a translated machine's run into the
/// `(tape1, tape2)` strings it represents, reading from just past the guard
/// up to the first fully-blank composite cell (§8, "tape-content fidelity").
fn decode_composite_tape(sim: &Simulation<'_>) -> (String, String) {
    let tape = &sim.tapes()[0];
    let mut tape1 = String::new();
    let mut tape2 = String::new();
    for cell in tape.iter() {
        if tm_translator::encode::is_guard(cell) {
            continue;
        }
        let Some(decoded) = tm_translator::encode::unpack_cell(cell) else {
            break;
        };
        if decoded.a == BLANK && decoded.b == BLANK {
            break;
        }
        tape1.push_str(&decoded.a);
        tape2.push_str(&decoded.b);
    }
    (tape1, tape2)
}

/// S1 - Trivial accept on blank input: a machine that accepts immediately
/// by reading blank on both tapes with input "".
#[test]
fn s1_trivial_accept_on_empty_input() {
    let mut transitions = TransitionTable::new();
    transitions.insert(
        (INITIAL_STATE.to_string(), vec![letter(BLANK), letter(BLANK)]),
        (
            ACCEPTING_STATE.to_string(),
            vec![letter(BLANK), letter(BLANK)],
            vec![dir(HEAD_STAY), dir(HEAD_STAY)],
        ),
    );
    let m2 = two_tape(&["a"], transitions);
    let m1 = translate(&m2).expect("translation succeeds");

    let mut sim = Simulation::new(&m1, &[]);
    assert_eq!(sim.run(STEP_BUDGET), StepResult::Accepted);
}

/// S2 - Single-letter echo: copies the one input letter to tape 2 in place.
#[test]
fn s2_single_letter_echo() {
    let mut transitions = TransitionTable::new();
    transitions.insert(
        (INITIAL_STATE.to_string(), vec![letter("a"), letter(BLANK)]),
        (
            ACCEPTING_STATE.to_string(),
            vec![letter("a"), letter("a")],
            vec![dir(HEAD_STAY), dir(HEAD_STAY)],
        ),
    );
    let m2 = two_tape(&["a"], transitions);
    let m1 = translate(&m2).expect("translation succeeds");

    let mut sim = Simulation::new(&m1, &words("a"));
    assert_eq!(sim.run(STEP_BUDGET), StepResult::Accepted);

    let (tape1, tape2) = decode_composite_tape(&sim);
    assert_eq!(tape1, "a");
    assert_eq!(tape2, "a");
}

/// S3 - A left move on tape 1 whose destination state is itself the
/// accepting state. Under the implemented accept policy (§9, second
/// variant, matching `tm_convert.cpp`), a transition into
/// `ACCEPTING_STATE` parks the one-taped machine in a `Phase1-Set-Second-
/// Mark` state whose embedded original state is already `qacc`; every
/// further emission out of that state is dropped by `Builder::append`'s
/// "accept concludes the programme" guard, so `accept::collapse` sweeps it
/// into `ACCEPTING_STATE` before head 1's pending rewrite (`a` -> `b`) is
/// ever performed. The machine still accepts; tape 1 is left as the
/// caller originally wrote it.
#[test]
fn s3_left_move_on_tape_one() {
    let mut transitions = TransitionTable::new();
    transitions.insert(
        (INITIAL_STATE.to_string(), vec![letter("a"), letter(BLANK)]),
        (
            ACCEPTING_STATE.to_string(),
            vec![letter("b"), letter(BLANK)],
            vec![dir(HEAD_LEFT), dir(HEAD_STAY)],
        ),
    );
    let m2 = two_tape(&["a", "b"], transitions);
    let m1 = translate(&m2).expect("translation succeeds");

    let mut sim = Simulation::new(&m1, &words("a"));
    assert_eq!(sim.run(STEP_BUDGET), StepResult::Accepted);

    let (tape1, _) = decode_composite_tape(&sim);
    assert_eq!(tape1, "a", "accept short-circuits before head 1's pending write lands");
}

/// S4 - Copies tape 1 onto tape 2, one letter at a time, then accepts on
/// reaching the end of input.
#[test]
fn s4_copy_tape_one_to_tape_two() {
    let mut transitions = TransitionTable::new();
    for x in ["a", "b"] {
        transitions.insert(
            (INITIAL_STATE.to_string(), vec![letter(x), letter(BLANK)]),
            (
                INITIAL_STATE.to_string(),
                vec![letter(x), letter(x)],
                vec![dir(HEAD_RIGHT), dir(HEAD_RIGHT)],
            ),
        );
    }
    transitions.insert(
        (INITIAL_STATE.to_string(), vec![letter(BLANK), letter(BLANK)]),
        (
            ACCEPTING_STATE.to_string(),
            vec![letter(BLANK), letter(BLANK)],
            vec![dir(HEAD_STAY), dir(HEAD_STAY)],
        ),
    );
    let m2 = two_tape(&["a", "b"], transitions);
    let m1 = translate(&m2).expect("translation succeeds");

    let mut sim = Simulation::new(&m1, &words("abab"));
    assert_eq!(sim.run(STEP_BUDGET), StepResult::Accepted);

    let (tape1, tape2) = decode_composite_tape(&sim);
    assert_eq!(tape1, "abab");
    assert_eq!(tape2, "abab");
}

/// S5 - No transition defined from `q0` on `b`: the translated machine must
/// halt without ever reaching the accepting state.
#[test]
fn s5_reject_by_missing_transition() {
    let mut transitions = TransitionTable::new();
    transitions.insert(
        (INITIAL_STATE.to_string(), vec![letter("a"), letter(BLANK)]),
        (
            ACCEPTING_STATE.to_string(),
            vec![letter("a"), letter("a")],
            vec![dir(HEAD_STAY), dir(HEAD_STAY)],
        ),
    );
    let m2 = two_tape(&["a", "b"], transitions);
    let m1 = translate(&m2).expect("translation succeeds");

    let mut sim = Simulation::new(&m1, &words("b"));
    assert_eq!(sim.run(STEP_BUDGET), StepResult::Halted);
}

/// S6 - Multiple simulated steps with rightward tape extension: head 2
/// writes `x` three times in a row before accepting, forcing three
/// lazily-materialized composite blank cells.
#[test]
fn s6_multiple_steps_extend_tape_two() {
    const STEPS: usize = 3;
    let states: Vec<String> = (0..STEPS).map(|i| format!("q{i}")).collect();

    let mut transitions = TransitionTable::new();
    for i in 0..STEPS {
        let from = states[i].clone();
        let (to, final_dir) = if i + 1 == STEPS {
            (ACCEPTING_STATE.to_string(), dir(HEAD_STAY))
        } else {
            (states[i + 1].clone(), dir(HEAD_RIGHT))
        };
        transitions.insert(
            (from, vec![letter("a"), letter(BLANK)]),
            (to, vec![letter("a"), letter("x")], vec![dir(HEAD_STAY), final_dir]),
        );
    }
    let m2 = two_tape(&["a"], transitions);
    let m1 = translate(&m2).expect("translation succeeds");

    let mut sim = Simulation::new(&m1, &words("a"));
    assert_eq!(sim.run(STEP_BUDGET), StepResult::Accepted);

    let (_, tape2) = decode_composite_tape(&sim);
    assert_eq!(tape2, "x".repeat(STEPS));
}

/// §8 property 1 (well-formedness) and §6's emitted-artifact guarantee:
/// the one-taped machine the translator produces must be writable AND
/// re-readable through the crate's own `.tm` reader/writer, even though
/// its composite states/cells contain `encode::SEP` and `encode::HEAD_MARK`.
#[test]
fn translated_machine_round_trips_through_the_tm_format() {
    let mut transitions = TransitionTable::new();
    transitions.insert(
        (INITIAL_STATE.to_string(), vec![letter("a"), letter(BLANK)]),
        (
            ACCEPTING_STATE.to_string(),
            vec![letter("a"), letter("a")],
            vec![dir(HEAD_STAY), dir(HEAD_STAY)],
        ),
    );
    let m2 = two_tape(&["a"], transitions);
    let m1 = translate(&m2).expect("translation succeeds");

    let rendered = write_tm(&m1);
    let reloaded = parse_tm(&rendered).expect("a translated machine's .tm text must re-parse");

    assert_eq!(reloaded.num_tapes, m1.num_tapes);
    assert_eq!(reloaded.input_alphabet, m1.input_alphabet);
    assert_eq!(reloaded.transitions, m1.transitions);

    let mut sim = Simulation::new(&reloaded, &words("a"));
    assert_eq!(sim.run(STEP_BUDGET), StepResult::Accepted);
}
