//! The `TuringMachine` data structure: a k-tape transition table plus the
//! bookkeeping the rest of the crate treats as an external collaborator
//! (`working_alphabet()`, construction from a transition map). Also
//! provides `Simulation`, a generic stepper used by the test suite and the
//! CLI's `--debug` mode to run a `TuringMachine` of any tape arity.

use std::collections::{BTreeSet, HashMap};

use crate::types::{validate_symbol, Direction, Letter, StateId, TuringMachineError};
use crate::types::{ACCEPTING_STATE, BLANK, INITIAL_STATE};

/// The right-hand side of a transition: the next state, the letters
/// written to each tape, and the direction each head moves.
pub type TransitionOutput = (StateId, Vec<Letter>, Vec<Direction>);

/// `δ`: a mapping from (state, letters read on each tape) to
/// (next state, letters written, head motions). A `HashMap` rather than a
/// list of rules — at most one transition is defined per key.
pub type TransitionTable = HashMap<(StateId, Vec<Letter>), TransitionOutput>;

/// A deterministic k-tape Turing machine: `(num_tapes, input_alphabet, transitions)`.
#[derive(Debug, Clone)]
pub struct TuringMachine {
    pub num_tapes: usize,
    pub input_alphabet: BTreeSet<Letter>,
    pub transitions: TransitionTable,
}

impl TuringMachine {
    /// Builds a machine from its three defining parts, validating every
    /// symbol and transition arity along the way.
    pub fn new(
        num_tapes: usize,
        input_alphabet: BTreeSet<Letter>,
        transitions: TransitionTable,
    ) -> Result<Self, TuringMachineError> {
        for letter in &input_alphabet {
            validate_symbol(letter)?;
        }
        for ((state, read), (next_state, write, dirs)) in &transitions {
            validate_symbol(state)?;
            validate_symbol(next_state)?;
            for letter in read.iter().chain(write.iter()) {
                validate_symbol(letter)?;
            }
            if read.len() != num_tapes || write.len() != num_tapes || dirs.len() != num_tapes {
                return Err(TuringMachineError::ArityMismatch {
                    expected: num_tapes,
                    got: read.len().max(write.len()).max(dirs.len()),
                });
            }
        }
        Ok(TuringMachine {
            num_tapes,
            input_alphabet,
            transitions,
        })
    }

    /// Every letter appearing anywhere in the transition table (read or
    /// written) plus the input alphabet, excluding `BLANK`. This is `Γ`.
    pub fn working_alphabet(&self) -> Vec<Letter> {
        let mut alphabet: BTreeSet<Letter> = self.input_alphabet.clone();
        for ((_, read), (_, write, _)) in &self.transitions {
            for letter in read.iter().chain(write.iter()) {
                alphabet.insert(letter.clone());
            }
        }
        alphabet.remove(BLANK);
        alphabet.into_iter().collect()
    }

    /// Looks up the transition for `(state, letters read)`, if any.
    pub fn lookup(&self, state: &str, read: &[Letter]) -> Option<&TransitionOutput> {
        self.transitions.get(&(state.to_string(), read.to_vec()))
    }

    /// Builds a machine without running [`TuringMachine::new`]'s symbol
    /// validation. `translate::translate` is the only caller: the
    /// construction algorithm is correct by construction (every emitted
    /// symbol already satisfies [`validate_symbol`]), so skipping the
    /// redundant pass over a potentially large transition table is just
    /// avoided work, not a safety relaxation.
    pub(crate) fn from_parts(
        num_tapes: usize,
        input_alphabet: BTreeSet<Letter>,
        transitions: TransitionTable,
    ) -> Self {
        TuringMachine {
            num_tapes,
            input_alphabet,
            transitions,
        }
    }
}

/// The outcome of a single `Simulation::step()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    Continue,
    Accepted,
    Halted,
}

/// A running instance of a `TuringMachine`: its tapes, head positions, and
/// current state. Generalized over tape count so the same type can drive
/// both the 2TM under test and the 1TM the translator produces.
#[derive(Debug, Clone)]
pub struct Simulation<'m> {
    machine: &'m TuringMachine,
    state: StateId,
    tapes: Vec<Vec<Letter>>,
    heads: Vec<usize>,
    steps_taken: usize,
}

impl<'m> Simulation<'m> {
    /// Starts a simulation on `input`, one letter per cell of tape 0; all
    /// other tapes start blank. The head of every tape starts at position 0.
    pub fn new(machine: &'m TuringMachine, input: &[Letter]) -> Self {
        let mut tapes = vec![vec![BLANK.to_string()]; machine.num_tapes];
        if machine.num_tapes > 0 {
            tapes[0] = if input.is_empty() {
                vec![BLANK.to_string()]
            } else {
                input.to_vec()
            };
        }
        Simulation {
            machine,
            state: INITIAL_STATE.to_string(),
            tapes,
            heads: vec![0; machine.num_tapes],
            steps_taken: 0,
        }
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// The current contents of every tape, one `Vec<Letter>` per tape.
    pub fn tapes(&self) -> &[Vec<Letter>] {
        &self.tapes
    }

    pub fn head_positions(&self) -> &[usize] {
        &self.heads
    }

    fn symbols_under_heads(&self) -> Vec<Letter> {
        self.tapes
            .iter()
            .zip(&self.heads)
            .map(|(tape, &h)| tape[h].clone())
            .collect()
    }

    /// Executes one transition, extending tapes with blanks as heads move
    /// past either end.
    pub fn step(&mut self) -> StepResult {
        if self.state == ACCEPTING_STATE {
            return StepResult::Accepted;
        }
        let read = self.symbols_under_heads();
        let Some((next_state, write, dirs)) = self.machine.lookup(&self.state, &read) else {
            return StepResult::Halted;
        };
        let (next_state, write, dirs) = (next_state.clone(), write.clone(), dirs.clone());

        for i in 0..self.machine.num_tapes {
            self.tapes[i][self.heads[i]] = write[i].clone();
            match dirs[i] {
                Direction::Left => {
                    if self.heads[i] == 0 {
                        self.tapes[i].insert(0, BLANK.to_string());
                    } else {
                        self.heads[i] -= 1;
                    }
                }
                Direction::Right => {
                    self.heads[i] += 1;
                    if self.heads[i] == self.tapes[i].len() {
                        self.tapes[i].push(BLANK.to_string());
                    }
                }
                Direction::Stay => {}
            }
        }

        self.state = next_state;
        self.steps_taken += 1;
        if self.state == ACCEPTING_STATE {
            StepResult::Accepted
        } else {
            StepResult::Continue
        }
    }

    /// Runs until acceptance, halting-without-accepting, or `max_steps` is
    /// exhausted (treated as divergence by the caller).
    pub fn run(&mut self, max_steps: usize) -> StepResult {
        for _ in 0..max_steps {
            match self.step() {
                StepResult::Continue => continue,
                terminal => return terminal,
            }
        }
        StepResult::Continue
    }

    /// Tape contents joined into a single string per tape, for display.
    pub fn tapes_as_strings(&self) -> Vec<String> {
        self.tapes.iter().map(|t| t.concat()).collect()
    }
}
