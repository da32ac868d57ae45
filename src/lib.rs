//! Compiles a deterministic two-tape Turing machine into a behaviorally
//! equivalent one-tape Turing machine.
//!
//! `translate::translate` is the entry point. `machine` and `format` are
//! the external collaborators it builds on: a generic multi-tape
//! `TuringMachine` plus a `.tm` file reader/writer.

pub mod encode;
pub mod error;
pub mod format;
pub mod machine;
pub mod translate;
pub mod types;

pub use encode::{pack_cell, pack_state, unpack_cell, CompositeState, Phase};
pub use error::TranslateError;
pub use format::{load_tm, parse_tm, save_tm, write_tm};
pub use machine::{Simulation, StepResult, TuringMachine};
pub use translate::translate;
pub use types::{Direction, TuringMachineError};
