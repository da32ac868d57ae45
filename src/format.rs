//! Reader/writer for the `.tm` file format: a flat transition table, not a
//! nested program description. One machine per file:
//!
//! ```text
//! tapes 2
//! alphabet a b
//! q0 a _ -> q1 a a R S
//! q1 a a -> qacc a a S S
//! ```
//!
//! `#`-prefixed and blank lines are ignored. Every other line is either the
//! `tapes <n>` header, the `alphabet <letters...>` header, or a transition
//! line `<state> <letters...> -> <state> <letters...> <directions...>`.
//! Grounded on the teacher's `loader.rs` (`ProgramLoader`) for the
//! read-from-path shape and its `#[cfg(test)]` + `tempfile` test style; the
//! line grammar itself is hand-rolled rather than the teacher's `pest`
//! grammar — see DESIGN.md for why.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::machine::TuringMachine;
use crate::types::{Direction, TuringMachineError};

/// Parses the textual contents of a `.tm` file into a `TuringMachine`.
pub fn parse_tm(contents: &str) -> Result<TuringMachine, TuringMachineError> {
    let mut num_tapes: Option<usize> = None;
    let mut input_alphabet = BTreeSet::new();
    let mut transitions = HashMap::new();

    for (lineno, raw_line) in contents.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix("tapes") {
            let n: usize = rest.trim().parse().map_err(|_| {
                TuringMachineError::ParseError(format!("line {}: invalid tape count", lineno + 1))
            })?;
            num_tapes = Some(n);
            continue;
        }

        if let Some(rest) = line.strip_prefix("alphabet") {
            input_alphabet.extend(rest.split_whitespace().map(str::to_string));
            continue;
        }

        let k = num_tapes.ok_or_else(|| {
            TuringMachineError::ParseError(format!(
                "line {}: transition given before `tapes` header",
                lineno + 1
            ))
        })?;
        let (state, read, next_state, write, dirs) = parse_transition_line(line, k, lineno + 1)?;
        transitions.insert((state, read), (next_state, write, dirs));
    }

    let num_tapes = num_tapes.ok_or_else(|| {
        TuringMachineError::ParseError("missing `tapes` header".to_string())
    })?;

    TuringMachine::new(num_tapes, input_alphabet, transitions)
}

fn parse_transition_line(
    line: &str,
    k: usize,
    lineno: usize,
) -> Result<(String, Vec<String>, String, Vec<String>, Vec<Direction>), TuringMachineError> {
    let (lhs, rhs) = line.split_once("->").ok_or_else(|| {
        TuringMachineError::ParseError(format!("line {lineno}: missing `->` in transition"))
    })?;

    let lhs: Vec<&str> = lhs.split_whitespace().collect();
    if lhs.len() != 1 + k {
        return Err(TuringMachineError::ParseError(format!(
            "line {lineno}: expected state and {k} letter(s) before `->`, found {}",
            lhs.len()
        )));
    }
    let state = lhs[0].to_string();
    let read: Vec<String> = lhs[1..].iter().map(|s| s.to_string()).collect();

    let rhs: Vec<&str> = rhs.split_whitespace().collect();
    if rhs.len() != 1 + 2 * k {
        return Err(TuringMachineError::ParseError(format!(
            "line {lineno}: expected state, {k} letter(s), and {k} direction(s) after `->`, found {}",
            rhs.len()
        )));
    }
    let next_state = rhs[0].to_string();
    let write: Vec<String> = rhs[1..1 + k].iter().map(|s| s.to_string()).collect();
    let dirs = rhs[1 + k..]
        .iter()
        .map(|tok| {
            Direction::from_token(tok).ok_or_else(|| {
                TuringMachineError::ParseError(format!(
                    "line {lineno}: invalid direction token {tok:?}"
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((state, read, next_state, write, dirs))
}

/// Serializes a `TuringMachine` to the `.tm` text format.
pub fn write_tm(machine: &TuringMachine) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "tapes {}", machine.num_tapes);
    if !machine.input_alphabet.is_empty() {
        let alphabet = machine
            .input_alphabet
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "alphabet {alphabet}");
    }

    let mut lines: Vec<(String, String)> = machine
        .transitions
        .iter()
        .map(|((state, read), (next_state, write, dirs))| {
            let key = format!("{state} {}", read.join(" "));
            let value = format!(
                "{key} -> {next_state} {} {}",
                write.join(" "),
                dirs.iter().map(|d| d.token()).collect::<Vec<_>>().join(" ")
            );
            (key, value)
        })
        .collect();
    lines.sort();
    for (_, line) in lines {
        let _ = writeln!(out, "{line}");
    }
    out
}

/// Reads and parses a `.tm` file from `path`.
pub fn load_tm(path: &Path) -> Result<TuringMachine, TuringMachineError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| TuringMachineError::FileError(format!("{}: {e}", path.display())))?;
    parse_tm(&contents)
}

/// Serializes `machine` and writes it to `path`.
pub fn save_tm(path: &Path, machine: &TuringMachine) -> Result<(), TuringMachineError> {
    fs::write(path, write_tm(machine))
        .map_err(|e| TuringMachineError::FileError(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const SAMPLE: &str = "\
        tapes 1\n\
        alphabet a\n\
        q0 a -> qacc a S\n\
    ";

    #[test]
    fn parses_a_minimal_machine() {
        let machine = parse_tm(SAMPLE).expect("valid .tm contents");
        assert_eq!(machine.num_tapes, 1);
        assert!(machine.input_alphabet.contains("a"));
        assert_eq!(machine.transitions.len(), 1);
    }

    #[test]
    fn round_trips_through_write_tm() {
        let machine = parse_tm(SAMPLE).unwrap();
        let written = write_tm(&machine);
        let reparsed = parse_tm(&written).unwrap();
        assert_eq!(machine.num_tapes, reparsed.num_tapes);
        assert_eq!(machine.input_alphabet, reparsed.input_alphabet);
        assert_eq!(machine.transitions, reparsed.transitions);
    }

    #[test]
    fn rejects_transition_before_tapes_header() {
        let err = parse_tm("q0 a -> qacc a S\n").unwrap_err();
        assert!(matches!(err, TuringMachineError::ParseError(_)));
    }

    #[test]
    fn load_tm_reads_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("machine.tm");
        let mut file = File::create(&path).unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let machine = load_tm(&path).expect("file loads");
        assert_eq!(machine.num_tapes, 1);
    }

    #[test]
    fn load_tm_reports_missing_file() {
        let err = load_tm(Path::new("/nonexistent/path.tm")).unwrap_err();
        assert!(matches!(err, TuringMachineError::FileError(_)));
    }
}
