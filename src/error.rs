//! Errors the construction algorithm itself can raise (§7). Everything
//! else is total by construction: undefined `M2` behavior simply yields a
//! `M1` with no matching transition, which the caller observes as
//! rejection, not an error.

use thiserror::Error;

/// Fatal, unrecoverable misuse of `translate::translate` — the two error
/// kinds named in §7 of the spec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// `translate` was called on a machine whose `num_tapes != 2`.
    #[error("translate expects a two-taped machine, got {0} tape(s)")]
    NotTwoTaped(usize),
    /// A transition's read, write, or direction vector did not have
    /// arity 2.
    #[error("malformed transition: expected arity 2, got {0}")]
    MalformedArity(usize),
}
