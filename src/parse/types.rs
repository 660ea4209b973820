//! Types produced by the wire decoder and consumed by the step layer.

use thiserror::Error;

/// Failure decoding an escaped comment-argument string.
///
/// All variants are terminal: the whole input is rejected and no partial
/// argument list is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A character appeared without a preceding escape and is not a
    /// separator. `pos` is the byte offset of the character in the raw
    /// input.
    #[error("unescaped character {ch:?} at byte {pos}")]
    ImproperEscape { ch: char, pos: usize },

    /// An argument consisted of nothing but a single escaped separator
    /// (`\,`), which the wire format does not allow.
    #[error("ambiguous input: argument is a lone escaped separator")]
    AmbiguousInput,

    /// The input ended while an escape was still open.
    #[error("dangling escape at end of input")]
    DanglingEscape,
}
