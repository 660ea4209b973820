//! stepctx: typed execution context for Atlantis-style CI run steps.
//!
//! A custom workflow run step receives its context as environment
//! variables: repository and pull-request coordinates, project paths, and
//! the user's comment arguments in an escaped wire encoding. This crate
//! ingests those named inputs into a [`step::RunStep`] record, decoding
//! `COMMENT_ARGS` with [`parse::decode`]. Construction is all-or-nothing:
//! a missing input, a non-numeric `PULL_NUM`, or a malformed argument
//! string fails the whole record.
//!
//! # Architecture
//!
//! - **[`parse`]** — Escaped-argument wire format: decoder, encoder, error taxonomy.
//! - **[`step`]** — Record assembly: `RunStep`, the `InputSource` seam, input keys.
//! - **[`config`]** — Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]** — File-based outcome logging to `~/.local/share/stepctx/steps.log`.

/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// File-based outcome logging.
pub mod logging;
/// Escaped comment-argument wire format: decode, encode, errors.
pub mod parse;
/// Run-step record construction from named inputs.
pub mod step;

use step::{RunStep, StepError};

/// Build a step record from the process environment with default config.
///
/// This is the main entry point for tests and simple usage.
/// For CLI usage with user config, call [`step::RunStep::from_source`]
/// with a loaded [`config::Config`] directly.
pub fn from_env() -> Result<RunStep, StepError> {
    let config = config::Config::default_config();
    RunStep::from_env(&config.inputs.extra)
}
