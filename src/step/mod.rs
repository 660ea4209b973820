//! Run-step record construction from named inputs.
//!
//! Atlantis invokes a custom run step with a fixed set of environment
//! variables describing the pull request, project, and user-supplied
//! comment arguments. This module assembles them into a typed [`RunStep`]:
//! every input is presence-required (empty values are legal), `PULL_NUM`
//! must be numeric, and `COMMENT_ARGS` is decoded from its escaped wire
//! form. Any failure aborts the whole record; no partial step is produced.

pub mod source;

pub use source::{EnvSource, InputSource, MapSource};

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::parse::{self, DecodeError};

// Input keys, as set by the runner.
pub const WORKSPACE: &str = "WORKSPACE";
pub const TERRAFORM_VERSION: &str = "ATLANTIS_TERRAFORM_VERSION";
pub const DIR: &str = "DIR";
pub const PLANFILE: &str = "PLANFILE";
pub const BASE_REPO_NAME: &str = "BASE_REPO_NAME";
pub const BASE_REPO_OWNER: &str = "BASE_REPO_OWNER";
pub const HEAD_REPO_NAME: &str = "HEAD_REPO_NAME";
pub const HEAD_REPO_OWNER: &str = "HEAD_REPO_OWNER";
pub const HEAD_BRANCH_NAME: &str = "HEAD_BRANCH_NAME";
pub const BASE_BRANCH_NAME: &str = "BASE_BRANCH_NAME";
pub const PROJECT_NAME: &str = "PROJECT_NAME";
pub const PULL_NUM: &str = "PULL_NUM";
pub const PULL_AUTHOR: &str = "PULL_AUTHOR";
pub const REPO_REL_DIR: &str = "REPO_REL_DIR";
pub const USER_NAME: &str = "USER_NAME";
pub const COMMENT_ARGS: &str = "COMMENT_ARGS";

/// Failure assembling a [`RunStep`] from its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// A required input was not set. Empty values do not trigger this.
    #[error("missing required input {0}")]
    MissingInput(&'static str),

    /// A numeric input did not parse as an unsigned integer.
    #[error("input {key} is not a number: {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    /// The comment-argument input was malformed.
    #[error("COMMENT_ARGS: {0}")]
    CommentArgs(#[from] DecodeError),
}

/// The typed context of one run-step invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStep {
    pub workspace: String,
    pub terraform_version: String,
    pub absolute_project_dir: PathBuf,
    pub planfile: PathBuf,
    pub base_repo_name: String,
    pub base_repo_owner: String,
    pub head_repo_name: String,
    pub head_repo_owner: String,
    pub head_branch_name: String,
    pub base_branch_name: String,
    pub project_name: String,
    pub pull_num: u64,
    pub pull_author: String,
    pub relative_project_dir: String,
    pub username: String,
    pub comment_args: Vec<String>,
    /// Passthrough inputs captured per `inputs.extra` configuration.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl RunStep {
    /// Assemble a step record from the given source.
    ///
    /// `extra_keys` lists additional inputs to capture verbatim into
    /// [`RunStep::extra`]; absent extra keys are skipped, never fatal.
    pub fn from_source(source: &dyn InputSource, extra_keys: &[String]) -> Result<Self, StepError> {
        let comment_args = parse::decode(&required(source, COMMENT_ARGS)?)?;
        log::debug!("decoded {} comment argument(s)", comment_args.len());

        let pull_num = parse_pull_num(&required(source, PULL_NUM)?)?;

        let mut extra = BTreeMap::new();
        for key in extra_keys {
            match source.get(key) {
                Some(value) => {
                    extra.insert(key.clone(), value);
                }
                None => log::debug!("extra input {key} not set; skipping"),
            }
        }

        Ok(Self {
            workspace: required(source, WORKSPACE)?,
            terraform_version: required(source, TERRAFORM_VERSION)?,
            absolute_project_dir: path_input(source, DIR)?,
            planfile: path_input(source, PLANFILE)?,
            base_repo_name: required(source, BASE_REPO_NAME)?,
            base_repo_owner: required(source, BASE_REPO_OWNER)?,
            head_repo_name: required(source, HEAD_REPO_NAME)?,
            head_repo_owner: required(source, HEAD_REPO_OWNER)?,
            head_branch_name: required(source, HEAD_BRANCH_NAME)?,
            base_branch_name: required(source, BASE_BRANCH_NAME)?,
            project_name: required(source, PROJECT_NAME)?,
            pull_num,
            pull_author: required(source, PULL_AUTHOR)?,
            relative_project_dir: required(source, REPO_REL_DIR)?,
            username: required(source, USER_NAME)?,
            comment_args,
            extra,
        })
    }

    /// Assemble a step record from the process environment.
    pub fn from_env(extra_keys: &[String]) -> Result<Self, StepError> {
        Self::from_source(&EnvSource, extra_keys)
    }
}

fn required(source: &dyn InputSource, key: &'static str) -> Result<String, StepError> {
    source.get(key).ok_or(StepError::MissingInput(key))
}

/// Path inputs get tilde expansion so steps can be exercised by hand.
fn path_input(source: &dyn InputSource, key: &'static str) -> Result<PathBuf, StepError> {
    let value = required(source, key)?;
    Ok(PathBuf::from(shellexpand::tilde(&value).into_owned()))
}

fn parse_pull_num(value: &str) -> Result<u64, StepError> {
    value.parse().map_err(|_| StepError::InvalidNumber {
        key: PULL_NUM,
        value: value.to_string(),
    })
}
