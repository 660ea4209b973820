use std::io::Write;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::step::{RunStep, StepError};

/// Append an outcome record to ~/.local/share/stepctx/steps.log.
/// Best-effort: failures are silently ignored (the audit log must never
/// fail the step).
pub fn log_outcome(outcome: &Result<RunStep, StepError>) {
    let Some(home) = std::env::var_os("HOME") else {
        return;
    };
    let log_dir = std::path::Path::new(&home).join(".local/share/stepctx");
    let _ = std::fs::create_dir_all(&log_dir);

    let log_path = log_dir.join("steps.log");
    let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
    else {
        return;
    };

    let Ok(ts) = OffsetDateTime::now_utc().format(&Rfc3339) else {
        return;
    };

    let line = match outcome {
        Ok(step) => format!(
            "{ts}\tok\t{owner}/{repo}#{pull}\t{workspace}\t{n} arg(s)",
            owner = step.base_repo_owner,
            repo = step.base_repo_name,
            pull = step.pull_num,
            workspace = step.workspace,
            n = step.comment_args.len(),
        ),
        Err(e) => format!("{ts}\terr\t{e}"),
    };

    let _ = writeln!(file, "{line}");
}
