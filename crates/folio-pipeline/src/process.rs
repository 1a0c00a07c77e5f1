//! External program invocation

use crate::{PipelineError, PipelineResult};
use log::{debug, error};
use std::process::{Command, Output, Stdio};

/// Run `cmd` to completion and fail unless it exits successfully
///
/// Standard input is closed; standard output and error are captured.
pub fn run_command(cmd: &mut Command) -> PipelineResult<Output> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    debug!("running {:?}", cmd);

    let output = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|source| PipelineError::Spawn {
            program: program.clone(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        error!("{} exited with {}: {}", program, output.status, stderr);
        return Err(PipelineError::Subprocess {
            program,
            status: output.status.to_string(),
            stderr,
        });
    }

    Ok(output)
}
