use std::io::ErrorKind;
use std::path::Path;

use crate::command_runner::{CommandOutput, CommandRunner};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommandFailure {
    pub(crate) command: String,
    pub(crate) status: i32,
    pub(crate) stderr: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LaunchFailure {
    NotFound { program: String },
    Other(String),
}

pub(crate) fn run_program(
    runner: &dyn CommandRunner,
    program: &str,
    args: &[&str],
    cwd: Option<&Path>,
) -> Result<CommandOutput, LaunchFailure> {
    runner.run(program, args, cwd).map_err(|error| {
        let not_found = error
            .downcast_ref::<std::io::Error>()
            .is_some_and(|io_error| io_error.kind() == ErrorKind::NotFound);

        if not_found {
            LaunchFailure::NotFound {
                program: program.to_string(),
            }
        } else {
            LaunchFailure::Other(error.to_string())
        }
    })
}

pub(crate) fn ensure_success(
    args: &[&str],
    output: CommandOutput,
) -> Result<CommandOutput, CommandFailure> {
    if output.status_code == 0 {
        return Ok(output);
    }

    // Some tools report failures on stdout only.
    let stderr = if output.stderr.trim().is_empty() {
        output.stdout.trim().to_string()
    } else {
        output.stderr.trim().to_string()
    };

    Err(CommandFailure {
        command: args.join(" "),
        status: output.status_code,
        stderr,
    })
}
