//! Subprocess execution for `.run` directives.

use std::io::Read;
use std::process::{Command, ExitStatus};

/// Captured result of a command.
#[derive(Debug)]
pub struct CommandOutput {
    /// Interleaved stdout and stderr.
    pub output: String,
    /// Exit status.
    pub status: ExitStatus,
}

/// Run `program` with `args`, capturing stdout and stderr through one pipe.
///
/// The program is executed directly, without a shell. A non-zero exit is
/// reported through [`CommandOutput::status`], not as an error.
///
/// # Errors
///
/// Returns an error if the pipe cannot be created or the program cannot be
/// started.
pub fn run_command(program: &str, args: &[String]) -> std::io::Result<CommandOutput> {
    let (mut reader, writer) = std::io::pipe()?;

    let mut command = Command::new(program);
    command.args(args).stdout(writer.try_clone()?).stderr(writer);
    let mut child = command.spawn()?;
    // The command keeps copies of the write ends; dropping it lets the read hit EOF.
    drop(command);

    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let status = child.wait()?;

    Ok(CommandOutput {
        output: String::from_utf8_lossy(&bytes).into_owned(),
        status,
    })
}
