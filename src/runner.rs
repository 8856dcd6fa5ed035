//! External command execution.
//! Every step of the scaffold flow that touches the .NET SDK goes through a
//! [`CommandRunner`], so the sequence can be replayed against a mock.

use std::fmt;
use std::path::Path;
use std::process::{Command, ExitStatus};

use log::{debug, error, info};

use crate::constants::DOTNET;
use crate::error::{Error, Result};

/// A program invocation: executable plus arguments, no shell involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Stream output to the terminal instead of capturing it
    pub inherit_output: bool,
}

impl ToolCommand {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self { program: program.into(), args: Vec::new(), inherit_output: false }
    }

    /// Lets the child write straight to the terminal (long-running servers).
    pub fn inherit_output(mut self) -> Self {
        self.inherit_output = true;
        self
    }

    /// Shorthand for a `dotnet` invocation.
    pub fn dotnet<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(DOTNET).args(args)
    }

    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured output of a successful command.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Trait for executing external commands.
pub trait CommandRunner {
    /// Runs `command` in `cwd` (or the current directory) and waits for it.
    ///
    /// # Errors
    /// * `Error::CommandFailed` on a non-zero exit status
    /// * `Error::Interrupted` when the command was killed by the user's interrupt
    /// * `Error::IoError` when the program cannot be spawned
    fn run(&self, command: &ToolCommand, cwd: Option<&Path>) -> Result<CommandOutput>;
}

/// Runs commands as child processes of the current one.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &ToolCommand, cwd: Option<&Path>) -> Result<CommandOutput> {
        info!("Running: {command}");

        let mut process = Command::new(&command.program);
        process.args(&command.args);
        if let Some(cwd) = cwd {
            debug!("Working directory: {}", cwd.display());
            process.current_dir(cwd);
        }

        if command.inherit_output {
            let status = process.status().map_err(Error::IoError)?;
            return check_status(command, status, CommandOutput::default());
        }

        let output = process.output().map_err(Error::IoError)?;
        let captured = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        check_status(command, output.status, captured)
    }
}

fn check_status(
    command: &ToolCommand,
    status: ExitStatus,
    output: CommandOutput,
) -> Result<CommandOutput> {
    if was_interrupted(status) {
        info!("Execution interrupted by the user.");
        return Err(Error::Interrupted);
    }

    let CommandOutput { stdout, stderr } = output;
    if !status.success() {
        error!("Failed: {command}");
        if !stderr.trim().is_empty() {
            error!("STDERR: {}", stderr.trim());
        }
        return Err(Error::CommandFailed { command: command.to_string(), stderr });
    }

    debug!("{}", stdout.trim());
    info!("Command succeeded");
    Ok(CommandOutput { stdout, stderr })
}

#[cfg(unix)]
fn was_interrupted(status: ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    // SIGINT
    status.signal() == Some(2)
}

#[cfg(not(unix))]
fn was_interrupted(_status: ExitStatus) -> bool {
    false
}
