//! Handing control to the camera server
//!
//! This module builds the `IPcam.py` command line and replaces the launcher
//! process with it. On targets without `exec`, the server runs as a child
//! and its exit status is passed through unchanged.

use std::path::PathBuf;
use std::process::Command;
use tracing::info;

use crate::config::LaunchConfig;
use crate::error::LaunchError;

/// Script run by the interpreter
pub const IPCAM_SCRIPT: &str = "IPcam.py";

/// Command line for the external program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessConfig {
    /// Interpreter as configured, used for display
    pub command: String,

    /// Interpreter path found by the precondition check; this is what runs
    pub executable: PathBuf,

    /// Arguments to pass to the command
    pub args: Vec<String>,

    /// Working directory for the camera server
    pub working_dir: PathBuf,
}

impl ProcessConfig {
    /// Create the configuration for an `IPcam.py` run
    pub fn ipcam(config: &LaunchConfig, executable: PathBuf, working_dir: PathBuf) -> Self {
        Self {
            command: config.python_bin.clone(),
            executable,
            args: vec![
                IPCAM_SCRIPT.to_string(),
                "--cert".to_string(),
                config.cert_file.clone(),
                "--key".to_string(),
                config.key_file.clone(),
                "--host".to_string(),
                config.host.clone(),
                "--port".to_string(),
                config.port.clone(),
            ],
            working_dir,
        }
    }

    /// The flags handed to `IPcam.py`, without the script name
    pub fn server_flags(&self) -> &[String] {
        self.args.get(1..).unwrap_or(&[])
    }

    /// Render the command line as a single shell-quoted string
    pub fn command_line(&self) -> String {
        std::iter::once(&self.command)
            .chain(self.args.iter())
            .map(|arg| shell_quote(arg))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.executable);
        command.args(&self.args).current_dir(&self.working_dir);
        command
    }

    /// Replace the current process with the camera server
    ///
    /// Only returns if the handoff failed.
    #[cfg(unix)]
    pub fn exec(&self) -> LaunchError {
        use std::os::unix::process::CommandExt;

        info!("Handing off to: {}", self.command_line());
        let source = self.to_command().exec();

        LaunchError::Exec {
            command: self.command.clone(),
            source,
        }
    }

    /// Run the camera server as a child and exit with its status
    ///
    /// Only returns if the child could not be started.
    #[cfg(not(unix))]
    pub fn exec(&self) -> LaunchError {
        info!("Starting: {}", self.command_line());

        match self.to_command().status() {
            Ok(status) => std::process::exit(status.code().unwrap_or(1)),
            Err(source) => LaunchError::Exec {
                command: self.command.clone(),
                source,
            },
        }
    }
}

fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./:=@%+,".contains(c));

    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', "'\\''"))
    }
}
