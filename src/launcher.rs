//! Launcher orchestration
//!
//! The complete flow:
//! 1. Switch to the directory holding the launcher executable
//! 2. Resolve the launch configuration from the environment
//! 3. Check interpreter, certificate and key, in that order
//! 4. Replace this process with `IPcam.py`

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::LaunchConfig;
use crate::error::LaunchError;
use crate::preflight;
use crate::process::ProcessConfig;

/// Resolved launcher state, ready to hand off
#[derive(Debug, Clone)]
pub struct Launcher {
    workdir: PathBuf,
    config: LaunchConfig,
    search_path: Option<OsString>,
}

impl Launcher {
    /// Build a launcher for the running executable
    ///
    /// Changes the current directory to the executable's own directory so
    /// relative certificate and key paths resolve the same way no matter
    /// where the launcher was started from.
    pub fn from_env() -> Result<Self, LaunchError> {
        let workdir = executable_dir()?;
        std::env::set_current_dir(&workdir).map_err(|source| {
            LaunchError::WorkingDirectory {
                path: workdir.clone(),
                source,
            }
        })?;

        Ok(Self {
            workdir,
            config: LaunchConfig::from_env()?,
            search_path: std::env::var_os("PATH"),
        })
    }

    /// Build a launcher over an explicit directory and variable lookup
    ///
    /// `PATH` is taken from the same lookup and decides which interpreter
    /// is checked and later executed. The current directory is left
    /// untouched; the camera server still starts in `workdir`.
    pub fn with_workdir<F>(workdir: impl Into<PathBuf>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let search_path = lookup("PATH").map(OsString::from);
        Self {
            workdir: workdir.into(),
            config: LaunchConfig::from_lookup(lookup),
            search_path,
        }
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run the precondition checks and return the command to hand off to
    pub fn prepare(&self) -> Result<ProcessConfig, LaunchError> {
        info!("Working directory: {:?}", self.workdir);
        info!(
            "Configuration: interpreter={} cert={} key={} host={} port={}",
            self.config.python_bin,
            self.config.cert_file,
            self.config.key_file,
            self.config.host,
            self.config.port,
        );

        let interpreter = preflight::check(&self.config, self.search_path.as_ref(), &self.workdir)?;

        Ok(ProcessConfig::ipcam(&self.config, interpreter, self.workdir.clone()))
    }

    /// Check preconditions and hand off
    ///
    /// Only returns on failure.
    pub fn launch(&self) -> LaunchError {
        match self.prepare() {
            Ok(process) => process.exec(),
            Err(e) => e,
        }
    }
}

/// Resolve the directory holding the running executable
pub fn executable_dir() -> Result<PathBuf, LaunchError> {
    let exe = std::env::current_exe()
        .and_then(|path| path.canonicalize())
        .map_err(|source| LaunchError::WorkingDirectory {
            path: PathBuf::from("."),
            source,
        })?;

    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| LaunchError::WorkingDirectory {
            path: exe.clone(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "executable has no parent directory",
            ),
        })
}

/// Entry point: resolve, check and hand off to the camera server
///
/// Only returns on failure.
pub fn run() -> LaunchError {
    match Launcher::from_env() {
        Ok(launcher) => launcher.launch(),
        Err(e) => e,
    }
}
