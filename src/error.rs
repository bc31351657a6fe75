// Launcher error taxonomy

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons the launcher gives up before the camera server takes over
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Fehler: Python-Interpreter '{name}' wurde nicht gefunden.")]
    InterpreterNotFound { name: String },

    #[error("Fehler: Zertifikatsdatei '{path}' wurde nicht gefunden.")]
    CertificateMissing { path: String },

    #[error("Fehler: Schlüsseldatei '{path}' wurde nicht gefunden.")]
    KeyMissing { path: String },

    #[error("Fehler: Umgebungsvariable '{name}' enthält keinen gültigen UTF-8-Wert.")]
    InvalidVariable { name: String },

    #[error("Fehler: Arbeitsverzeichnis '{}' konnte nicht gesetzt werden: {source}", path.display())]
    WorkingDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Fehler: '{command}' konnte nicht gestartet werden: {source}")]
    Exec {
        command: String,
        #[source]
        source: io::Error,
    },
}

impl LaunchError {
    /// Exit status reported to the shell
    pub fn exit_code(&self) -> i32 {
        1
    }
}
