//! Launch configuration resolved from the environment
//!
//! Every setting has an environment variable and a fixed default. A variable
//! that is unset or empty falls back to the default.

use std::collections::HashMap;
use std::env::VarError;

use crate::error::LaunchError;

/// Environment variable naming the Python interpreter
pub const PYTHON_BIN_VAR: &str = "PYTHON_BIN";
/// Environment variable naming the TLS certificate file
pub const CERT_FILE_VAR: &str = "CERT_FILE";
/// Environment variable naming the TLS private key file
pub const KEY_FILE_VAR: &str = "KEY_FILE";
/// Environment variable naming the bind host
pub const HOST_VAR: &str = "HOST";
/// Environment variable naming the bind port
pub const PORT_VAR: &str = "PORT";

/// Every variable the launcher reads
pub const LAUNCH_VARS: [&str; 5] = [PYTHON_BIN_VAR, CERT_FILE_VAR, KEY_FILE_VAR, HOST_VAR, PORT_VAR];

pub const DEFAULT_PYTHON_BIN: &str = "python3";
pub const DEFAULT_CERT_FILE: &str = "cert.pem";
pub const DEFAULT_KEY_FILE: &str = "key.pem";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: &str = "8443";

/// Settings handed to the camera server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    /// Interpreter binary name or path (e.g., "python3")
    pub python_bin: String,

    /// Path to the TLS certificate (PEM)
    pub cert_file: String,

    /// Path to the TLS private key (PEM)
    pub key_file: String,

    /// Host/IP the HTTPS server binds to
    pub host: String,

    /// Port the HTTPS server binds to
    pub port: String,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            python_bin: DEFAULT_PYTHON_BIN.to_string(),
            cert_file: DEFAULT_CERT_FILE.to_string(),
            key_file: DEFAULT_KEY_FILE.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT.to_string(),
        }
    }
}

impl LaunchConfig {
    /// Resolve the configuration from the process environment
    ///
    /// A variable that is set but not valid UTF-8 is an error rather than
    /// falling back to its default.
    pub fn from_env() -> Result<Self, LaunchError> {
        for name in LAUNCH_VARS {
            env_var(name)?;
        }
        Ok(Self::from_lookup(|name| std::env::var(name).ok()))
    }

    /// Resolve the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let resolve = |name: &str, default: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            python_bin: resolve(PYTHON_BIN_VAR, DEFAULT_PYTHON_BIN),
            cert_file: resolve(CERT_FILE_VAR, DEFAULT_CERT_FILE),
            key_file: resolve(KEY_FILE_VAR, DEFAULT_KEY_FILE),
            host: resolve(HOST_VAR, DEFAULT_HOST),
            port: resolve(PORT_VAR, DEFAULT_PORT),
        }
    }

    /// Resolve the configuration from a fixed set of variables
    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        Self::from_lookup(|name| vars.get(name).cloned())
    }
}

/// Read a variable, rejecting values that are not valid UTF-8
pub fn env_var(name: &str) -> Result<Option<String>, LaunchError> {
    unicode_value(name, std::env::var(name))
}

fn unicode_value(name: &str, value: Result<String, VarError>) -> Result<Option<String>, LaunchError> {
    match value {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(LaunchError::InvalidVariable {
            name: name.to_string(),
        }),
    }
}
