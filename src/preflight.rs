//! Precondition checks run before handing off to the camera server
//!
//! The order is fixed: interpreter, then certificate, then key. The first
//! failing check ends the run, so later resources are never consulted.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::LaunchConfig;
use crate::error::LaunchError;

/// Search path used when `PATH` is unset, as a POSIX shell would
#[cfg(unix)]
pub const DEFAULT_SEARCH_PATH: Option<&str> = Some("/usr/local/bin:/usr/bin:/bin");
#[cfg(not(unix))]
pub const DEFAULT_SEARCH_PATH: Option<&str> = None;

/// Locate the interpreter the way a shell would
///
/// Bare names are looked up on `search_path` (or `DEFAULT_SEARCH_PATH` when
/// there is none); names containing a path separator are taken relative to
/// `base_dir`. Only executable files count.
pub fn find_interpreter(
    name: &str,
    search_path: Option<&OsString>,
    base_dir: &Path,
) -> Result<PathBuf, LaunchError> {
    let fallback = DEFAULT_SEARCH_PATH.map(OsString::from);
    let search_path = search_path.or(fallback.as_ref());

    which::which_in(name, search_path, base_dir).map_err(|e| {
        debug!("Interpreter lookup for {:?} failed: {}", name, e);
        LaunchError::InterpreterNotFound {
            name: name.to_string(),
        }
    })
}

/// Resolve a configured file path against the working directory
pub fn resolve_file(path: &str, base_dir: &Path) -> PathBuf {
    base_dir.join(path)
}

/// Run every precondition check in order
///
/// Returns the resolved interpreter path on success.
pub fn check(
    config: &LaunchConfig,
    search_path: Option<&OsString>,
    base_dir: &Path,
) -> Result<PathBuf, LaunchError> {
    let interpreter = find_interpreter(&config.python_bin, search_path, base_dir)?;
    debug!("Interpreter found: {:?}", interpreter);

    let cert = resolve_file(&config.cert_file, base_dir);
    if !cert.is_file() {
        return Err(LaunchError::CertificateMissing {
            path: config.cert_file.clone(),
        });
    }
    debug!("Certificate found: {:?}", cert);

    let key = resolve_file(&config.key_file, base_dir);
    if !key.is_file() {
        return Err(LaunchError::KeyMissing {
            path: config.key_file.clone(),
        });
    }
    debug!("Key found: {:?}", key);

    Ok(interpreter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn search_path() -> Option<OsString> {
        std::env::var_os("PATH")
    }

    fn config_with(python_bin: &str) -> LaunchConfig {
        LaunchConfig {
            python_bin: python_bin.to_string(),
            ..LaunchConfig::default()
        }
    }

    #[test]
    fn test_resolve_file_relative_and_absolute() {
        let base = Path::new("/opt/ipcam");
        assert_eq!(resolve_file("cert.pem", base), PathBuf::from("/opt/ipcam/cert.pem"));
        assert_eq!(resolve_file("/etc/tls/cert.pem", base), PathBuf::from("/etc/tls/cert.pem"));
    }

    #[test]
    fn test_missing_interpreter_reported_first() {
        // Neither cert nor key exist; the interpreter failure wins.
        let dir = TempDir::new().unwrap();
        let config = config_with("ipcam-no-such-interpreter-123456");

        let err = check(&config, search_path().as_ref(), dir.path()).unwrap_err();
        match err {
            LaunchError::InterpreterNotFound { name } => {
                assert_eq!(name, "ipcam-no-such-interpreter-123456")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_search_path_without_interpreter() {
        let dir = TempDir::new().unwrap();
        let bin_dir = TempDir::new().unwrap();
        let path = OsString::from(bin_dir.path());
        let result = find_interpreter("sh", Some(&path), dir.path());
        assert!(matches!(result, Err(LaunchError::InterpreterNotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_unset_search_path_uses_default() {
        let dir = TempDir::new().unwrap();
        let interpreter = find_interpreter("sh", None, dir.path()).unwrap();
        assert!(interpreter.is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_certificate_checked_before_key() {
        let dir = TempDir::new().unwrap();
        let config = config_with("sh");

        let err = check(&config, search_path().as_ref(), dir.path()).unwrap_err();
        assert!(matches!(err, LaunchError::CertificateMissing { ref path } if path == "cert.pem"));
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_key() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("cert.pem"), b"cert").unwrap();
        let config = config_with("sh");

        let err = check(&config, search_path().as_ref(), dir.path()).unwrap_err();
        assert!(matches!(err, LaunchError::KeyMissing { ref path } if path == "key.pem"));
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_is_not_a_regular_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("cert.pem")).unwrap();
        let config = config_with("sh");

        let err = check(&config, search_path().as_ref(), dir.path()).unwrap_err();
        assert!(matches!(err, LaunchError::CertificateMissing { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_all_present() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("cert.pem"), b"cert").unwrap();
        fs::write(dir.path().join("key.pem"), b"key").unwrap();
        let config = config_with("sh");

        let interpreter = check(&config, search_path().as_ref(), dir.path()).unwrap();
        assert!(interpreter.is_file());
    }
}
