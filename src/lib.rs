//! ipcam-launcher - Launcher for the IPcam HTTPS camera server
//!
//! This library resolves the TLS certificate, key and bind settings for
//! `IPcam.py` from the environment, checks that everything it needs is in
//! place, and then replaces the current process with the camera server.

pub mod config;
pub mod error;
pub mod launcher;
pub mod preflight;
pub mod process;

pub use config::LaunchConfig;
pub use error::LaunchError;
pub use launcher::{run, Launcher};
pub use process::ProcessConfig;
