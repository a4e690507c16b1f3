//! Locates backend executables on the system.

use crate::error::AdapterError;
use std::path::PathBuf;
use which::which;

/// Environment variable that overrides the `ollama` binary path.
pub const OLLAMA_BIN_ENV_VAR: &str = "PARAM_EXTRACT_OLLAMA_BIN";

/// Environment variable that overrides the `gemini` binary path.
pub const GEMINI_BIN_ENV_VAR: &str = "PARAM_EXTRACT_GEMINI_BIN";

/// Locates the Ollama CLI executable.
///
/// Resolution order:
/// 1. `explicit_path` if provided and the file exists.
/// 2. The path in the `PARAM_EXTRACT_OLLAMA_BIN` environment variable.
/// 3. `ollama` resolved via `$PATH`.
/// 4. Common install locations.
///
/// # Errors
///
/// Returns `AdapterError::ExecutableNotFound` when no executable can be located.
pub fn discover_ollama(explicit_path: Option<PathBuf>) -> Result<PathBuf, AdapterError> {
    discover(
        explicit_path,
        OLLAMA_BIN_ENV_VAR,
        &["ollama"],
        &ollama_fallback_locations(),
        "ollama not found. Install it from https://ollama.com/download",
    )
}

/// Locates the Gemini CLI executable.
///
/// Same resolution order as [`discover_ollama`], using
/// `PARAM_EXTRACT_GEMINI_BIN` and trying `gemini` then `gemini.cmd` (npm
/// global installs on Windows) on `$PATH`.
///
/// # Errors
///
/// Returns `AdapterError::ExecutableNotFound` when no executable can be located.
pub fn discover_gemini(explicit_path: Option<PathBuf>) -> Result<PathBuf, AdapterError> {
    discover(
        explicit_path,
        GEMINI_BIN_ENV_VAR,
        &["gemini", "gemini.cmd"],
        &gemini_fallback_locations(),
        "Gemini CLI not found. Install: npm i -g @google/gemini-cli",
    )
}

fn discover(
    explicit_path: Option<PathBuf>,
    env_var: &str,
    names: &[&str],
    fallbacks: &[PathBuf],
    install_hint: &str,
) -> Result<PathBuf, AdapterError> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Ok(path);
        }
        return Err(AdapterError::ExecutableNotFound(format!(
            "Explicit path does not exist: {}",
            path.display()
        )));
    }

    if let Ok(path_str) = std::env::var(env_var) {
        let path = PathBuf::from(path_str);
        if path.exists() {
            return Ok(path);
        }
        tracing::debug!(env_var, path = %path.display(), "Ignoring override that does not exist");
    }

    if let Some(path) = names.iter().find_map(|name| which(name).ok()) {
        return Ok(path);
    }

    if let Some(path) = fallbacks.iter().find(|location| location.exists()) {
        return Ok(path.clone());
    }

    Err(AdapterError::ExecutableNotFound(format!(
        "{install_hint}\nSearched: {env_var}, PATH, common install locations."
    )))
}

#[cfg(unix)]
fn ollama_fallback_locations() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/usr/local/bin/ollama"),
        PathBuf::from("/usr/bin/ollama"),
        PathBuf::from("/opt/homebrew/bin/ollama"),
    ]
}

#[cfg(windows)]
fn ollama_fallback_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();
    if let Some(local) = dirs::data_local_dir() {
        locations.push(local.join("Programs/Ollama/ollama.exe"));
    }
    locations
}

#[cfg(unix)]
fn gemini_fallback_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();
    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".npm-global/bin/gemini"));
        locations.push(home.join(".local/bin/gemini"));
    }
    locations.push(PathBuf::from("/usr/local/bin/gemini"));
    locations
}

#[cfg(windows)]
fn gemini_fallback_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();
    if let Some(data) = dirs::data_dir() {
        locations.push(data.join("npm/gemini.cmd"));
    }
    locations
}
