//! Run settings, read once from the environment at process entry.

use std::path::PathBuf;

use crate::error::Error;

/// Environment variable holding the generation service credential.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Environment variable selecting the generation backend.
pub const BACKEND_VAR: &str = "CHANGEGEN_BACKEND";
/// Environment variable overriding the Gemini model id.
pub const MODEL_VAR: &str = "CHANGEGEN_MODEL";
/// Environment variable holding the HTTP backend endpoint.
pub const ENDPOINT_VAR: &str = "CHANGEGEN_ENDPOINT";
/// Environment variable naming a directory to record cassettes into.
pub const RECORD_VAR: &str = "CHANGEGEN_RECORD";
/// Environment variable naming a cassette file to replay.
pub const REPLAY_VAR: &str = "CHANGEGEN_REPLAY";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Which generation service implementation to talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// Google Gemini `generateContent`.
    Gemini {
        /// Model id, e.g. `gemini-1.5-flash`.
        model: String,
    },
    /// A plain JSON endpoint accepting `{prompt, language, output_format}`.
    Http {
        /// Full URL the request is POSTed to.
        endpoint: String,
    },
}

/// How port interactions are captured or served for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cassettes {
    /// Talk to the real disk and service only.
    Off,
    /// Record every interaction into per-port cassettes under this directory.
    Record(PathBuf),
    /// Serve every interaction from this cassette file.
    Replay(PathBuf),
}

/// Settings for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Credential for the generation service. Not validated here; a missing
    /// key surfaces as an authorization failure from the service.
    pub api_key: Option<String>,
    /// Selected backend.
    pub backend: Backend,
    /// Record/replay mode.
    pub cassettes: Cassettes,
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend name is unknown or the HTTP backend
    /// has no endpoint.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`Settings::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend = match non_empty(BACKEND_VAR).as_deref().map(str::trim) {
            None | Some("gemini") => Backend::Gemini {
                model: non_empty(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            },
            Some("http") => {
                let endpoint = non_empty(ENDPOINT_VAR).ok_or_else(|| {
                    Error::Config(format!("{BACKEND_VAR}=http requires {ENDPOINT_VAR}"))
                })?;
                Backend::Http { endpoint }
            }
            Some(other) => {
                return Err(Error::Config(format!(
                    "unknown {BACKEND_VAR} {other:?}; expected \"gemini\" or \"http\""
                )))
            }
        };

        let cassettes = match (non_empty(RECORD_VAR), non_empty(REPLAY_VAR)) {
            (Some(_), Some(_)) => {
                return Err(Error::Config(format!(
                    "{RECORD_VAR} and {REPLAY_VAR} cannot be set together"
                )))
            }
            (Some(dir), None) => Cassettes::Record(PathBuf::from(dir)),
            (None, Some(file)) => Cassettes::Replay(PathBuf::from(file)),
            (None, None) => Cassettes::Off,
        };

        Ok(Self { api_key: lookup(API_KEY_VAR), backend, cassettes })
    }
}
