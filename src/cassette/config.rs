//! Cassette configuration for composable per-port replay.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Per-port cassette file paths. Ports without a cassette path panic if
/// called during replay.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Path to the generator port cassette file.
    pub generator: Option<PathBuf>,
    /// Path to the filesystem port cassette file.
    pub fs: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
pub struct PortReplayers {
    /// Replayer for the generator port.
    pub generator: Option<CassetteReplayer>,
    /// Replayer for the filesystem port.
    pub fs: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Returns a config where all port paths are `None`.
    #[must_use]
    pub fn panic_on_unspecified() -> Self {
        Self::default()
    }

    /// Config for a directory written by a recording session. Ports whose
    /// cassette file is absent stay unconfigured.
    #[must_use]
    pub fn from_session_dir(dir: &Path) -> Self {
        let existing = |port: &str| {
            let path = dir.join(format!("{port}.cassette.yaml"));
            path.is_file().then_some(path)
        };
        Self { generator: existing("generator"), fs: existing("fs") }
    }

    /// Load all configured per-port cassette files and create replayers.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        let load = |path: &Option<PathBuf>, port: &str| -> Result<Option<CassetteReplayer>, String> {
            path.as_deref()
                .map(|p| Cassette::load(p).map(|c| CassetteReplayer::for_port(&c, port)))
                .transpose()
        };
        Ok(PortReplayers { generator: load(&self.generator, "generator")?, fs: load(&self.fs, "fs")? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use serde_json::json;

    #[test]
    fn load_all_with_no_cassettes() {
        let replayers = CassetteConfig::panic_on_unspecified().load_all().unwrap();
        assert!(replayers.generator.is_none());
        assert!(replayers.fs.is_none());
    }

    #[test]
    fn load_per_port_cassettes() {
        let dir = tempfile::tempdir().unwrap();

        let generator_path = dir.path().join("generator.cassette.yaml");
        let mut rec = CassetteRecorder::new(&generator_path, "generator", "abc");
        rec.record("generator", "generate", json!({"prompt": "p"}), json!({"Ok": {"text": "t"}}));
        rec.finish().unwrap();

        let config = CassetteConfig { generator: Some(generator_path), fs: None };
        let mut replayers = config.load_all().unwrap();

        let generator = replayers.generator.as_mut().unwrap();
        let i = generator.next_interaction("generator", "generate");
        assert_eq!(i.output, json!({"Ok": {"text": "t"}}));
        assert!(replayers.fs.is_none());
    }

    #[test]
    fn session_dir_picks_up_existing_port_files() {
        let dir = tempfile::tempdir().unwrap();
        CassetteRecorder::new(dir.path().join("fs.cassette.yaml"), "fs", "abc").finish().unwrap();

        let config = CassetteConfig::from_session_dir(dir.path());
        assert_eq!(config.fs, Some(dir.path().join("fs.cassette.yaml")));
        assert!(config.generator.is_none());
    }

    #[test]
    fn missing_cassette_file_is_an_error() {
        let config = CassetteConfig {
            generator: Some(PathBuf::from("/nonexistent/generator.cassette.yaml")),
            fs: None,
        };
        assert!(config.load_all().is_err());
    }
}
