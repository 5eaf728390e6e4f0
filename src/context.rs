//! Service context bundling all port trait objects.

use std::io;
use std::path::Path;

use crate::adapters::live::{GeminiGenerator, HttpGenerator, LiveFileSystem};
use crate::adapters::recording::{RecordingFileSystem, RecordingGenerator};
use crate::adapters::replaying::{ReplayingFileSystem, ReplayingGenerator};
use crate::cassette::config::CassetteConfig;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::{Backend, Cassettes, Settings};
use crate::error::Error;
use crate::ports::filesystem::FileSystem;
use crate::ports::generator::{GenerationFuture, GenerationRequest, Generator};

/// Bundles all port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live, replaying,
/// recording).
pub struct ServiceContext {
    /// Filesystem for file I/O.
    pub fs: Box<dyn FileSystem>,
    /// Generation service client.
    pub generator: Box<dyn Generator>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(fs: Box<dyn FileSystem>, generator: Box<dyn Generator>) -> Self {
        Self { fs, generator }
    }

    /// Creates a live context talking to the real disk and the configured backend.
    #[must_use]
    pub fn live(settings: &Settings) -> Self {
        Self::new(Box::new(LiveFileSystem), live_generator(settings))
    }

    /// Creates a live context whose interactions are recorded into a
    /// timestamped cassette directory under `root`.
    ///
    /// Drop the context before calling [`RecordingSession::finish`].
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette directory cannot be created.
    pub fn recording_at(
        settings: &Settings,
        root: &Path,
    ) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(root)?;
        let ctx = Self::new(
            Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), session.fs.clone())),
            Box::new(RecordingGenerator::new(live_generator(settings), session.generator.clone())),
        );
        Ok((ctx, session))
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// Each port gets its own replayer so per-port cursors are independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        Ok(Self::new(
            Box::new(ReplayingFileSystem::new(CassetteReplayer::for_port(&cassette, "fs"))),
            Box::new(ReplayingGenerator::new(CassetteReplayer::for_port(&cassette, "generator"))),
        ))
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette panic with a clear message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;
        Ok(Self::new(
            match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => Box::new(PanickingFileSystem),
            },
            match replayers.generator {
                Some(r) => Box::new(ReplayingGenerator::new(r)),
                None => Box::new(PanickingGenerator),
            },
        ))
    }

    /// Builds the context the settings ask for. A recording session is
    /// returned alongside when recording is on. A replay path may be a single
    /// cassette file or a recorded session directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cassette`] if a cassette cannot be loaded or created.
    pub fn from_settings(settings: &Settings) -> Result<(Self, Option<RecordingSession>), Error> {
        match &settings.cassettes {
            Cassettes::Off => Ok((Self::live(settings), None)),
            Cassettes::Record(root) => {
                let (ctx, session) = Self::recording_at(settings, root).map_err(Error::Cassette)?;
                Ok((ctx, Some(session)))
            }
            Cassettes::Replay(path) if path.is_dir() => {
                let config = CassetteConfig::from_session_dir(path);
                Ok((Self::replaying_from(&config).map_err(Error::Cassette)?, None))
            }
            Cassettes::Replay(path) => {
                Ok((Self::replaying(path).map_err(Error::Cassette)?, None))
            }
        }
    }
}

fn live_generator(settings: &Settings) -> Box<dyn Generator> {
    match &settings.backend {
        Backend::Gemini { model } => {
            Box::new(GeminiGenerator::new(model.clone(), settings.api_key.clone()))
        }
        Backend::Http { endpoint } => {
            Box::new(HttpGenerator::new(endpoint.clone(), settings.api_key.clone()))
        }
    }
}

// --- Panicking adapters for unspecified ports ---

struct PanickingFileSystem;
impl FileSystem for PanickingFileSystem {
    fn read_to_string(&self, _path: &Path) -> io::Result<String> {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }
    fn write(&self, _path: &Path, _contents: &str) -> io::Result<()> {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }
    fn exists(&self, _path: &Path) -> bool {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }
}

struct PanickingGenerator;
impl Generator for PanickingGenerator {
    fn generate(&self, _request: &GenerationRequest) -> GenerationFuture<'_> {
        panic!(
            "Generator port not configured in CassetteConfig: no cassette loaded for generator"
        );
    }
}
