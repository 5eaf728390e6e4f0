//! Records file reads, writes and existence checks.

use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::Tape;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::FileSystem;

/// Wraps a [`FileSystem`], appending every call to the `fs` cassette.
///
/// Written contents are not stored: they are either generator output, which
/// the `generator` cassette already holds, or the merged README. Only the
/// path and the byte count are kept.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    tape: Tape,
}

impl RecordingFileSystem {
    /// Records calls made to `inner` into `recorder`.
    pub fn new(inner: Box<dyn FileSystem>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, tape: Tape::new("fs", recorder) }
    }
}

#[derive(Serialize)]
struct Target {
    path: String,
}

#[derive(Serialize)]
struct Written {
    path: String,
    bytes: usize,
}

fn target(path: &Path) -> Target {
    Target { path: path.display().to_string() }
}

impl FileSystem for RecordingFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let read = self.inner.read_to_string(path);
        self.tape.result("read_to_string", &target(path), &read);
        read
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        let written = self.inner.write(path, contents);
        let input = Written { path: path.display().to_string(), bytes: contents.len() };
        self.tape.result("write", &input, &written);
        written
    }

    fn exists(&self, path: &Path) -> bool {
        let found = self.inner.exists(path);
        self.tape.value("exists", &target(path), &found);
        found
    }
}
