//! `testgen`: generate pytest modules for changed files.

use std::path::Path;

use crate::context::ServiceContext;
use crate::error::Error;
use crate::pipeline::{generate_tests, RunOutcome, TESTS_DIR};

/// Generate tests for every Python file listed in `manifest`, writing them
/// under `tests/` relative to the working directory.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read.
pub async fn run_with_context(ctx: &ServiceContext, manifest: &Path) -> Result<RunOutcome, Error> {
    generate_tests(ctx, manifest, Path::new(TESTS_DIR)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use serde_json::json;

    #[tokio::test]
    async fn replays_a_recorded_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("testgen.cassette.yaml");
        let mut rec = CassetteRecorder::new(&path, "testgen", "abc");
        rec.record("fs", "read_to_string", json!({"path": "changed.txt"}), json!({"Ok": "app.py\n"}));
        rec.record("fs", "read_to_string", json!({"path": "app.py"}), json!({"Ok": "print(1)"}));
        rec.record(
            "generator",
            "generate",
            json!({"target_file_name": "app.py"}),
            json!({"Ok": {"text": "def test_app(): assert True"}}),
        );
        rec.record("fs", "write", json!({"path": "tests/test_app.py"}), json!({"Ok": null}));
        rec.finish().unwrap();

        let ctx = ServiceContext::replaying(&path).unwrap();
        let outcome = run_with_context(&ctx, Path::new("changed.txt")).await.unwrap();
        match outcome {
            RunOutcome::Completed(report) => {
                assert_eq!(report.succeeded(), 1);
                assert_eq!(
                    report.items[0].outcome.as_deref().unwrap(),
                    "def test_app(): assert True"
                );
            }
            RunOutcome::NoSources => panic!("expected app.py to be processed"),
        }
    }
}
