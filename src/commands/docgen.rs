//! `docgen`: append generated documentation for changed files to the README.

use std::path::Path;

use crate::context::ServiceContext;
use crate::error::Error;
use crate::pipeline::{generate_docs, RunOutcome, README_PATH};

/// Document every Python file listed in `manifest` in `README.md`
/// relative to the working directory.
///
/// # Errors
///
/// Returns an error if the manifest or the README cannot be read, or the
/// README cannot be rewritten.
pub async fn run_with_context(ctx: &ServiceContext, manifest: &Path) -> Result<RunOutcome, Error> {
    generate_docs(ctx, manifest, Path::new(README_PATH)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use serde_json::json;

    #[tokio::test]
    async fn replays_a_run_with_a_failed_generation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docgen.cassette.yaml");
        let mut rec = CassetteRecorder::new(&path, "docgen", "abc");
        rec.record(
            "fs",
            "read_to_string",
            json!({"path": "changed.txt"}),
            json!({"Ok": "app.py\nbroken.py\n"}),
        );
        rec.record("fs", "exists", json!({"path": "README.md"}), json!(false));
        rec.record("fs", "read_to_string", json!({"path": "app.py"}), json!({"Ok": "print(1)"}));
        rec.record("generator", "generate", json!({}), json!({"Ok": {"text": "App docs."}}));
        rec.record("fs", "read_to_string", json!({"path": "broken.py"}), json!({"Ok": "x ="}));
        rec.record(
            "generator",
            "generate",
            json!({}),
            json!({"Err": "generation endpoint returned status 400: bad request"}),
        );
        rec.record("fs", "write", json!({"path": "README.md"}), json!({"Ok": null}));
        rec.finish().unwrap();

        let ctx = ServiceContext::replaying(&path).unwrap();
        let outcome = run_with_context(&ctx, Path::new("changed.txt")).await.unwrap();
        let RunOutcome::Completed(report) = outcome else {
            panic!("expected a completed run");
        };
        assert_eq!(report.attempted(), 2);
        assert_eq!(report.succeeded(), 1);
        let failure = report.failures().next().unwrap();
        assert_eq!(failure.file, "broken.py");
        assert!(failure.outcome.as_ref().unwrap_err().to_string().contains("400"));
    }
}
