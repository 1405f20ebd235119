//! Document loading, configuration, and reporting around the
//! `apiguard-core` rule engine.

pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod report;

use std::path::Path;

use apiguard_core::RuleConfig;

pub use config::LintConfig;
pub use error::LintError;
pub use report::{FileReport, OutputFormat, Summary};

/// Load and lint each file, keeping going past files that fail to load.
pub fn lint_files<P: AsRef<Path>>(files: &[P], config: &RuleConfig) -> Vec<FileReport> {
    files
        .iter()
        .map(|file| {
            let path = file.as_ref();
            let name = path.display().to_string();
            match loader::load_document(path) {
                Ok(document) => {
                    let report = apiguard_core::lint(&document, config);
                    tracing::info!(
                        file = %name,
                        errors = report.errors.len(),
                        warnings = report.warnings.len(),
                        "linted"
                    );
                    FileReport::linted(name, report)
                }
                Err(e) => {
                    tracing::warn!(file = %name, error = %e, "failed to load document");
                    FileReport::failed(name, &e)
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lint_files_continues_past_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.yaml");
        std::fs::write(
            &good,
            r#"
swagger: "2.0"
produces: [application/json]
paths:
  /pets:
    get:
      operationId: listPets
"#,
        )
        .unwrap();
        let missing = dir.path().join("missing.yaml");

        let results = lint_files(&[&missing, &good], &RuleConfig::recommended());
        assert_eq!(results.len(), 2);
        assert!(results[0].failure.as_deref().unwrap().starts_with("E2000"));
        assert!(results[1].failure.is_none());
        assert!(!results[1].report.has_errors());
        assert_eq!(results[1].report.warnings.len(), 1);
        assert_eq!(results[1].report.warnings[0].path, "paths./pets.get.summary");
    }
}
