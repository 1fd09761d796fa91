//! Detection of the front-end framework from the project's `package.json`.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::error::{GeneseError, GeneseResult};
use crate::render::Framework;

const PACKAGE_JSON: &str = "package.json";
const ANGULAR_PACKAGE: &str = "@angular/core";
const REACT_PACKAGE: &str = "react";

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PackageJson {
    dependencies: IndexMap<String, serde_json::Value>,
    dev_dependencies: IndexMap<String, serde_json::Value>,
}

impl PackageJson {
    fn depends_on(&self, package: &str) -> bool {
        self.dependencies.contains_key(package) || self.dev_dependencies.contains_key(package)
    }
}

/// Read `<project_dir>/package.json` and pick the framework it depends on.
/// Angular wins when both are present.
pub fn detect_framework(project_dir: &Path) -> GeneseResult<Framework> {
    let path = project_dir.join(PACKAGE_JSON);
    let contents = fs::read_to_string(&path).map_err(|err| {
        GeneseError::PackageContext(format!("cannot read {}: {err}", path.display()))
    })?;
    let package: PackageJson = serde_json::from_str(&contents).map_err(|err| {
        GeneseError::PackageContext(format!("cannot parse {}: {err}", path.display()))
    })?;

    let framework = if package.depends_on(ANGULAR_PACKAGE) {
        Framework::Angular
    } else if package.depends_on(REACT_PACKAGE) {
        Framework::React
    } else {
        return Err(GeneseError::UnknownProjectType);
    };
    debug!(%framework, path = %path.display(), "Detected framework.");
    Ok(framework)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project(package_json: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PACKAGE_JSON), package_json).unwrap();
        dir
    }

    #[test]
    fn test_detects_angular() {
        let dir = project(r#"{ "dependencies": { "@angular/core": "^17.0.0", "rxjs": "~7.8.0" } }"#);
        assert_eq!(detect_framework(dir.path()).unwrap(), Framework::Angular);
    }

    #[test]
    fn test_detects_react() {
        let dir = project(r#"{ "dependencies": { "react": "^18.2.0", "react-dom": "^18.2.0" } }"#);
        assert_eq!(detect_framework(dir.path()).unwrap(), Framework::React);
    }

    #[test]
    fn test_dev_dependencies_count() {
        let dir = project(r#"{ "devDependencies": { "react": "^18.2.0" } }"#);
        assert_eq!(detect_framework(dir.path()).unwrap(), Framework::React);
    }

    #[test]
    fn test_angular_wins_over_react() {
        let dir = project(
            r#"{ "dependencies": { "react": "^18.2.0" }, "devDependencies": { "@angular/core": "^17.0.0" } }"#,
        );
        assert_eq!(detect_framework(dir.path()).unwrap(), Framework::Angular);
    }

    #[test]
    fn test_unknown_project_type() {
        let dir = project(r#"{ "name": "backend", "dependencies": { "express": "^4.0.0" } }"#);
        assert!(matches!(
            detect_framework(dir.path()),
            Err(GeneseError::UnknownProjectType)
        ));
    }

    #[test]
    fn test_missing_package_json() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            detect_framework(dir.path()),
            Err(GeneseError::PackageContext(_))
        ));
    }

    #[test]
    fn test_malformed_package_json() {
        let dir = project("{ not json");
        assert!(matches!(
            detect_framework(dir.path()),
            Err(GeneseError::PackageContext(_))
        ));
    }
}
