//! YAML loading with source-located errors

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::yaml::diagnostics::{YamlError, YamlSyntaxError};

/// Parse YAML content into a typed value, keeping the source for diagnostics
pub fn parse_yaml<T: DeserializeOwned + 'static>(content: &str, filename: &str) -> Result<T, YamlError> {
    serde_yml::from_str(content).map_err(|e| {
        YamlError::Syntax(YamlSyntaxError::from_serde_error(&e, content, filename))
    })
}

/// Read and parse a YAML file
pub fn parse_yaml_file<T: DeserializeOwned + 'static>(path: &Path) -> Result<T, YamlError> {
    let content = std::fs::read_to_string(path)?;
    parse_yaml(&content, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sampling::Bound;
    use std::collections::BTreeMap;

    #[test]
    fn test_parse_bound_table() {
        let yaml = "LAF: [[127.0, 127.0], [203.2, 220.98], [12.7, 38.1]]\nLAR: [[-127.0, -127.0], [0, 0], [12.7, 38.1]]\n";
        let bounds: BTreeMap<String, Bound> = parse_yaml(yaml, "bounds.yaml").unwrap();
        assert_eq!(bounds.len(), 2);
        assert_eq!(bounds["LAR"].rows[1], [0.0, 0.0]);
    }

    #[test]
    fn test_error_points_at_offending_line() {
        let yaml = "LAF: [[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]\nLAR: [[1.0, 2.0\n";
        let err = parse_yaml::<BTreeMap<String, Bound>>(yaml, "bounds.yaml").unwrap_err();
        match err {
            YamlError::Syntax(syntax) => {
                assert_eq!(syntax.filename, "bounds.yaml");
                assert!(syntax.line().is_some_and(|line| line >= 2));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_yaml_file::<Bound>(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, YamlError::Io(_)));
    }
}
