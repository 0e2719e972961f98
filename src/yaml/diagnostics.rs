//! YAML error types rendered through miette

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum YamlError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),

    #[error("Failed to read design file: {0}")]
    #[diagnostic(code(susp::yaml::io))]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize YAML: {0}")]
    #[diagnostic(code(susp::yaml::serialize))]
    Serialize(#[from] serde_yml::Error),
}

/// A parse or type error pointing at its location in the source
#[derive(Debug, Error, Diagnostic)]
#[error("{filename}: {message}")]
#[diagnostic(code(susp::yaml::syntax), help("values are millimetres and radians, bounds are [[min, max]] per axis"))]
pub struct YamlSyntaxError {
    pub filename: String,
    pub message: String,

    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: Option<SourceSpan>,
}

impl YamlSyntaxError {
    pub fn from_serde_error(error: &serde_yml::Error, content: &str, filename: &str) -> Self {
        let span = error.location().map(|location| {
            let offset = location.index().min(content.len());
            SourceSpan::from((offset, 1usize.min(content.len() - offset)))
        });

        Self {
            filename: filename.to_string(),
            message: error.to_string(),
            src: NamedSource::new(filename, content.to_string()),
            span,
        }
    }

    /// 1-based line of the error, if known
    pub fn line(&self) -> Option<usize> {
        let offset = self.span?.offset();
        let bytes = self.src.inner().as_bytes();
        let before = &bytes[..offset.min(bytes.len())];
        Some(before.iter().filter(|b| **b == b'\n').count() + 1)
    }
}
