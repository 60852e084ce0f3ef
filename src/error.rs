// Error types for jsdecls
//
// Every error is fatal for the invocation; nothing here is retried.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::syntax::Position;

/// The source text could not be turned into a syntax tree
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("syntax error at {position}: {message}")]
    Syntax { position: Position, message: String },

    #[error("JSX syntax at {position} but JSX is not enabled")]
    JsxNotEnabled { position: Position },

    #[error("failed to set parser language: {0}")]
    Language(String),

    #[error("parser returned no tree")]
    Aborted,
}

impl ParseError {
    /// Position of the offending node, when there is one
    pub fn position(&self) -> Option<Position> {
        match self {
            ParseError::Syntax { position, .. } | ParseError::JsxNotEnabled { position } => {
                Some(*position)
            }
            ParseError::Language(_) | ParseError::Aborted => None,
        }
    }
}

/// A function declaration could not be reduced to a name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("function declaration at {position} has no identifier")]
    MissingIdentifier { position: Position },
}

/// Anything that can stop a scan
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("failed to serialize function names: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ScanError {
    /// Process exit code for this error (2 is left to clap usage errors)
    pub fn exit_code(&self) -> u8 {
        match self {
            ScanError::FileRead { .. } => 3,
            ScanError::Parse(_) => 4,
            ScanError::Extraction(_) => 5,
            ScanError::Serialize(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let read = ScanError::FileRead {
            path: PathBuf::from("missing.js"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        let parse = ScanError::from(ParseError::Aborted);
        let extraction = ScanError::from(ExtractionError::MissingIdentifier {
            position: Position { line: 1, column: 15 },
        });

        assert_eq!(read.exit_code(), 3);
        assert_eq!(parse.exit_code(), 4);
        assert_eq!(extraction.exit_code(), 5);
    }

    #[test]
    fn test_messages_carry_position() {
        let err = ExtractionError::MissingIdentifier {
            position: Position { line: 3, column: 15 },
        };
        assert_eq!(
            err.to_string(),
            "function declaration at 3:16 has no identifier"
        );

        let err = ParseError::Syntax {
            position: Position { line: 2, column: 0 },
            message: "missing `}`".to_string(),
        };
        assert_eq!(err.to_string(), "syntax error at 2:1: missing `}`");
        assert_eq!(err.position(), Some(Position { line: 2, column: 0 }));
    }

    #[test]
    fn test_file_read_message_names_path() {
        let err = ScanError::FileRead {
            path: PathBuf::from("src/missing.js"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert!(err.to_string().starts_with("failed to read src/missing.js"));
    }
}
