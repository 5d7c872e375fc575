use std::io;
use std::result;

use thiserror::Error;

use crate::fieldspec::{Role, SpecError};

/// Exit statuses of an aggregation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Okay = 0,

    /// Bad usage or configuration: missing or unresolvable field specs.
    Help = 1,

    /// Input or output could not be used: unopenable paths, malformed lines.
    FileErr = 2,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// An error found somewhere while aggregating. Every one of them stops the
/// run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("either -k or -K must be specified")]
    MissingKeys,

    #[error("at least one of -s/-S, -c/-C, or -j/-J must be specified")]
    MissingAggregates,

    #[error("error parsing field arguments for {role}: {source}")]
    Spec {
        role: Role,
        source: SpecError,
    },

    #[error("{path}: {source}")]
    Open {
        path: String,
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed input for {role} at line {line}")]
    Malformed {
        role: Role,
        line: u64,
    },

    #[error("{path}: unexpected end of file")]
    UnexpectedEof {
        path: String,
    },

    #[error("could not convert text: {0}")]
    Encoding(String),
}

impl Error {
    pub fn status(&self) -> ExitStatus {
        match *self {
            Error::MissingKeys | Error::MissingAggregates | Error::Spec { .. } => ExitStatus::Help,
            Error::Open { .. }
            | Error::Io(_)
            | Error::Malformed { .. }
            | Error::UnexpectedEof { .. }
            | Error::Encoding(_) => ExitStatus::FileErr,
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::{Error, ExitStatus};
    use crate::fieldspec::{Role, SpecError};

    #[test]
    fn test_configuration_errors_are_usage_errors() {
        assert_eq!(Error::MissingKeys.status(), ExitStatus::Help);
        assert_eq!(Error::MissingAggregates.status(), ExitStatus::Help);
        assert_eq!(
            Error::Spec {
                role: Role::Sum,
                source: SpecError::LabelNotFound("qty".to_string()),
            }
            .status(),
            ExitStatus::Help,
        );
    }

    #[test]
    fn test_data_errors_are_file_errors() {
        let err = Error::Malformed { role: Role::Join, line: 4 };

        assert_eq!(err.status(), ExitStatus::FileErr);
        assert_eq!(err.status().code(), 2);
        assert_eq!(err.to_string(), "malformed input for join fields (-j/-J) at line 4");
    }
}
