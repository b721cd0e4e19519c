use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("package manager not found")]
    NotFound,

    #[error("command failed: {stderr}")]
    CommandFailed { stderr: String },

    #[error("command exited with status {code}")]
    ExitStatus { code: i32 },

    #[error("unparsable output from {context}: {details}")]
    ParseError {
        context: &'static str,
        details: String,
    },

    #[error("io error ({kind}): {message}")]
    Io {
        kind: std::io::ErrorKind,
        message: String,
    },
}

impl BackendError {
    pub fn parse(context: &'static str, details: impl Into<String>) -> Self {
        Self::ParseError {
            context,
            details: details.into(),
        }
    }
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BackendError;

    #[test]
    fn io_error_conversion_keeps_kind_and_message() {
        let mapped = BackendError::from(std::io::Error::other("spawn failed"));
        assert!(
            matches!(mapped, BackendError::Io { kind, ref message } if kind == std::io::ErrorKind::Other && message.contains("spawn failed"))
        );
    }

    #[test]
    fn command_failed_display_includes_stderr() {
        let error = BackendError::CommandFailed {
            stderr: "Error: No such keg: php99".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "command failed: Error: No such keg: php99"
        );
    }

    #[test]
    fn parse_helper_sets_context() {
        let error = BackendError::parse("php -v", "empty output");
        assert!(matches!(
            error,
            BackendError::ParseError {
                context: "php -v",
                ..
            }
        ));
    }
}
