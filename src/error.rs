use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No files provided for ZIP creation")]
    EmptyInput,

    #[error("File does not exist: {0}")]
    SourceNotFound(String),

    #[error("Invalid output path: directory does not exist: {}", .0.display())]
    InvalidOutputPath(PathBuf),

    #[error("Failed to create ZIP archive: {0}")]
    ArchiveWrite(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub fn custom<T: Into<String>>(msg: T) -> Self {
        Error::Custom(msg.into())
    }

    /// The request field a validation failure should be attached to, if any.
    ///
    /// Credential mismatches surface as a field-level failure on `email`,
    /// matching the login boundary contract.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Error::InvalidCredentials => Some("email"),
            _ => None,
        }
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Custom(err.to_string())
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Custom(err)
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use std::path::PathBuf;

    #[test]
    fn messages_match_the_documented_formats() {
        assert_eq!(
            Error::EmptyInput.to_string(),
            "No files provided for ZIP creation"
        );
        assert_eq!(
            Error::SourceNotFound("reports/missing.txt".into()).to_string(),
            "File does not exist: reports/missing.txt"
        );
        assert_eq!(
            Error::InvalidOutputPath(PathBuf::from("/no-such-dir")).to_string(),
            "Invalid output path: directory does not exist: /no-such-dir"
        );
        assert_eq!(
            Error::ArchiveWrite("permission denied".into()).to_string(),
            "Failed to create ZIP archive: permission denied"
        );
    }

    #[test]
    fn invalid_credentials_attach_to_the_email_field() {
        assert_eq!(Error::InvalidCredentials.field(), Some("email"));
        assert_eq!(Error::EmptyInput.field(), None);
    }
}
