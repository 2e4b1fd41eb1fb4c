use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<std::io::Error> for RepositoryError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => {
                RepositoryError::Io(format!("Company export not found: {err}"))
            }
            _ => RepositoryError::Io(err.to_string()),
        }
    }
}

impl From<csv::Error> for RepositoryError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|pos| pos.line());
        match (err.kind(), line) {
            (csv::ErrorKind::Io(_), _) => RepositoryError::Io(err.to_string()),
            (csv::ErrorKind::Utf8 { .. }, Some(line)) => {
                RepositoryError::ValidationError(format!("Invalid UTF-8 on line {line}"))
            }
            (_, Some(line)) => RepositoryError::Csv(format!("line {line}: {err}")),
            (_, None) => RepositoryError::Csv(err.to_string()),
        }
    }
}
