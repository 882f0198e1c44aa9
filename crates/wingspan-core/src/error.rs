use thiserror::Error;

#[derive(Debug, Error)]
pub enum WingspanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid scene: {0}")]
    InvalidScene(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, WingspanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_converts() {
        fn open_missing() -> Result<std::fs::File> {
            Ok(std::fs::File::open("/definitely/not/a/real/path.json")?)
        }
        let err = open_missing().unwrap_err();
        assert!(matches!(err, WingspanError::Io(_)));
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_display_messages() {
        let err = WingspanError::InvalidScene("curve 'body' has 3 points".into());
        assert_eq!(err.to_string(), "Invalid scene: curve 'body' has 3 points");
        let err = WingspanError::NotFound("wing9".into());
        assert_eq!(err.to_string(), "Not found: wing9");
    }
}
