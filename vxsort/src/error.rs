use thiserror::Error;

/// Failures reported by the checked entry points before any element is moved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VxSortError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Unsupported element type: {0}")]
    UnsupportedType(&'static str),
}

pub type Result<T> = std::result::Result<T, VxSortError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = VxSortError::InvalidArgument("left 4 > right 2".to_string());
        assert_eq!(err.to_string(), "Invalid argument: left 4 > right 2");

        let err = VxSortError::UnsupportedType("i16");
        assert_eq!(err.to_string(), "Unsupported element type: i16");
    }
}
