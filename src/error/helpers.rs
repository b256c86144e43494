use super::{ErrorCode, JobScopeError};

/// Extension trait for converting foreign errors at the collaborator seam
pub trait ErrorExt<T> {
    /// Convert to a communication error for the named tracker operation
    fn to_communication_error(self, operation: &str) -> Result<T, JobScopeError>;

    /// Convert to a communication error with a specific code
    fn to_communication_error_with_code(
        self,
        code: u16,
        operation: &str,
    ) -> Result<T, JobScopeError>;

    /// Convert to a configuration error
    fn to_config_error(self, message: impl Into<String>) -> Result<T, JobScopeError>;
}

impl<T, E> ErrorExt<T> for Result<T, E>
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    fn to_communication_error(self, operation: &str) -> Result<T, JobScopeError> {
        self.to_communication_error_with_code(ErrorCode::COMM_GENERIC, operation)
    }

    fn to_communication_error_with_code(
        self,
        code: u16,
        operation: &str,
    ) -> Result<T, JobScopeError> {
        self.map_err(|e| {
            let source: Box<dyn std::error::Error + Send + Sync> = e.into();
            JobScopeError::communication_with_code(code, operation, source.to_string())
                .with_source(source)
        })
    }

    fn to_config_error(self, message: impl Into<String>) -> Result<T, JobScopeError> {
        self.map_err(|e| JobScopeError::config(message).with_source(e))
    }
}
