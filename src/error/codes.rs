/// Error code registry for jobscope
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Job tracker communication errors
/// - 3000-3999: Identifier errors
#[allow(dead_code)]
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_PARSE_ERROR: u16 = 1002;
    pub const CONFIG_INVALID_VALUE: u16 = 1003;

    // Communication errors (2000-2999)
    pub const COMM_GENERIC: u16 = 2000;
    pub const COMM_REPORTS_UNAVAILABLE: u16 = 2001;
    pub const COMM_EVENTS_UNAVAILABLE: u16 = 2002;
    pub const COMM_DIAGNOSTICS_UNAVAILABLE: u16 = 2003;
    pub const COMM_JOB_NOT_FOUND: u16 = 2004;
    pub const COMM_TIMEOUT: u16 = 2005;

    // Identifier errors (3000-3999)
    pub const ID_GENERIC: u16 = 3000;
    pub const ID_BAD_PREFIX: u16 = 3001;
    pub const ID_BAD_FIELD_COUNT: u16 = 3002;
    pub const ID_BAD_NUMBER: u16 = 3003;
    pub const ID_BAD_TASK_TYPE: u16 = 3004;
    pub const ID_BAD_TRACKER: u16 = 3005;
}

/// Describe an error code in plain words
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        ErrorCode::CONFIG_GENERIC => "Configuration error",
        ErrorCode::CONFIG_NOT_FOUND => "Configuration file not found",
        ErrorCode::CONFIG_PARSE_ERROR => "Configuration could not be parsed",
        ErrorCode::CONFIG_INVALID_VALUE => "Configuration value out of range",
        ErrorCode::COMM_GENERIC => "Job tracker communication failed",
        ErrorCode::COMM_REPORTS_UNAVAILABLE => "Task reports could not be listed",
        ErrorCode::COMM_EVENTS_UNAVAILABLE => "Task completion events could not be fetched",
        ErrorCode::COMM_DIAGNOSTICS_UNAVAILABLE => "Task diagnostics could not be fetched",
        ErrorCode::COMM_JOB_NOT_FOUND => "Job is unknown to the tracker",
        ErrorCode::COMM_TIMEOUT => "Job tracker request timed out",
        ErrorCode::ID_GENERIC => "Malformed identifier",
        ErrorCode::ID_BAD_PREFIX => "Identifier has an unexpected prefix",
        ErrorCode::ID_BAD_FIELD_COUNT => "Identifier has the wrong number of fields",
        ErrorCode::ID_BAD_NUMBER => "Identifier contains a non-numeric field",
        ErrorCode::ID_BAD_TASK_TYPE => "Identifier names an unknown task type",
        ErrorCode::ID_BAD_TRACKER => "Identifier has an invalid tracker field",
        _ => "Unknown error code",
    }
}
