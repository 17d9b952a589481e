//! Closed error taxonomy (spec §7) plus exit-code mapping (spec §6).

use std::fmt;

/// Stable, closed set of issue/error codes. Never add a variant without
/// also updating the taxonomy table in spec.md §7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Parse
    ParseError,
    InvalidJson,
    RepairFailed,
    // Structure
    MissingProperty,
    MissingNodeName,
    DuplicateNodeName,
    ConnectionDangling,
    NoTriggerWhenActive,
    // Type
    UnknownNodeType,
    InvalidNodeTypeFormat,
    // Config
    MissingRequiredProperty,
    InvalidOption,
    TypeMismatch,
    ExpressionMissingPrefix,
    ExpressionMixedLiteral,
    // Version
    OutdatedTypeVersion,
    TypeversionExceedsMax,
    BreakingChange,
    // AI
    MissingLanguageModel,
    TooManyLanguageModels,
    FallbackMissingSecondModel,
    MissingPromptText,
    StreamingWrongTarget,
    StreamingWithMainOutput,
    MissingOutputParser,
    MultipleMemoryConnections,
    MissingToolDescription,
    MissingSystemMessage,
    // Strict profile
    OptionalPropertyNoDefault,
    MissingNodeDescription,
    // Security
    EnhancedSecurity,
    // Diff
    InvalidOperationType,
    TargetNodeMissing,
    NameCollision,
    ConnectionTargetMissing,
    // Collaborator
    ConnectionError,
    NoResponse,
    RateLimitError,
    AuthError,
    ValidationRejected,
}

impl ErrorCode {
    /// The stable wire string, as used in `ValidationIssue.code` and
    /// diff/collaborator error payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ParseError => "PARSE_ERROR",
            Self::InvalidJson => "INVALID_JSON",
            Self::RepairFailed => "REPAIR_FAILED",
            Self::MissingProperty => "MISSING_PROPERTY",
            Self::MissingNodeName => "MISSING_NODE_NAME",
            Self::DuplicateNodeName => "DUPLICATE_NODE_NAME",
            Self::ConnectionDangling => "CONNECTION_DANGLING",
            Self::NoTriggerWhenActive => "NO_TRIGGER_WHEN_ACTIVE",
            Self::UnknownNodeType => "UNKNOWN_NODE_TYPE",
            Self::InvalidNodeTypeFormat => "INVALID_NODE_TYPE_FORMAT",
            Self::MissingRequiredProperty => "MISSING_REQUIRED_PROPERTY",
            Self::InvalidOption => "INVALID_OPTION",
            Self::TypeMismatch => "TYPE_MISMATCH",
            Self::ExpressionMissingPrefix => "EXPRESSION_MISSING_PREFIX",
            Self::ExpressionMixedLiteral => "EXPRESSION_MIXED_LITERAL",
            Self::OutdatedTypeVersion => "OUTDATED_TYPE_VERSION",
            Self::TypeversionExceedsMax => "TYPEVERSION_EXCEEDS_MAX",
            Self::BreakingChange => "BREAKING_CHANGE",
            Self::MissingLanguageModel => "MISSING_LANGUAGE_MODEL",
            Self::TooManyLanguageModels => "TOO_MANY_LANGUAGE_MODELS",
            Self::FallbackMissingSecondModel => "FALLBACK_MISSING_SECOND_MODEL",
            Self::MissingPromptText => "MISSING_PROMPT_TEXT",
            Self::StreamingWrongTarget => "STREAMING_WRONG_TARGET",
            Self::StreamingWithMainOutput => "STREAMING_WITH_MAIN_OUTPUT",
            Self::MissingOutputParser => "MISSING_OUTPUT_PARSER",
            Self::MultipleMemoryConnections => "MULTIPLE_MEMORY_CONNECTIONS",
            Self::MissingToolDescription => "MISSING_TOOL_DESCRIPTION",
            Self::MissingSystemMessage => "MISSING_SYSTEM_MESSAGE",
            Self::OptionalPropertyNoDefault => "OPTIONAL_PROPERTY_NO_DEFAULT",
            Self::MissingNodeDescription => "MISSING_NODE_DESCRIPTION",
            Self::EnhancedSecurity => "ENHANCED_SECURITY",
            Self::InvalidOperationType => "INVALID_OPERATION_TYPE",
            Self::TargetNodeMissing => "TARGET_NODE_MISSING",
            Self::NameCollision => "NAME_COLLISION",
            Self::ConnectionTargetMissing => "CONNECTION_TARGET_MISSING",
            Self::ConnectionError => "CONNECTION_ERROR",
            Self::NoResponse => "NO_RESPONSE",
            Self::RateLimitError => "RATE_LIMIT_ERROR",
            Self::AuthError => "AUTH_ERROR",
            Self::ValidationRejected => "VALIDATION_REJECTED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process exit codes (spec §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    Usage = 64,
    Data = 65,
    MissingInput = 66,
    Io = 70,
    Transient = 71,
    Protocol = 72,
    Auth = 73,
    Config = 78,
    Interrupted = 130,
    Terminated = 143,
}

impl ExitCode {
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Top-level error type raised across crate boundaries. Validation
/// findings are never raised through this type — they are returned as
/// `ValidationIssue`s. Only parse failure and collaborator failures
/// raise (spec §7 "Propagation policy").
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("failed to parse workflow: {message}")]
    Parse { message: String, line: Option<u32>, col: Option<u32> },

    #[error("validation failed with {error_count} error(s)")]
    ValidationFailed { error_count: usize },

    #[error("control plane rejected the request: {message}")]
    ValidationRejected { message: String },

    #[error("could not connect to control plane: {0}")]
    Connection(String),

    #[error("control plane did not respond in time")]
    NoResponse,

    #[error("rate limited by control plane: {0}")]
    RateLimited(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("control plane returned a protocol error: {0}")]
    Protocol(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("input file not found: {0}")]
    MissingInput(String),

    #[error("usage error: {0}")]
    Usage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FlowError {
    /// Maps this error to the process exit code prescribed by spec §6.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Parse { .. } | Self::ValidationFailed { .. } => ExitCode::Data,
            Self::ValidationRejected { .. } => ExitCode::Protocol,
            Self::MissingInput(_) => ExitCode::MissingInput,
            Self::Connection(_) | Self::Io(_) => ExitCode::Io,
            Self::NoResponse | Self::RateLimited(_) => ExitCode::Transient,
            Self::Protocol(_) => ExitCode::Protocol,
            Self::Auth(_) => ExitCode::Auth,
            Self::Config(_) => ExitCode::Config,
            Self::Usage(_) => ExitCode::Usage,
        }
    }

    /// Whether the retry policy (spec §5) should re-enter on this error.
    /// Only collaborator failures are retry-eligible; parse/validation/
    /// config/usage errors never are.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::NoResponse | Self::RateLimited(_)
        )
    }

    /// At least one actionable hint, rendered alongside the message
    /// (spec §7: "no stack traces ... at least one actionable hint").
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "run with --repair to attempt automatic JSON repair",
            Self::ValidationFailed { .. } => "run `flowctl autofix` to see available fixes",
            Self::ValidationRejected { .. } => "the control plane rejected the payload; inspect its message for the offending field",
            Self::MissingInput(_) => "check the path and try again",
            Self::Connection(_) => "check network connectivity and the control-plane base URL",
            Self::NoResponse => "the control plane may be overloaded; retry later",
            Self::RateLimited(_) => "back off and retry; consider lowering concurrency",
            Self::Auth(_) => "re-authenticate with the control plane and retry",
            Self::Protocol(_) => "the control plane returned an unexpected response shape",
            Self::Config(_) => "check your configuration file for missing or malformed keys",
            Self::Usage(_) => "run with --help to see available flags",
            Self::Io(_) => "check file permissions and available disk space",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_match_spec_table() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::Usage.code(), 64);
        assert_eq!(ExitCode::Data.code(), 65);
        assert_eq!(ExitCode::MissingInput.code(), 66);
        assert_eq!(ExitCode::Io.code(), 70);
        assert_eq!(ExitCode::Transient.code(), 71);
        assert_eq!(ExitCode::Protocol.code(), 72);
        assert_eq!(ExitCode::Auth.code(), 73);
        assert_eq!(ExitCode::Config.code(), 78);
        assert_eq!(ExitCode::Interrupted.code(), 130);
        assert_eq!(ExitCode::Terminated.code(), 143);
    }

    #[test]
    fn only_collaborator_errors_are_retryable() {
        assert!(FlowError::Connection("x".into()).is_retryable());
        assert!(FlowError::NoResponse.is_retryable());
        assert!(FlowError::RateLimited("x".into()).is_retryable());
        assert!(!FlowError::Auth("x".into()).is_retryable());
        assert!(!FlowError::ValidationFailed { error_count: 1 }.is_retryable());
        assert!(!FlowError::Usage("x".into()).is_retryable());
    }

    #[test]
    fn validation_failed_exits_65() {
        let err = FlowError::ValidationFailed { error_count: 3 };
        assert_eq!(err.exit_code(), ExitCode::Data);
    }

    #[test]
    fn auth_error_exits_73() {
        assert_eq!(FlowError::Auth("bad token".into()).exit_code(), ExitCode::Auth);
    }

    #[test]
    fn error_code_round_trips_through_display() {
        assert_eq!(ErrorCode::UnknownNodeType.to_string(), "UNKNOWN_NODE_TYPE");
        assert_eq!(ErrorCode::ExpressionMissingPrefix.as_str(), "EXPRESSION_MISSING_PREFIX");
    }
}
