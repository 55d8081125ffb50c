use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrabbleError {
    #[error("Lexicon download failed: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Lexicon error: {message}")]
    LexiconError { message: String },

    #[error("Illegal move: {message}")]
    IllegalMove { message: String },

    #[error("Game error: {message}")]
    GameError { message: String },

    #[error("Report generation error: {message}")]
    ReportError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    GameLogic,
    Output,
    System,
}

impl ScrabbleError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScrabbleError::FetchError(_) => ErrorCategory::Network,
            ScrabbleError::ConfigValidationError { .. }
            | ScrabbleError::InvalidConfigValueError { .. }
            | ScrabbleError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ScrabbleError::LexiconError { .. }
            | ScrabbleError::IllegalMove { .. }
            | ScrabbleError::GameError { .. } => ErrorCategory::GameLogic,
            ScrabbleError::CsvError(_)
            | ScrabbleError::ZipError(_)
            | ScrabbleError::SerializationError(_)
            | ScrabbleError::ReportError { .. } => ErrorCategory::Output,
            ScrabbleError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ScrabbleError::FetchError(_) => ErrorSeverity::Medium,
            ScrabbleError::ConfigValidationError { .. }
            | ScrabbleError::InvalidConfigValueError { .. }
            | ScrabbleError::MissingConfigError { .. } => ErrorSeverity::High,
            ScrabbleError::LexiconError { .. } => ErrorSeverity::High,
            ScrabbleError::IllegalMove { .. } => ErrorSeverity::Medium,
            ScrabbleError::GameError { .. } => ErrorSeverity::High,
            ScrabbleError::CsvError(_)
            | ScrabbleError::ZipError(_)
            | ScrabbleError::SerializationError(_)
            | ScrabbleError::ReportError { .. } => ErrorSeverity::Medium,
            ScrabbleError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScrabbleError::FetchError(_) => {
                "Could not download the word list. Check the URL and your connection.".to_string()
            }
            ScrabbleError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            ScrabbleError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => {
                format!("'{}' is not a valid value for '{}': {}", value, field, reason)
            }
            ScrabbleError::MissingConfigError { field } => {
                format!("Required setting '{}' is missing", field)
            }
            ScrabbleError::LexiconError { message } => {
                format!("Word list problem: {}", message)
            }
            ScrabbleError::IllegalMove { message } => {
                format!("That move is not legal: {}", message)
            }
            ScrabbleError::GameError { message } => {
                format!("Game could not continue: {}", message)
            }
            ScrabbleError::CsvError(_) | ScrabbleError::ReportError { .. } => {
                "Failed to produce the results report.".to_string()
            }
            ScrabbleError::ZipError(_) => "Failed to bundle the report archive.".to_string(),
            ScrabbleError::SerializationError(_) => {
                "Failed to serialize the results document.".to_string()
            }
            ScrabbleError::IoError(e) => format!("File system error: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Network => {
                "Verify the lexicon URL is reachable, or point --lexicon at a local file".to_string()
            }
            ErrorCategory::Configuration => {
                "Fix the configuration value and run again; see --help for accepted values"
                    .to_string()
            }
            ErrorCategory::GameLogic => {
                "Check that the word list loaded correctly and the player specs are valid"
                    .to_string()
            }
            ErrorCategory::Output => {
                "Check that the output directory is writable and has free space".to_string()
            }
            ErrorCategory::System => {
                "Check file permissions and paths referenced by the configuration".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrabbleError>;
