//! Error handling for the load probe

use thiserror::Error;

/// Custom error types for the load probe
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network connectivity errors (connection refused, DNS failure, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// HTTP request errors
    #[error("HTTP request error: {0}")]
    HttpRequest(String),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(String),

    /// Parsing errors (URLs, JSON, etc.)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// Chart rendering errors
    #[error("Plot error: {0}")]
    Plot(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    /// Create a new HTTP request error
    pub fn http_request<S: Into<String>>(message: S) -> Self {
        Self::HttpRequest(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new plot error
    pub fn plot<S: Into<String>>(message: S) -> Self {
        Self::Plot(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Network(_) => "NETWORK",
            Self::Timeout(_) => "TIMEOUT",
            Self::HttpRequest(_) => "HTTP",
            Self::Io(_) => "IO",
            Self::Parse(_) => "PARSE",
            Self::Plot(_) => "PLOT",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Transport-level failures that the prober counts and moves past
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(_) | Self::HttpRequest(_) | Self::Timeout(_) => true,
            Self::Config(_) | Self::Parse(_) => false,
            Self::Io(_) | Self::Plot(_) | Self::Internal(_) => false,
        }
    }

    /// What the user can change to get past this error, if anything
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Config(_) => Some(
                "Check your .env file (see --env-help) and command-line options. URLs must start with \
                 http:// or https://, the timeout must be 1-300 seconds and the duration at most 86400.",
            ),
            Self::Parse(_) => Some("Check the format of the target URL."),
            Self::Network(_) | Self::HttpRequest(_) => {
                Some("Check that the target server is running and reachable.")
            }
            Self::Timeout(_) => Some("Increase the request timeout with --timeout."),
            Self::Io(_) | Self::Plot(_) => Some(
                "Check that the --plot-output directory is writable, or skip the chart with --no-plot.",
            ),
            Self::Internal(_) => None,
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Parse(_) => 1,  // Invalid configuration/usage
            Self::Network(_) | Self::HttpRequest(_) => 2,  // Network issues
            Self::Timeout(_) => 3,  // Timeout issues
            Self::Io(_) | Self::Plot(_) => 5,  // Output issues
            Self::Internal(_) => 99,  // Internal/unexpected errors
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::Network(_) | Self::HttpRequest(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Timeout(_) => {
                    format!("[{}] {}", category.blue().bold(), message.blue())
                }
                Self::Io(_) | Self::Plot(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

// Standard library error conversions
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(error: url::ParseError) -> Self {
        Self::parse(format!("URL parse error: {}", error))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("JSON parse error: {}", error))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::timeout(error.to_string())
        } else if error.is_connect() || error.is_request() {
            Self::network(error.to_string())
        } else {
            Self::http_request(error.to_string())
        }
    }
}

impl From<dotenv::Error> for AppError {
    fn from(error: dotenv::Error) -> Self {
        Self::config(format!("Environment file error: {}", error))
    }
}

/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Error reporter for user-facing error output
pub struct ErrorReporter {
    pub use_color: bool,
    pub verbose: bool,
}

impl ErrorReporter {
    /// Create a new error reporter
    pub fn new(use_color: bool, verbose: bool) -> Self {
        Self { use_color, verbose }
    }

    /// Render an error the way `report_error` prints it
    pub fn format_error(&self, error: &AppError) -> String {
        let mut output = error.format_for_console(self.use_color);
        if let Some(suggestion) = error.suggestion() {
            output.push_str(&format!("\n\nSuggestion: {}", suggestion));
        }
        if self.verbose {
            output.push_str(&format!(
                "\n\nCategory: {}, exit code: {}",
                error.category(),
                error.exit_code()
            ));
        }
        output
    }

    /// Report an error to the user
    pub fn report_error(&self, error: &AppError) {
        eprintln!("{}", self.format_error(error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_error = AppError::config("Invalid configuration");
        assert_eq!(config_error.category(), "CONFIG");
        assert!(!config_error.is_recoverable());
        assert_eq!(config_error.exit_code(), 1);

        let network_error = AppError::network("Connection refused");
        assert_eq!(network_error.category(), "NETWORK");
        assert!(network_error.is_recoverable());
        assert_eq!(network_error.exit_code(), 2);
    }

    #[test]
    fn test_error_display() {
        let error = AppError::plot("backend unavailable");
        let display = error.to_string();
        assert!(display.contains("Plot error"));
        assert!(display.contains("backend unavailable"));
    }

    #[test]
    fn test_error_categories() {
        let errors = [
            AppError::config("config"),
            AppError::network("network"),
            AppError::timeout("timeout"),
            AppError::http_request("http"),
            AppError::io("io"),
            AppError::parse("parse"),
            AppError::plot("plot"),
            AppError::internal("internal"),
        ];

        let expected_categories = [
            "CONFIG", "NETWORK", "TIMEOUT", "HTTP", "IO", "PARSE", "PLOT", "INTERNAL",
        ];

        for (error, expected) in errors.iter().zip(expected_categories.iter()) {
            assert_eq!(error.category(), *expected);
        }
    }

    #[test]
    fn test_transport_errors_are_recoverable() {
        assert!(AppError::network("test").is_recoverable());
        assert!(AppError::http_request("test").is_recoverable());
        assert!(AppError::timeout("test").is_recoverable());

        assert!(!AppError::config("test").is_recoverable());
        assert!(!AppError::plot("test").is_recoverable());
        assert!(!AppError::io("test").is_recoverable());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::config("test").exit_code(), 1);
        assert_eq!(AppError::network("test").exit_code(), 2);
        assert_eq!(AppError::timeout("test").exit_code(), 3);
        assert_eq!(AppError::io("test").exit_code(), 5);
        assert_eq!(AppError::plot("test").exit_code(), 5);
        assert_eq!(AppError::internal("test").exit_code(), 99);
    }

    #[test]
    fn test_suggestions() {
        assert!(AppError::plot("cannot create file").suggestion().unwrap().contains("--no-plot"));
        assert!(AppError::config("bad").suggestion().unwrap().contains("--env-help"));
        assert!(AppError::timeout("slow").suggestion().unwrap().contains("--timeout"));
        assert!(AppError::internal("bug").suggestion().is_none());
    }

    #[test]
    fn test_error_conversions() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let app_error: AppError = io_error.into();
        assert_eq!(app_error.category(), "IO");

        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let app_error: AppError = json_error.into();
        assert_eq!(app_error.category(), "PARSE");
    }

    #[test]
    fn test_url_parse_error_conversion() {
        let url_error = url::Url::parse("not-a-valid-url").unwrap_err();
        let app_error: AppError = url_error.into();
        assert_eq!(app_error.category(), "PARSE");
        assert!(app_error.to_string().contains("URL parse error"));
    }

    #[test]
    fn test_dotenv_error_conversion() {
        let dotenv_error = dotenv::Error::LineParse(".env".to_string(), 1);
        let app_error: AppError = dotenv_error.into();
        assert_eq!(app_error.category(), "CONFIG");
        assert!(app_error.to_string().contains("Environment file error"));
    }


    #[test]
    fn test_console_formatting() {
        let error = AppError::config("Test error");
        let formatted_no_color = error.format_for_console(false);
        assert_eq!(formatted_no_color, "[CONFIG] Configuration error: Test error");

        let formatted_color = error.format_for_console(true);
        assert!(formatted_color.contains("CONFIG"));
        assert!(formatted_color.contains("Test error"));
    }

    #[test]
    fn test_error_reporter_output() {
        let error = AppError::timeout("after 10s");
        let quiet = ErrorReporter::new(false, false).format_error(&error);
        let verbose = ErrorReporter::new(false, true).format_error(&error);

        assert!(quiet.starts_with("[TIMEOUT] Timeout error: after 10s"));
        assert!(quiet.contains("Suggestion: Increase the request timeout with --timeout."));
        assert!(!quiet.contains("exit code"));
        assert!(verbose.starts_with(&quiet));
        assert!(verbose.ends_with("Category: TIMEOUT, exit code: 3"));

        let internal = ErrorReporter::new(false, false).format_error(&AppError::internal("bug"));
        assert_eq!(internal, "[INTERNAL] Internal error: bug");
    }
}
