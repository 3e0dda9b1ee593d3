//! # Error handling for Workbench Core
//!
//! This module defines the error and result types used throughout the pane
//! layout engine.
//!
//! Most tree operations never fail: targeting an id that is missing, or a
//! node of the wrong kind, is routine during drag gestures and returns the
//! tree unchanged. Errors are reserved for requests the engine refuses
//! outright, for malformed layouts found by validation, and for the
//! configuration layer.

use thiserror::Error;

/// Result type used throughout Workbench Core.
///
/// # Example
///
/// ```rust
/// use workbench_core::{Result, Error};
///
/// fn example_function() -> Result<String> {
///     Ok("Success".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Workbench Core.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A layout tree breaks one of its structural invariants
    #[error("Invalid layout at '{pane_id}': {message}")]
    InvalidLayout { pane_id: String, message: String },

    /// Center drop onto a split: only leaves can have their tile replaced
    #[error("Cannot replace split '{id}' with a center drop")]
    CenterDropOnSplit { id: String },

    /// The pane shows a tile that cannot be closed or replaced
    #[error("Pane '{pane_id}' is not closable")]
    NotClosable { pane_id: String },

    /// File I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generic error with custom message
    #[error("Error: {message}")]
    Generic { message: String },

    /// Validation errors
    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },
}

impl Error {
    /// Create a new configuration error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use workbench_core::Error;
    ///
    /// let error = Error::config("Invalid configuration file format");
    /// ```
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new invalid layout error for the given pane.
    ///
    /// # Example
    ///
    /// ```rust
    /// use workbench_core::Error;
    ///
    /// let error = Error::invalid_layout("root", "split has 1 child");
    /// assert!(error.is_invalid_layout());
    /// ```
    pub fn invalid_layout<P: Into<String>, S: Into<String>>(pane_id: P, message: S) -> Self {
        Self::InvalidLayout {
            pane_id: pane_id.into(),
            message: message.into(),
        }
    }

    /// Create an error for a center drop that targets a split.
    pub fn center_drop_on_split<S: Into<String>>(id: S) -> Self {
        Self::CenterDropOnSplit { id: id.into() }
    }

    /// Create an error for a pane whose tile is pinned in place.
    pub fn not_closable<S: Into<String>>(pane_id: S) -> Self {
        Self::NotClosable {
            pane_id: pane_id.into(),
        }
    }

    /// Create a new generic error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use workbench_core::Error;
    ///
    /// let error = Error::generic("Something went wrong");
    /// ```
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Create a new validation error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use workbench_core::Error;
    ///
    /// let error = Error::validation("ids.prefix", "Prefix must not be empty");
    /// ```
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if this error is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Check if this error reports a malformed layout.
    pub fn is_invalid_layout(&self) -> bool {
        matches!(self, Self::InvalidLayout { .. })
    }

    /// Check if this error is a rejected layout edit.
    ///
    /// Rejected edits leave the layout untouched.
    ///
    /// # Example
    ///
    /// ```rust
    /// use workbench_core::Error;
    ///
    /// assert!(Error::center_drop_on_split("s1").is_rejected_edit());
    /// assert!(Error::not_closable("p1").is_rejected_edit());
    /// assert!(!Error::config("x").is_rejected_edit());
    /// ```
    pub fn is_rejected_edit(&self) -> bool {
        matches!(self, Self::CenterDropOnSplit { .. } | Self::NotClosable { .. })
    }

    /// Check if this error is an I/O error.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    /// Check if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Get the error category as a string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use workbench_core::Error;
    ///
    /// let error = Error::config("Invalid format");
    /// assert_eq!(error.category(), "Config");
    /// ```
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } => "Config",
            Self::InvalidLayout { .. } => "InvalidLayout",
            Self::CenterDropOnSplit { .. } => "CenterDropOnSplit",
            Self::NotClosable { .. } => "NotClosable",
            Self::Io(_) => "IO",
            Self::Json(_) => "JSON",
            Self::Toml(_) => "TOML",
            Self::Generic { .. } => "Generic",
            Self::Validation { .. } => "Validation",
        }
    }
}

/// Convenience macro for creating errors with context.
///
/// # Example
///
/// ```rust
/// use workbench_core::{error, Error};
///
/// let err = error!("Failed to apply {}: {}", "move", "target vanished");
/// ```
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::Error::generic(format!($($arg)*))
    };
}

/// Convenience macro for creating configuration errors.
///
/// # Example
///
/// ```rust
/// use workbench_core::{config_error, Error};
///
/// let err = config_error!("Invalid value for {}: {}", "ids.strategy", "random");
/// ```
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)*) => {
        $crate::Error::config(format!($($arg)*))
    };
}

/// Convert from `anyhow::Error` to our custom error type.
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::generic(err.to_string())
    }
}
