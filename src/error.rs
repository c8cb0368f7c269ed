//! Error types for the SEO analyzer.
//!
//! This module provides structured error handling with:
//! - `AppError`: Domain-specific errors raised by collaborators (fetch, parse, services)
//! - `AnalysisError`: Serializable description attached to degraded results
//! - `Result<T>`: Type alias for Results using AppError

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// DOMAIN ERROR TYPE
// ============================================================================

/// Domain-specific errors for analyzer operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid or malformed URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network request failed, timed out or returned a non-success status
    #[error("Fetch failed: {0}")]
    FetchFailure(String),

    /// Markup or extracted text was empty or unusable
    #[error("Parse failed: {0}")]
    ParseFailure(String),

    /// External service error (PageSpeed, ...)
    #[error("Service error ({service}): {message}")]
    ServiceError { service: &'static str, message: String },

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Create a fetch error
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::FetchFailure(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseFailure(msg.into())
    }

    /// Create a service error
    pub fn service(service: &'static str, msg: impl Into<String>) -> Self {
        Self::ServiceError {
            service,
            message: msg.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InvalidUrl(_) | AppError::FetchFailure(_) => ErrorKind::FetchFailure,
            AppError::ParseFailure(_) => ErrorKind::ParseFailure,
            AppError::ServiceError { .. } => ErrorKind::ServiceFailure,
            AppError::Other(_) => ErrorKind::Other,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        Self::FetchFailure(error.to_string())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

// ============================================================================
// ERROR DESCRIPTION (ATTACHED TO RESULTS)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    FetchFailure,
    ParseFailure,
    ServiceFailure,
    Other,
}

/// Why an analysis degraded to its neutral result.
///
/// Scoring never propagates errors past its boundary; instead the neutral
/// result carries one of these so callers can render it unconditionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisError {
    pub kind: ErrorKind,
    pub message: String,
}

impl AnalysisError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&AppError> for AnalysisError {
    fn from(error: &AppError) -> Self {
        Self::new(error.kind(), format!("{:#}", error))
    }
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
