// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Conversion error taxonomy.
//!
//! Every failure of the conversion engine is a [`ConversionError`]: one value
//! type carrying an [`ErrorKind`], a human-readable message and the source
//! location that raised it. Resolver failures keep their original
//! [`ResolutionError`] as `source()`.

use crate::ua::UaNodeId;
use std::fmt;
use std::panic::Location;
use thiserror::Error;

/// Result alias used throughout the conversion engine.
pub type Result<T, E = ConversionError> = std::result::Result<T, E>;

/// Kind of a conversion failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The resolver does not know the type id, or no built-in base type
    /// can be derived for it.
    UnknownType,
    /// A field is declared neither by the type nor by any of its supertypes.
    UnknownField,
    /// The value's tag disagrees with the expected shape.
    TypeMismatch,
    /// A narrowing numeric conversion would change the value.
    PrecisionLoss,
    /// Field count disagrees with the schema (missing mandatory field,
    /// duplicate field, more than one union member).
    ArityMismatch,
    /// Identifier cannot be represented in the target model.
    MalformedIdentifier,
    /// Cyclic supertype chain or nesting deeper than the configured limit.
    CyclicType,
    /// The resolver failed for a reason other than an unknown id.
    ResolverFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UnknownType => "unknown type",
            Self::UnknownField => "unknown field",
            Self::TypeMismatch => "type mismatch",
            Self::PrecisionLoss => "precision loss",
            Self::ArityMismatch => "arity mismatch",
            Self::MalformedIdentifier => "malformed identifier",
            Self::CyclicType => "cyclic type",
            Self::ResolverFailure => "resolver failure",
        };
        f.write_str(name)
    }
}

/// Failure reported by a [`TypeResolver`](crate::resolver::TypeResolver).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("unknown data type {0}")]
    UnknownType(UaNodeId),

    #[error("cyclic supertype hierarchy at {0}")]
    CyclicHierarchy(UaNodeId),

    #[error("type information unavailable: {0}")]
    Unavailable(String),
}

/// Error raised by any conversion operation.
///
/// Cheap to clone, so it can be handed across threads or stored next to
/// the data it refers to without losing its kind.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message} ({}:{})", .location.file(), .location.line())]
pub struct ConversionError {
    kind: ErrorKind,
    message: String,
    location: &'static Location<'static>,
    #[source]
    source: Option<ResolutionError>,
}

impl ConversionError {
    /// Create an error; the caller's location is recorded.
    #[track_caller]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            location: Location::caller(),
            source: None,
        }
    }

    #[track_caller]
    pub fn unknown_type(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownType, message)
    }

    #[track_caller]
    pub fn unknown_field(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownField, message)
    }

    #[track_caller]
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeMismatch, message)
    }

    #[track_caller]
    pub fn precision_loss(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PrecisionLoss, message)
    }

    #[track_caller]
    pub fn arity_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ArityMismatch, message)
    }

    #[track_caller]
    pub fn malformed_identifier(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedIdentifier, message)
    }

    #[track_caller]
    pub fn cyclic_type(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CyclicType, message)
    }

    /// Wrap a resolver failure, keeping it as the error source.
    #[track_caller]
    pub fn resolution(err: ResolutionError) -> Self {
        let kind = match &err {
            ResolutionError::UnknownType(_) => ErrorKind::UnknownType,
            ResolutionError::CyclicHierarchy(_) => ErrorKind::CyclicType,
            ResolutionError::Unavailable(_) => ErrorKind::ResolverFailure,
        };
        Self {
            kind,
            message: err.to_string(),
            location: Location::caller(),
            source: Some(err),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Source file that raised the error.
    pub fn file(&self) -> &'static str {
        self.location.file()
    }

    /// Source line that raised the error.
    pub fn line(&self) -> u32 {
        self.location.line()
    }

    /// Resolver failure this error wraps, if any.
    pub fn resolution_error(&self) -> Option<&ResolutionError> {
        self.source.as_ref()
    }

    /// Prefix the message with context while keeping kind and location.
    pub(crate) fn context(mut self, context: impl fmt::Display) -> Self {
        self.message = format!("{}: {}", context, self.message);
        self
    }
}

impl From<ResolutionError> for ConversionError {
    #[track_caller]
    fn from(err: ResolutionError) -> Self {
        Self::resolution(err)
    }
}
