// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! IO scalar values.

use std::fmt;

/// Tag of an IO [`Scalar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    SChar,
    Char,
    Int,
    UInt,
    Long,
    ULong,
    LLong,
    ULLong,
    Float,
    Double,
    String,
    ByteString,
    LocalizedText,
}

impl ScalarKind {
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Self::SChar
                | Self::Char
                | Self::Int
                | Self::UInt
                | Self::Long
                | Self::ULong
                | Self::LLong
                | Self::ULLong
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A primitive IO value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    SChar(i8),
    Char(u8),
    Int(i16),
    UInt(u16),
    Long(i32),
    ULong(u32),
    LLong(i64),
    ULLong(u64),
    Float(f32),
    Double(f64),
    /// `None` is the null string.
    String(Option<String>),
    /// `None` is the null byte string.
    ByteString(Option<Vec<u8>>),
    LocalizedText {
        locale: Option<String>,
        text: Option<String>,
    },
}

impl Scalar {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::Bool(_) => ScalarKind::Bool,
            Self::SChar(_) => ScalarKind::SChar,
            Self::Char(_) => ScalarKind::Char,
            Self::Int(_) => ScalarKind::Int,
            Self::UInt(_) => ScalarKind::UInt,
            Self::Long(_) => ScalarKind::Long,
            Self::ULong(_) => ScalarKind::ULong,
            Self::LLong(_) => ScalarKind::LLong,
            Self::ULLong(_) => ScalarKind::ULLong,
            Self::Float(_) => ScalarKind::Float,
            Self::Double(_) => ScalarKind::Double,
            Self::String(_) => ScalarKind::String,
            Self::ByteString(_) => ScalarKind::ByteString,
            Self::LocalizedText { .. } => ScalarKind::LocalizedText,
        }
    }

    pub fn localized_text(locale: impl Into<String>, text: impl Into<String>) -> Self {
        Self::LocalizedText {
            locale: Some(locale.into()),
            text: Some(text.into()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Any integer kind widened to `i128`.
    pub fn as_integer(&self) -> Option<i128> {
        Some(match *self {
            Self::SChar(v) => v.into(),
            Self::Char(v) => v.into(),
            Self::Int(v) => v.into(),
            Self::UInt(v) => v.into(),
            Self::Long(v) => v.into(),
            Self::ULong(v) => v.into(),
            Self::LLong(v) => v.into(),
            Self::ULLong(v) => v.into(),
            _ => return None,
        })
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(f64::from(*v)),
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => v.as_deref(),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::ByteString(v) => v.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{}", v),
            Self::SChar(v) => write!(f, "{}", v),
            Self::Char(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::UInt(v) => write!(f, "{}", v),
            Self::Long(v) => write!(f, "{}", v),
            Self::ULong(v) => write!(f, "{}", v),
            Self::LLong(v) => write!(f, "{}", v),
            Self::ULLong(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Double(v) => write!(f, "{}", v),
            Self::String(Some(v)) => write!(f, "\"{}\"", v),
            Self::String(None) | Self::ByteString(None) => f.write_str("null"),
            Self::ByteString(Some(bytes)) => {
                f.write_str("0x")?;
                for byte in bytes {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
            Self::LocalizedText { locale, text } => write!(
                f,
                "[{}] \"{}\"",
                locale.as_deref().unwrap_or(""),
                text.as_deref().unwrap_or("")
            ),
        }
    }
}

macro_rules! scalar_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

scalar_from! {
    bool => Bool,
    i8 => SChar,
    u8 => Char,
    i16 => Int,
    u16 => UInt,
    i32 => Long,
    u32 => ULong,
    i64 => LLong,
    u64 => ULLong,
    f32 => Float,
    f64 => Double,
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::String(Some(v.to_string()))
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Self::String(Some(v))
    }
}

impl From<Vec<u8>> for Scalar {
    fn from(v: Vec<u8>) -> Self {
        Self::ByteString(Some(v))
    }
}
