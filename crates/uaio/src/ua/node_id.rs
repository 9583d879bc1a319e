// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! OPC UA node identifiers and their XML string notation.
//!
//! ```text
//! i=85              numeric, namespace 0
//! ns=2;s=Boiler1    string
//! ns=1;g=09087e75-8e5e-499b-954f-f2a9603db28a
//! ns=3;b=AQID       opaque (base64)
//! ```

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier part of a [`UaNodeId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Numeric(u32),
    String(String),
    Guid([u8; 16]),
    Opaque(Vec<u8>),
}

/// OPC UA node identifier: namespace index plus identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UaNodeId {
    namespace_index: u16,
    identifier: Identifier,
}

impl UaNodeId {
    pub fn new(namespace_index: u16, identifier: Identifier) -> Self {
        Self {
            namespace_index,
            identifier,
        }
    }

    pub fn numeric(namespace_index: u16, id: u32) -> Self {
        Self::new(namespace_index, Identifier::Numeric(id))
    }

    pub fn string(namespace_index: u16, id: impl Into<String>) -> Self {
        Self::new(namespace_index, Identifier::String(id.into()))
    }

    pub fn guid(namespace_index: u16, id: [u8; 16]) -> Self {
        Self::new(namespace_index, Identifier::Guid(id))
    }

    pub fn opaque(namespace_index: u16, id: impl Into<Vec<u8>>) -> Self {
        Self::new(namespace_index, Identifier::Opaque(id.into()))
    }

    /// The null node id (`i=0`).
    pub fn null() -> Self {
        Self::numeric(0, 0)
    }

    pub fn namespace_index(&self) -> u16 {
        self.namespace_index
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Numeric identifier, if this id is numeric.
    pub fn as_numeric(&self) -> Option<u32> {
        match self.identifier {
            Identifier::Numeric(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        self.namespace_index == 0 && self.identifier == Identifier::Numeric(0)
    }

    /// True for ids of the OPC UA base namespace (built-in and well-known types).
    pub fn is_namespace_zero(&self) -> bool {
        self.namespace_index == 0
    }
}

impl Default for UaNodeId {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Display for UaNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_index != 0 {
            write!(f, "ns={};", self.namespace_index)?;
        }
        match &self.identifier {
            Identifier::Numeric(id) => write!(f, "i={}", id),
            Identifier::String(id) => write!(f, "s={}", id),
            Identifier::Guid(bytes) => {
                f.write_str("g=")?;
                for (i, byte) in bytes.iter().enumerate() {
                    if matches!(i, 4 | 6 | 8 | 10) {
                        f.write_str("-")?;
                    }
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
            Identifier::Opaque(bytes) => write!(f, "b={}", BASE64.encode(bytes)),
        }
    }
}

/// Failure to parse the XML notation of a node id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseNodeIdError {
    #[error("invalid namespace index in '{0}'")]
    Namespace(String),

    #[error("unknown identifier type in '{0}'")]
    IdentifierType(String),

    #[error("invalid numeric identifier in '{0}'")]
    Numeric(String),

    #[error("invalid GUID identifier in '{0}'")]
    Guid(String),

    #[error("invalid opaque identifier in '{0}'")]
    Opaque(String),
}

impl FromStr for UaNodeId {
    type Err = ParseNodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (namespace_index, body) = match text.strip_prefix("ns=") {
            Some(rest) => {
                let (ns, body) = rest
                    .split_once(';')
                    .ok_or_else(|| ParseNodeIdError::Namespace(s.to_string()))?;
                let ns = ns
                    .parse::<u16>()
                    .map_err(|_| ParseNodeIdError::Namespace(s.to_string()))?;
                (ns, body)
            }
            None => (0, text),
        };

        let (kind, value) = body
            .split_once('=')
            .ok_or_else(|| ParseNodeIdError::IdentifierType(s.to_string()))?;
        let identifier = match kind {
            "i" => Identifier::Numeric(
                value
                    .parse::<u32>()
                    .map_err(|_| ParseNodeIdError::Numeric(s.to_string()))?,
            ),
            "s" => Identifier::String(value.to_string()),
            "g" => Identifier::Guid(
                parse_guid(value).ok_or_else(|| ParseNodeIdError::Guid(s.to_string()))?,
            ),
            "b" => Identifier::Opaque(
                BASE64
                    .decode(value)
                    .map_err(|_| ParseNodeIdError::Opaque(s.to_string()))?,
            ),
            _ => return Err(ParseNodeIdError::IdentifierType(s.to_string())),
        };
        Ok(Self::new(namespace_index, identifier))
    }
}

fn parse_guid(text: &str) -> Option<[u8; 16]> {
    let groups: Vec<&str> = text.split('-').collect();
    if groups.len() != 5
        || groups
            .iter()
            .map(|g| g.len())
            .ne([8usize, 4, 4, 4, 12].iter().copied())
    {
        return None;
    }
    let hex: String = groups.concat();
    let mut bytes = [0u8; 16];
    for (i, byte) in bytes.iter_mut().enumerate() {
        *byte = u8::from_str_radix(hex.get(i * 2..i * 2 + 2)?, 16).ok()?;
    }
    Some(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_numeric_and_string() {
        assert_eq!(UaNodeId::numeric(0, 85).to_string(), "i=85");
        assert_eq!(UaNodeId::numeric(2, 42).to_string(), "ns=2;i=42");
        assert_eq!(UaNodeId::string(3, "Boiler1").to_string(), "ns=3;s=Boiler1");
    }

    #[test]
    fn test_parse_roundtrip() {
        for text in [
            "i=22",
            "ns=1;i=3002",
            "ns=2;s=Demo.Static;Scalar",
            "ns=1;g=09087e75-8e5e-499b-954f-f2a9603db28a",
            "ns=4;b=AQID",
        ] {
            let id: UaNodeId = text.parse().expect("parse");
            assert_eq!(id.to_string(), text);
        }
    }

    #[test]
    fn test_string_identifier_may_contain_separators() {
        let id: UaNodeId = "ns=2;s=a=b;c".parse().unwrap();
        assert_eq!(id, UaNodeId::string(2, "a=b;c"));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "ns=x;i=1".parse::<UaNodeId>(),
            Err(ParseNodeIdError::Namespace("ns=x;i=1".into()))
        );
        assert!(matches!(
            "i=-1".parse::<UaNodeId>(),
            Err(ParseNodeIdError::Numeric(_))
        ));
        assert!(matches!(
            "q=1".parse::<UaNodeId>(),
            Err(ParseNodeIdError::IdentifierType(_))
        ));
        assert!(matches!(
            "g=1234".parse::<UaNodeId>(),
            Err(ParseNodeIdError::Guid(_))
        ));
    }

    #[test]
    fn test_null() {
        assert!(UaNodeId::null().is_null());
        assert!(UaNodeId::default().is_null());
        assert!(!UaNodeId::numeric(1, 0).is_null());
    }
}
