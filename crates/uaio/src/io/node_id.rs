// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! IO node identifiers.

use std::fmt;

/// Identifier part of an IO [`NodeId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeIdentifier {
    Numeric(i64),
    String(String),
}

/// Abstract node identifier of the IO data model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub namespace: i32,
    pub identifier: NodeIdentifier,
}

impl NodeId {
    pub fn numeric(namespace: i32, id: i64) -> Self {
        Self {
            namespace,
            identifier: NodeIdentifier::Numeric(id),
        }
    }

    pub fn string(namespace: i32, id: impl Into<String>) -> Self {
        Self {
            namespace,
            identifier: NodeIdentifier::String(id.into()),
        }
    }

    pub fn as_numeric(&self) -> Option<i64> {
        match self.identifier {
            NodeIdentifier::Numeric(id) => Some(id),
            NodeIdentifier::String(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.identifier {
            NodeIdentifier::String(id) => Some(id),
            NodeIdentifier::Numeric(_) => None,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.identifier {
            NodeIdentifier::Numeric(id) => write!(f, "{}:{}", self.namespace, id),
            NodeIdentifier::String(id) => write!(f, "{}:\"{}\"", self.namespace, id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_and_display() {
        assert_eq!(NodeId::numeric(2, 42), NodeId::numeric(2, 42));
        assert_ne!(NodeId::numeric(2, 42), NodeId::numeric(3, 42));
        assert_ne!(NodeId::numeric(0, 1), NodeId::string(0, "1"));
        assert_eq!(NodeId::numeric(2, 42).to_string(), "2:42");
        assert_eq!(NodeId::string(1, "Temp").to_string(), "1:\"Temp\"");
        assert_eq!(NodeId::string(1, "Temp").as_str(), Some("Temp"));
        assert_eq!(NodeId::string(1, "Temp").as_numeric(), None);
    }
}
