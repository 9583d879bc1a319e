// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Node id conversion.

use crate::error::{ConversionError, Result};
use crate::io::{NodeId, NodeIdentifier};
use crate::ua::{Identifier, UaNodeId};

/// OPC UA node id to IO node id.
///
/// GUID and opaque identifiers have no IO counterpart.
pub fn external_to_internal(id: &UaNodeId) -> Result<NodeId> {
    let namespace = i32::from(id.namespace_index());
    match id.identifier() {
        Identifier::Numeric(n) => Ok(NodeId::numeric(namespace, i64::from(*n))),
        Identifier::String(s) => Ok(NodeId::string(namespace, s.as_str())),
        Identifier::Guid(_) | Identifier::Opaque(_) => Err(ConversionError::malformed_identifier(
            format!("{} has no IO representation", id),
        )),
    }
}

/// IO node id to OPC UA node id.
pub fn internal_to_external(id: &NodeId) -> Result<UaNodeId> {
    let namespace = u16::try_from(id.namespace).map_err(|_| {
        ConversionError::malformed_identifier(format!(
            "namespace index {} of {} is out of range",
            id.namespace, id
        ))
    })?;
    match &id.identifier {
        NodeIdentifier::Numeric(n) => {
            let n = u32::try_from(*n).map_err(|_| {
                ConversionError::malformed_identifier(format!(
                    "numeric identifier of {} is out of range",
                    id
                ))
            })?;
            Ok(UaNodeId::numeric(namespace, n))
        }
        NodeIdentifier::String(s) => Ok(UaNodeId::string(namespace, s.as_str())),
    }
}
