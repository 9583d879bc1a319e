// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! OPC UA side of the conversion: node ids, built-in types, variant values
//! and structure definitions.

mod builtin;
mod node_id;
mod structure;
mod variant;

pub use builtin::{data_type_ids, BaseKind, BuiltinType};
pub use node_id::{Identifier, ParseNodeIdError, UaNodeId};
pub use structure::{StructureDefinition, StructureDefinitionBuilder, StructureField};
pub use variant::{
    ExtensionObject, LocalizedText, StructureBody, UaArray, UaDataValue, UaField, UaScalar,
    UaVariant,
};
