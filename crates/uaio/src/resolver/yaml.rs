// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! YAML type-system loader.
//!
//! A compact, hand-writable alternative to NodeSet2 XML.
//!
//! # Example YAML
//!
//! ```yaml
//! # types.yaml
//! types:
//!   - id: "ns=1;i=3001"
//!     name: Point
//!     fields:
//!       - { name: x, type: Int32 }
//!       - { name: y, type: Double }
//!
//!   - id: "ns=1;i=3002"
//!     name: Point3D
//!     parent: Point            # declared name or node id
//!     fields:
//!       - { name: z, type: Double, optional: true }
//!       - { name: history, type: Double, array: true }
//!
//! subtypes:
//!   - { id: "ns=1;i=3003", parent: Enumeration }
//! ```
//!
//! Type references accept built-in names (`Int32`, `LocalizedText`, ...),
//! well-known abstract names (`Structure`, `Union`, `Enumeration`,
//! `Duration`, `UtcTime`), names declared in the same document and plain
//! node ids.

use super::{SchemaLoadError, TypeRegistry};
use crate::ua::{data_type_ids as ids, StructureDefinition, StructureField, UaNodeId};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// YAML type-system loader.
pub struct YamlLoader;

/// Root YAML document structure.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct YamlTypeDocument {
    /// Structured types.
    pub types: Vec<YamlStructure>,

    /// Plain parent links (enumerations, simple subtypes).
    pub subtypes: Vec<YamlSubtype>,
}

/// One structured type.
#[derive(Debug, Deserialize)]
pub struct YamlStructure {
    pub id: String,
    pub name: String,
    /// Immediate supertype; defaults to `Structure` / `Union`.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub union: bool,
    #[serde(default)]
    pub fields: Vec<YamlField>,
}

#[derive(Debug, Deserialize)]
pub struct YamlField {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default)]
    pub array: bool,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Deserialize)]
pub struct YamlSubtype {
    pub id: String,
    pub parent: String,
}

const WELL_KNOWN: &[(&str, u32)] = &[
    ("Boolean", ids::BOOLEAN),
    ("SByte", ids::SBYTE),
    ("Byte", ids::BYTE),
    ("Int16", ids::INT16),
    ("UInt16", ids::UINT16),
    ("Int32", ids::INT32),
    ("UInt32", ids::UINT32),
    ("Int64", ids::INT64),
    ("UInt64", ids::UINT64),
    ("Float", ids::FLOAT),
    ("Double", ids::DOUBLE),
    ("String", ids::STRING),
    ("DateTime", ids::DATE_TIME),
    ("ByteString", ids::BYTE_STRING),
    ("NodeId", ids::NODE_ID),
    ("LocalizedText", ids::LOCALIZED_TEXT),
    ("Structure", ids::STRUCTURE),
    ("BaseDataType", ids::BASE_DATA_TYPE),
    ("Enumeration", ids::ENUMERATION),
    ("Duration", ids::DURATION),
    ("UtcTime", ids::UTC_TIME),
    ("Union", ids::UNION),
];

impl YamlLoader {
    /// Load a type system from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<TypeRegistry, SchemaLoadError> {
        let content = fs::read_to_string(path)?;
        Self::parse_yaml(&content)
    }

    /// Parse YAML content.
    pub fn parse_yaml(content: &str) -> Result<TypeRegistry, SchemaLoadError> {
        let doc: YamlTypeDocument = serde_yaml::from_str(content)?;
        Self::build_registry(doc)
    }

    fn build_registry(doc: YamlTypeDocument) -> Result<TypeRegistry, SchemaLoadError> {
        let mut names: HashMap<String, UaNodeId> = WELL_KNOWN
            .iter()
            .map(|(name, id)| (name.to_string(), UaNodeId::numeric(0, *id)))
            .collect();
        for ty in &doc.types {
            let id = parse_id(&ty.id)?;
            names.insert(ty.name.clone(), id);
        }

        let mut registry = TypeRegistry::new();
        for ty in doc.types {
            let type_id = resolve(&ty.id, &names)?;
            if let Some(parent) = &ty.parent {
                registry.register_subtype(type_id.clone(), resolve(parent, &names)?);
            }
            let mut definition = StructureDefinition::new(type_id, ty.name);
            definition.is_union = ty.union;
            for field in ty.fields {
                let mut entry = StructureField::new(field.name, resolve(&field.data_type, &names)?);
                entry.is_array = field.array;
                entry.optional = field.optional;
                definition.fields.push(entry);
            }
            registry.register(definition);
        }
        for link in doc.subtypes {
            registry.register_subtype(resolve(&link.id, &names)?, resolve(&link.parent, &names)?);
        }

        log::debug!("[yaml-types] loaded {} structure definition(s)", registry.len());
        Ok(registry)
    }
}

fn parse_id(value: &str) -> Result<UaNodeId, SchemaLoadError> {
    value.parse().map_err(|source| SchemaLoadError::NodeId {
        value: value.to_string(),
        source,
    })
}

/// Name lookup first, then node id notation.
fn resolve(value: &str, names: &HashMap<String, UaNodeId>) -> Result<UaNodeId, SchemaLoadError> {
    let value = value.trim();
    if let Some(id) = names.get(value) {
        return Ok(id.clone());
    }
    if value.contains('=') {
        parse_id(value)
    } else {
        Err(SchemaLoadError::UnknownBuiltin(value.to_string()))
    }
}
