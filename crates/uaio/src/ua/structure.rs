// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structure definitions (the field schema of a structured data type) and
//! a fluent builder for them.

use super::{BuiltinType, UaNodeId};
use std::fmt;

/// One field of a [`StructureDefinition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureField {
    pub name: String,
    /// Declared data type of the field (built-in or user-defined).
    pub data_type_id: UaNodeId,
    /// One-dimensional array (`ValueRank` 1) instead of a scalar.
    pub is_array: bool,
    /// May be absent from a structure value.
    pub optional: bool,
}

impl StructureField {
    pub fn new(name: impl Into<String>, data_type_id: UaNodeId) -> Self {
        Self {
            name: name.into(),
            data_type_id,
            is_array: false,
            optional: false,
        }
    }

    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Ordered field schema of a structured data type.
///
/// The field order is authoritative: structured values are converted in
/// this order regardless of the order their fields arrive in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureDefinition {
    pub data_type_id: UaNodeId,
    pub name: String,
    pub is_union: bool,
    pub fields: Vec<StructureField>,
}

impl StructureDefinition {
    pub fn new(data_type_id: UaNodeId, name: impl Into<String>) -> Self {
        Self {
            data_type_id,
            name: name.into(),
            is_union: false,
            fields: Vec::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&StructureField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for StructureDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = if self.is_union { "union" } else { "struct" };
        write!(f, "{} {} [{}] {{", keyword, self.name, self.data_type_id)?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, " {}: {}", field.name, field.data_type_id)?;
            if field.is_array {
                f.write_str("[]")?;
            }
            if field.optional {
                f.write_str("?")?;
            }
        }
        f.write_str(" }")
    }
}

/// Builder for [`StructureDefinition`].
#[derive(Debug)]
pub struct StructureDefinitionBuilder {
    definition: StructureDefinition,
}

impl StructureDefinitionBuilder {
    pub fn new(data_type_id: UaNodeId, name: impl Into<String>) -> Self {
        Self {
            definition: StructureDefinition::new(data_type_id, name),
        }
    }

    /// Mark the type as a union.
    pub fn union(mut self) -> Self {
        self.definition.is_union = true;
        self
    }

    /// Add a scalar field of a built-in type.
    pub fn field(self, name: impl Into<String>, kind: BuiltinType) -> Self {
        self.field_of(name, kind.data_type_id())
    }

    /// Add a scalar field of any data type (e.g. a nested structure).
    pub fn field_of(mut self, name: impl Into<String>, data_type_id: UaNodeId) -> Self {
        self.definition
            .fields
            .push(StructureField::new(name, data_type_id));
        self
    }

    /// Add an optional scalar field of a built-in type.
    pub fn optional_field(mut self, name: impl Into<String>, kind: BuiltinType) -> Self {
        self.definition
            .fields
            .push(StructureField::new(name, kind.data_type_id()).optional());
        self
    }

    /// Add an array field of a built-in type.
    pub fn array_field(self, name: impl Into<String>, kind: BuiltinType) -> Self {
        self.array_field_of(name, kind.data_type_id())
    }

    pub fn array_field_of(mut self, name: impl Into<String>, data_type_id: UaNodeId) -> Self {
        self.definition
            .fields
            .push(StructureField::new(name, data_type_id).array());
        self
    }

    /// Add a prepared field.
    pub fn with_field(mut self, field: StructureField) -> Self {
        self.definition.fields.push(field);
        self
    }

    pub fn build(self) -> StructureDefinition {
        self.definition
    }
}
