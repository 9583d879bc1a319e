// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! IO variants: scalars, arrays, structures and node id values.

use super::{NodeId, Scalar, ScalarKind};
use crate::error::{ConversionError, Result};
use std::fmt;

/// A tagged IO value. The tag is the enum discriminant.
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    Scalar(Scalar),
    Array(Array),
    Structure(Structure),
    NodeId(NodeId),
}

impl Variant {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_structure(&self) -> Option<&Structure> {
        match self {
            Self::Structure(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_node_id(&self) -> Option<&NodeId> {
        match self {
            Self::NodeId(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Short tag name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Array(_) => "array",
            Self::Structure(_) => "structure",
            Self::NodeId(_) => "node id",
        }
    }

    /// Element kind this value would have inside an [`Array`].
    fn element_kind(&self) -> Option<ArrayKind> {
        match self {
            Self::Scalar(s) => Some(ArrayKind::Scalar(s.kind())),
            Self::Structure(_) => Some(ArrayKind::Structure),
            Self::NodeId(_) => Some(ArrayKind::NodeId),
            Self::Array(_) => None,
        }
    }
}

macro_rules! variant_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Variant {
                fn from(v: $ty) -> Self {
                    Self::Scalar(Scalar::from(v))
                }
            }
        )*
    };
}

variant_from_scalar!(bool, i8, u8, i16, u16, i32, u32, i64, u64, f32, f64, &str, String, Vec<u8>);

impl From<Scalar> for Variant {
    fn from(v: Scalar) -> Self {
        Self::Scalar(v)
    }
}

impl From<Array> for Variant {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Structure> for Variant {
    fn from(v: Structure) -> Self {
        Self::Structure(v)
    }
}

impl From<NodeId> for Variant {
    fn from(v: NodeId) -> Self {
        Self::NodeId(v)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => fmt::Display::fmt(v, f),
            Self::Array(v) => fmt::Display::fmt(v, f),
            Self::Structure(v) => fmt::Display::fmt(v, f),
            Self::NodeId(v) => write!(f, "<{}>", v),
        }
    }
}

/// Element kind of an IO [`Array`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayKind {
    Scalar(ScalarKind),
    Structure,
    NodeId,
}

impl fmt::Display for ArrayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => fmt::Display::fmt(kind, f),
            Self::Structure => f.write_str("Structure"),
            Self::NodeId => f.write_str("NodeId"),
        }
    }
}

/// Homogeneous one-dimensional IO array.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    kind: ArrayKind,
    elements: Vec<Variant>,
}

impl Array {
    /// Create an array; every element must match `kind` and arrays do not nest.
    pub fn new(kind: ArrayKind, elements: Vec<Variant>) -> Result<Self> {
        for (index, elem) in elements.iter().enumerate() {
            match elem.element_kind() {
                Some(k) if k == kind => {}
                Some(k) => {
                    return Err(ConversionError::type_mismatch(format!(
                        "array of {} contains {} at index {}",
                        kind, k, index
                    )))
                }
                None => {
                    return Err(ConversionError::type_mismatch(format!(
                        "nested array at index {}",
                        index
                    )))
                }
            }
        }
        Ok(Self { kind, elements })
    }

    pub fn empty(kind: ArrayKind) -> Self {
        Self {
            kind,
            elements: Vec::new(),
        }
    }

    pub fn kind(&self) -> ArrayKind {
        self.kind
    }

    pub fn elements(&self) -> &[Variant] {
        &self.elements
    }

    pub fn get(&self, index: usize) -> Option<&Variant> {
        self.elements.get(index)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn into_elements(self) -> Vec<Variant> {
        self.elements
    }
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, elem) in self.elements.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(elem, f)?;
        }
        f.write_str("]")
    }
}

/// Structured IO value: data type id plus ordered named fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    data_type_id: NodeId,
    fields: Vec<(String, Variant)>,
}

impl Structure {
    /// Create a structure; field names must be unique.
    pub fn new(data_type_id: NodeId, fields: Vec<(String, Variant)>) -> Result<Self> {
        let mut structure = Self::empty(data_type_id);
        structure.fields.reserve(fields.len());
        for (name, value) in fields {
            structure.push(name, value)?;
        }
        Ok(structure)
    }

    pub fn empty(data_type_id: NodeId) -> Self {
        Self {
            data_type_id,
            fields: Vec::new(),
        }
    }

    /// Append a field; fails with `ArityMismatch` if the name is taken.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Variant>) -> Result<()> {
        let name = name.into();
        if self.field(&name).is_some() {
            return Err(ConversionError::arity_mismatch(format!(
                "duplicate field '{}' in structure {}",
                name, self.data_type_id
            )));
        }
        self.fields.push((name, value.into()));
        Ok(())
    }

    /// Builder-style [`push`](Self::push).
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Variant>) -> Result<Self> {
        self.push(name, value)?;
        Ok(self)
    }

    pub fn data_type_id(&self) -> &NodeId {
        &self.data_type_id
    }

    pub fn fields(&self) -> &[(String, Variant)] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Variant> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> {{", self.data_type_id)?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, " {}: {}", name, value)?;
        }
        f.write_str(" }")
    }
}
