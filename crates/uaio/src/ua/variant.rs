// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! OPC UA variant values.

use super::{BuiltinType, UaNodeId};
use crate::error::{ConversionError, Result};

/// Localized text; both parts may be null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedText {
    pub locale: Option<String>,
    pub text: Option<String>,
}

impl LocalizedText {
    pub fn new(locale: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            locale: Some(locale.into()),
            text: Some(text.into()),
        }
    }

    pub fn is_null(&self) -> bool {
        self.locale.is_none() && self.text.is_none()
    }
}

/// A single OPC UA value tagged with its built-in type.
#[derive(Debug, Clone, PartialEq)]
pub enum UaScalar {
    Boolean(bool),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float(f32),
    Double(f64),
    /// `None` is the null string.
    String(Option<String>),
    /// 100 ns intervals since 1601-01-01 UTC.
    DateTime(i64),
    /// `None` is the null byte string.
    ByteString(Option<Vec<u8>>),
    NodeId(UaNodeId),
    LocalizedText(LocalizedText),
    ExtensionObject(ExtensionObject),
}

impl UaScalar {
    pub fn builtin_type(&self) -> BuiltinType {
        match self {
            Self::Boolean(_) => BuiltinType::Boolean,
            Self::SByte(_) => BuiltinType::SByte,
            Self::Byte(_) => BuiltinType::Byte,
            Self::Int16(_) => BuiltinType::Int16,
            Self::UInt16(_) => BuiltinType::UInt16,
            Self::Int32(_) => BuiltinType::Int32,
            Self::UInt32(_) => BuiltinType::UInt32,
            Self::Int64(_) => BuiltinType::Int64,
            Self::UInt64(_) => BuiltinType::UInt64,
            Self::Float(_) => BuiltinType::Float,
            Self::Double(_) => BuiltinType::Double,
            Self::String(_) => BuiltinType::String,
            Self::DateTime(_) => BuiltinType::DateTime,
            Self::ByteString(_) => BuiltinType::ByteString,
            Self::NodeId(_) => BuiltinType::NodeId,
            Self::LocalizedText(_) => BuiltinType::LocalizedText,
            Self::ExtensionObject(_) => BuiltinType::ExtensionObject,
        }
    }
}

/// Homogeneous one-dimensional array of OPC UA values.
#[derive(Debug, Clone, PartialEq)]
pub struct UaArray {
    element_type: BuiltinType,
    elements: Vec<UaScalar>,
}

impl UaArray {
    /// Create an array; every element must carry `element_type`.
    pub fn new(element_type: BuiltinType, elements: Vec<UaScalar>) -> Result<Self> {
        if let Some((index, elem)) = elements
            .iter()
            .enumerate()
            .find(|(_, e)| e.builtin_type() != element_type)
        {
            return Err(ConversionError::type_mismatch(format!(
                "array of {} contains {} at index {}",
                element_type,
                elem.builtin_type(),
                index
            )));
        }
        Ok(Self {
            element_type,
            elements,
        })
    }

    pub fn empty(element_type: BuiltinType) -> Self {
        Self {
            element_type,
            elements: Vec::new(),
        }
    }

    pub fn element_type(&self) -> BuiltinType {
        self.element_type
    }

    pub fn elements(&self) -> &[UaScalar] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn into_elements(self) -> Vec<UaScalar> {
        self.elements
    }
}

/// OPC UA variant: a scalar or an array of one built-in type.
#[derive(Debug, Clone, PartialEq)]
pub enum UaVariant {
    Scalar(UaScalar),
    Array(UaArray),
}

impl UaVariant {
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub fn builtin_type(&self) -> BuiltinType {
        match self {
            Self::Scalar(s) => s.builtin_type(),
            Self::Array(a) => a.element_type(),
        }
    }

    pub fn as_scalar(&self) -> Option<&UaScalar> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::Array(_) => None,
        }
    }

    pub fn as_extension_object(&self) -> Option<&ExtensionObject> {
        match self {
            Self::Scalar(UaScalar::ExtensionObject(eo)) => Some(eo),
            _ => None,
        }
    }
}

/// Named field value inside an [`ExtensionObject`].
#[derive(Debug, Clone, PartialEq)]
pub struct UaField {
    pub name: String,
    pub value: UaVariant,
}

impl UaField {
    pub fn new(name: impl Into<String>, value: impl Into<UaVariant>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Decoded body of an extension object.
#[derive(Debug, Clone, PartialEq)]
pub enum StructureBody {
    /// Structure fields; unset optional fields are absent.
    Fields(Vec<UaField>),
    /// Union with its selected field, `None` when no field is selected.
    Union(Option<Box<UaField>>),
}

/// Structured OPC UA value tagged with its data type id.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionObject {
    pub data_type_id: UaNodeId,
    pub body: StructureBody,
}

impl ExtensionObject {
    pub fn structure(data_type_id: UaNodeId, fields: Vec<UaField>) -> Self {
        Self {
            data_type_id,
            body: StructureBody::Fields(fields),
        }
    }

    pub fn union(data_type_id: UaNodeId, selected: Option<UaField>) -> Self {
        Self {
            data_type_id,
            body: StructureBody::Union(selected.map(Box::new)),
        }
    }

    pub fn is_union(&self) -> bool {
        matches!(self.body, StructureBody::Union(_))
    }

    /// Fields carried by the body, in body order.
    pub fn fields(&self) -> &[UaField] {
        match &self.body {
            StructureBody::Fields(fields) => fields,
            StructureBody::Union(Some(selected)) => std::slice::from_ref(&**selected),
            StructureBody::Union(None) => &[],
        }
    }

    pub fn field(&self, name: &str) -> Option<&UaVariant> {
        self.fields()
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.value)
    }
}

/// Value of one node together with its declared data type.
#[derive(Debug, Clone, PartialEq)]
pub struct UaDataValue {
    pub node_id: UaNodeId,
    pub data_type_id: UaNodeId,
    /// `None` when the node currently has no value.
    pub value: Option<UaVariant>,
}

impl UaDataValue {
    pub fn new(node_id: UaNodeId, data_type_id: UaNodeId, value: impl Into<UaVariant>) -> Self {
        Self {
            node_id,
            data_type_id,
            value: Some(value.into()),
        }
    }

    pub fn empty(node_id: UaNodeId, data_type_id: UaNodeId) -> Self {
        Self {
            node_id,
            data_type_id,
            value: None,
        }
    }
}

impl From<UaScalar> for UaVariant {
    fn from(v: UaScalar) -> Self {
        Self::Scalar(v)
    }
}

impl From<UaArray> for UaVariant {
    fn from(v: UaArray) -> Self {
        Self::Array(v)
    }
}

impl From<ExtensionObject> for UaVariant {
    fn from(v: ExtensionObject) -> Self {
        Self::Scalar(UaScalar::ExtensionObject(v))
    }
}

macro_rules! scalar_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for UaScalar {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }

            impl From<$ty> for UaVariant {
                fn from(v: $ty) -> Self {
                    Self::Scalar(UaScalar::$variant(v))
                }
            }
        )*
    };
}

scalar_from! {
    bool => Boolean,
    i8 => SByte,
    u8 => Byte,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Float,
    f64 => Double,
    UaNodeId => NodeId,
    LocalizedText => LocalizedText,
}

impl From<&str> for UaVariant {
    fn from(v: &str) -> Self {
        Self::Scalar(UaScalar::String(Some(v.to_string())))
    }
}

impl From<String> for UaVariant {
    fn from(v: String) -> Self {
        Self::Scalar(UaScalar::String(Some(v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_scalar_tags() {
        assert_eq!(UaScalar::from(1.5f32).builtin_type(), BuiltinType::Float);
        assert_eq!(UaScalar::DateTime(0).builtin_type(), BuiltinType::DateTime);
        assert_eq!(UaScalar::from(7u16).builtin_type(), BuiltinType::UInt16);
    }

    #[test]
    fn test_array_rejects_mixed_elements() {
        let err = UaArray::new(
            BuiltinType::Int32,
            vec![UaScalar::Int32(1), UaScalar::UInt32(2)],
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);

        let ok = UaArray::new(BuiltinType::Int32, vec![1i32.into(), 2i32.into()]).unwrap();
        assert_eq!(ok.len(), 2);
        assert!(UaArray::empty(BuiltinType::String).is_empty());
    }

    #[test]
    fn test_extension_object_fields() {
        let id = UaNodeId::numeric(2, 3001);
        let eo = ExtensionObject::structure(
            id.clone(),
            vec![UaField::new("x", 1i32), UaField::new("y", 2.5f64)],
        );
        assert!(!eo.is_union());
        assert_eq!(eo.field("y"), Some(&UaVariant::from(2.5f64)));
        assert!(eo.field("z").is_none());

        let union = ExtensionObject::union(id, None);
        assert!(union.is_union());
        assert!(union.fields().is_empty());
    }

    #[test]
    fn test_union_nested_in_union() {
        let inner = ExtensionObject::union(
            UaNodeId::numeric(2, 7),
            Some(UaField::new("code", 3u16)),
        );
        let outer = ExtensionObject::union(
            UaNodeId::numeric(2, 8),
            Some(UaField::new("inner", inner.clone())),
        );

        assert_eq!(outer.fields().len(), 1);
        let nested = outer
            .field("inner")
            .and_then(UaVariant::as_extension_object)
            .unwrap();
        assert_eq!(nested, &inner);
        assert_eq!(nested.field("code"), Some(&UaVariant::from(3u16)));
        assert!(matches!(&outer.body, StructureBody::Union(Some(f)) if f.name == "inner"));
    }
}
