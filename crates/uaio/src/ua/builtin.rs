// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! OPC UA built-in types and well-known data type ids (namespace 0).

use super::UaNodeId;
use std::fmt;

/// Well-known data type node ids of namespace 0.
pub mod data_type_ids {
    pub const BOOLEAN: u32 = 1;
    pub const SBYTE: u32 = 2;
    pub const BYTE: u32 = 3;
    pub const INT16: u32 = 4;
    pub const UINT16: u32 = 5;
    pub const INT32: u32 = 6;
    pub const UINT32: u32 = 7;
    pub const INT64: u32 = 8;
    pub const UINT64: u32 = 9;
    pub const FLOAT: u32 = 10;
    pub const DOUBLE: u32 = 11;
    pub const STRING: u32 = 12;
    pub const DATE_TIME: u32 = 13;
    pub const GUID: u32 = 14;
    pub const BYTE_STRING: u32 = 15;
    pub const NODE_ID: u32 = 17;
    pub const LOCALIZED_TEXT: u32 = 21;
    pub const STRUCTURE: u32 = 22;
    pub const BASE_DATA_TYPE: u32 = 24;
    pub const ENUMERATION: u32 = 29;
    pub const DURATION: u32 = 290;
    pub const UTC_TIME: u32 = 294;
    pub const UNION: u32 = 12756;
}

/// Built-in type tag of an OPC UA variant value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum BuiltinType {
    Boolean = 1,
    SByte = 2,
    Byte = 3,
    Int16 = 4,
    UInt16 = 5,
    Int32 = 6,
    UInt32 = 7,
    Int64 = 8,
    UInt64 = 9,
    Float = 10,
    Double = 11,
    String = 12,
    DateTime = 13,
    ByteString = 15,
    NodeId = 17,
    LocalizedText = 21,
    ExtensionObject = 22,
}

impl BuiltinType {
    pub const fn id(self) -> u32 {
        self as u32
    }

    /// Data type node id of this built-in type.
    ///
    /// `ExtensionObject` maps to the abstract `Structure` data type.
    pub fn data_type_id(self) -> UaNodeId {
        UaNodeId::numeric(0, self.id())
    }

    pub fn from_id(id: u32) -> Option<Self> {
        use data_type_ids as ids;
        Some(match id {
            ids::BOOLEAN => Self::Boolean,
            ids::SBYTE => Self::SByte,
            ids::BYTE => Self::Byte,
            ids::INT16 => Self::Int16,
            ids::UINT16 => Self::UInt16,
            ids::INT32 => Self::Int32,
            ids::UINT32 => Self::UInt32,
            ids::INT64 => Self::Int64,
            ids::UINT64 => Self::UInt64,
            ids::FLOAT => Self::Float,
            ids::DOUBLE => Self::Double,
            ids::STRING => Self::String,
            ids::DATE_TIME => Self::DateTime,
            ids::BYTE_STRING => Self::ByteString,
            ids::NODE_ID => Self::NodeId,
            ids::LOCALIZED_TEXT => Self::LocalizedText,
            ids::STRUCTURE => Self::ExtensionObject,
            _ => return None,
        })
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Self::SByte
                | Self::Byte
                | Self::Int16
                | Self::UInt16
                | Self::Int32
                | Self::UInt32
                | Self::Int64
                | Self::UInt64
        )
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// What a data type ultimately is, once its namespace-0 base is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseKind {
    /// Values travel as this built-in type.
    Value(BuiltinType),
    /// Structure with named fields.
    Structure,
    /// Union with at most one selected field.
    Union,
}

impl BaseKind {
    /// Classify a namespace-0 base data type id.
    ///
    /// Subtypes with a fixed wire representation (Enumeration, Duration,
    /// UtcTime) map to the built-in type they are encoded as.
    pub fn of(base_type_id: &UaNodeId) -> Option<Self> {
        use data_type_ids as ids;
        if !base_type_id.is_namespace_zero() {
            return None;
        }
        match base_type_id.as_numeric()? {
            ids::STRUCTURE => Some(Self::Structure),
            ids::UNION => Some(Self::Union),
            ids::ENUMERATION => Some(Self::Value(BuiltinType::Int32)),
            ids::DURATION => Some(Self::Value(BuiltinType::Double)),
            ids::UTC_TIME => Some(Self::Value(BuiltinType::DateTime)),
            id => BuiltinType::from_id(id).map(Self::Value),
        }
    }

    pub fn is_structured(self) -> bool {
        matches!(self, Self::Structure | Self::Union)
    }
}
