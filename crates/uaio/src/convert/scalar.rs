// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Scalar and scalar-array conversion.
//!
//! Decoding is driven by the built-in base of the declared data type and
//! requires the value to carry exactly that tag. Encoding maps an IO value
//! onto the destination built-in type:
//!
//! | IO value                | OPC UA target                       |
//! |-------------------------|-------------------------------------|
//! | any integer kind        | any integer type (range checked)    |
//! | `LLong`                 | additionally `DateTime`             |
//! | `Float` / `Double`      | `Float` (must round-trip) / `Double`|
//! | `String`                | `String`, `LocalizedText`           |
//! | `LocalizedText`         | `LocalizedText`                     |
//! | `ByteString`            | `ByteString`                        |
//! | `Bool`                  | `Boolean`                           |
//! | `Variant::NodeId`       | `NodeId`                            |

use super::node_id::{external_to_internal, internal_to_external};
use crate::error::{ConversionError, Result};
use crate::io::{Array, ArrayKind, Scalar, ScalarKind, Variant};
use crate::ua::{BuiltinType, LocalizedText, UaArray, UaScalar, UaVariant};

/// IO array element kind produced when decoding values of `base`.
pub(crate) fn io_array_kind(base: BuiltinType) -> ArrayKind {
    let kind = match base {
        BuiltinType::Boolean => ScalarKind::Bool,
        BuiltinType::SByte => ScalarKind::SChar,
        BuiltinType::Byte => ScalarKind::Char,
        BuiltinType::Int16 => ScalarKind::Int,
        BuiltinType::UInt16 => ScalarKind::UInt,
        BuiltinType::Int32 => ScalarKind::Long,
        BuiltinType::UInt32 => ScalarKind::ULong,
        BuiltinType::Int64 | BuiltinType::DateTime => ScalarKind::LLong,
        BuiltinType::UInt64 => ScalarKind::ULLong,
        BuiltinType::Float => ScalarKind::Float,
        BuiltinType::Double => ScalarKind::Double,
        BuiltinType::String => ScalarKind::String,
        BuiltinType::ByteString => ScalarKind::ByteString,
        BuiltinType::LocalizedText => ScalarKind::LocalizedText,
        BuiltinType::NodeId => return ArrayKind::NodeId,
        BuiltinType::ExtensionObject => return ArrayKind::Structure,
    };
    ArrayKind::Scalar(kind)
}

/// Decode a scalar or scalar array whose declared base type is `base`.
pub fn decode_value(value: &UaVariant, base: BuiltinType) -> Result<Variant> {
    match value {
        UaVariant::Scalar(scalar) => decode_scalar(scalar, base),
        UaVariant::Array(array) => {
            if array.element_type() != base {
                return Err(ConversionError::type_mismatch(format!(
                    "expected array of {}, got array of {}",
                    base,
                    array.element_type()
                )));
            }
            let elements = array
                .elements()
                .iter()
                .enumerate()
                .map(|(i, elem)| decode_scalar(elem, base).map_err(|e| e.context(format!("[{}]", i))))
                .collect::<Result<Vec<_>>>()?;
            Array::new(io_array_kind(base), elements).map(Variant::Array)
        }
    }
}

/// Decode one scalar; its tag must be `base`.
pub fn decode_scalar(value: &UaScalar, base: BuiltinType) -> Result<Variant> {
    let scalar = match (value, base) {
        (UaScalar::Boolean(v), BuiltinType::Boolean) => Scalar::Bool(*v),
        (UaScalar::SByte(v), BuiltinType::SByte) => Scalar::SChar(*v),
        (UaScalar::Byte(v), BuiltinType::Byte) => Scalar::Char(*v),
        (UaScalar::Int16(v), BuiltinType::Int16) => Scalar::Int(*v),
        (UaScalar::UInt16(v), BuiltinType::UInt16) => Scalar::UInt(*v),
        (UaScalar::Int32(v), BuiltinType::Int32) => Scalar::Long(*v),
        (UaScalar::UInt32(v), BuiltinType::UInt32) => Scalar::ULong(*v),
        (UaScalar::Int64(v), BuiltinType::Int64) => Scalar::LLong(*v),
        (UaScalar::DateTime(v), BuiltinType::DateTime) => Scalar::LLong(*v),
        (UaScalar::UInt64(v), BuiltinType::UInt64) => Scalar::ULLong(*v),
        (UaScalar::Float(v), BuiltinType::Float) => Scalar::Float(*v),
        (UaScalar::Double(v), BuiltinType::Double) => Scalar::Double(*v),
        (UaScalar::String(v), BuiltinType::String) => Scalar::String(v.clone()),
        (UaScalar::ByteString(v), BuiltinType::ByteString) => Scalar::ByteString(v.clone()),
        (UaScalar::LocalizedText(v), BuiltinType::LocalizedText) => Scalar::LocalizedText {
            locale: v.locale.clone(),
            text: v.text.clone(),
        },
        (UaScalar::NodeId(id), BuiltinType::NodeId) => {
            return external_to_internal(id).map(Variant::NodeId)
        }
        (other, _) => {
            return Err(ConversionError::type_mismatch(format!(
                "expected {}, got {}",
                base,
                other.builtin_type()
            )))
        }
    };
    Ok(Variant::Scalar(scalar))
}

/// Encode a scalar or scalar array into the built-in type `target`.
pub fn encode_value(value: &Variant, target: BuiltinType, locale: &str) -> Result<UaVariant> {
    match value {
        Variant::Array(array) => {
            let elements = array
                .elements()
                .iter()
                .enumerate()
                .map(|(i, elem)| {
                    encode_element(elem, target, locale).map_err(|e| e.context(format!("[{}]", i)))
                })
                .collect::<Result<Vec<_>>>()?;
            UaArray::new(target, elements).map(UaVariant::Array)
        }
        other => encode_element(other, target, locale).map(UaVariant::Scalar),
    }
}

fn encode_element(value: &Variant, target: BuiltinType, locale: &str) -> Result<UaScalar> {
    match value {
        Variant::Scalar(scalar) => encode_scalar(scalar, target, locale),
        Variant::NodeId(id) if target == BuiltinType::NodeId => {
            internal_to_external(id).map(UaScalar::NodeId)
        }
        Variant::Array(_) => Err(ConversionError::type_mismatch("nested arrays are not supported")),
        other => Err(ConversionError::type_mismatch(format!(
            "cannot convert {} to {}",
            other.type_name(),
            target
        ))),
    }
}

/// Encode one IO scalar into `target`.
pub fn encode_scalar(value: &Scalar, target: BuiltinType, locale: &str) -> Result<UaScalar> {
    if let Some(n) = value.as_integer() {
        if target.is_integer() {
            return narrow_integer(n, target);
        }
        if let (Scalar::LLong(ticks), BuiltinType::DateTime) = (value, target) {
            return Ok(UaScalar::DateTime(*ticks));
        }
        return Err(mismatch(value, target));
    }

    match (value, target) {
        (Scalar::Bool(v), BuiltinType::Boolean) => Ok(UaScalar::Boolean(*v)),
        (Scalar::Float(v), BuiltinType::Float) => Ok(UaScalar::Float(*v)),
        (Scalar::Float(v), BuiltinType::Double) => Ok(UaScalar::Double(f64::from(*v))),
        (Scalar::Double(v), BuiltinType::Double) => Ok(UaScalar::Double(*v)),
        (Scalar::Double(v), BuiltinType::Float) => narrow_double(*v),
        (Scalar::String(v), BuiltinType::String) => Ok(UaScalar::String(v.clone())),
        (Scalar::String(v), BuiltinType::LocalizedText) => {
            Ok(UaScalar::LocalizedText(match v {
                Some(text) => LocalizedText::new(locale, text.as_str()),
                None => LocalizedText::default(),
            }))
        }
        (Scalar::LocalizedText { locale, text }, BuiltinType::LocalizedText) => {
            Ok(UaScalar::LocalizedText(LocalizedText {
                locale: locale.clone(),
                text: text.clone(),
            }))
        }
        (Scalar::ByteString(v), BuiltinType::ByteString) => Ok(UaScalar::ByteString(v.clone())),
        _ => Err(mismatch(value, target)),
    }
}

fn mismatch(value: &Scalar, target: BuiltinType) -> ConversionError {
    ConversionError::type_mismatch(format!("cannot convert {} to {}", value.kind(), target))
}

fn narrow_integer(n: i128, target: BuiltinType) -> Result<UaScalar> {
    let out_of_range = || ConversionError::precision_loss(format!("{} does not fit into {}", n, target));
    Ok(match target {
        BuiltinType::SByte => UaScalar::SByte(i8::try_from(n).map_err(|_| out_of_range())?),
        BuiltinType::Byte => UaScalar::Byte(u8::try_from(n).map_err(|_| out_of_range())?),
        BuiltinType::Int16 => UaScalar::Int16(i16::try_from(n).map_err(|_| out_of_range())?),
        BuiltinType::UInt16 => UaScalar::UInt16(u16::try_from(n).map_err(|_| out_of_range())?),
        BuiltinType::Int32 => UaScalar::Int32(i32::try_from(n).map_err(|_| out_of_range())?),
        BuiltinType::UInt32 => UaScalar::UInt32(u32::try_from(n).map_err(|_| out_of_range())?),
        BuiltinType::Int64 => UaScalar::Int64(i64::try_from(n).map_err(|_| out_of_range())?),
        BuiltinType::UInt64 => UaScalar::UInt64(u64::try_from(n).map_err(|_| out_of_range())?),
        other => {
            return Err(ConversionError::type_mismatch(format!(
                "{} is not an integer type",
                other
            )))
        }
    })
}

fn narrow_double(v: f64) -> Result<UaScalar> {
    let narrowed = v as f32;
    if v.is_nan() || f64::from(narrowed) == v {
        Ok(UaScalar::Float(narrowed))
    } else {
        Err(ConversionError::precision_loss(format!(
            "{} cannot be represented as Float",
            v
        )))
    }
}
