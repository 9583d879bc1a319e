// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test code readability over pedantic
#![allow(clippy::cast_possible_truncation)] // Test parameters
#![allow(clippy::cast_possible_wrap)] // Test conversions
#![allow(clippy::float_cmp)] // Test assertions with constants
#![allow(clippy::missing_panics_doc)] // Tests panic on failure

//! Randomized OPC UA <-> IO round trips through the public API.

use std::sync::Arc;
use uaio::io::{Array, ArrayKind, NodeId, Scalar, ScalarKind, Structure, Variant};
use uaio::resolver::{CachedResolver, TypeRegistry};
use uaio::ua::{
    BuiltinType, ExtensionObject, LocalizedText, StructureDefinitionBuilder, UaArray, UaField,
    UaNodeId, UaScalar, UaVariant,
};
use uaio::{Converter, ErrorKind};

const ITERATIONS: usize = 500;

fn sample_id() -> UaNodeId {
    UaNodeId::numeric(2, 5001)
}

fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register(
        StructureDefinitionBuilder::new(UaNodeId::numeric(2, 5000), "Header")
            .field("sequence", BuiltinType::UInt64)
            .optional_field("source", BuiltinType::String)
            .build(),
    );
    registry.register(
        StructureDefinitionBuilder::new(sample_id(), "Sample")
            .field("channel", BuiltinType::Byte)
            .field("reading", BuiltinType::Float)
            .array_field("history", BuiltinType::Int32)
            .optional_field("unit", BuiltinType::LocalizedText)
            .build(),
    );
    registry.register_subtype(sample_id(), UaNodeId::numeric(2, 5000));
    registry
}

fn random_string(rng: &mut fastrand::Rng) -> String {
    (0..rng.usize(0..12)).map(|_| rng.alphanumeric()).collect()
}

fn random_scalar(rng: &mut fastrand::Rng) -> (UaScalar, BuiltinType) {
    match rng.u8(0..14) {
        0 => (UaScalar::Boolean(rng.bool()), BuiltinType::Boolean),
        1 => (UaScalar::SByte(rng.i8(..)), BuiltinType::SByte),
        2 => (UaScalar::Byte(rng.u8(..)), BuiltinType::Byte),
        3 => (UaScalar::Int16(rng.i16(..)), BuiltinType::Int16),
        4 => (UaScalar::UInt16(rng.u16(..)), BuiltinType::UInt16),
        5 => (UaScalar::Int32(rng.i32(..)), BuiltinType::Int32),
        6 => (UaScalar::UInt32(rng.u32(..)), BuiltinType::UInt32),
        7 => (UaScalar::Int64(rng.i64(..)), BuiltinType::Int64),
        8 => (UaScalar::UInt64(rng.u64(..)), BuiltinType::UInt64),
        9 => (UaScalar::Float(rng.f32() * 1000.0 - 500.0), BuiltinType::Float),
        10 => (UaScalar::Double(rng.f64() * 1e12 - 5e11), BuiltinType::Double),
        11 => (UaScalar::String(Some(random_string(rng))), BuiltinType::String),
        12 => (UaScalar::DateTime(rng.i64(0..)), BuiltinType::DateTime),
        _ => {
            let bytes: Vec<u8> = (0..rng.usize(0..16)).map(|_| rng.u8(..)).collect();
            (UaScalar::ByteString(Some(bytes)), BuiltinType::ByteString)
        }
    }
}

fn random_sample(rng: &mut fastrand::Rng) -> ExtensionObject {
    let history: Vec<UaScalar> = (0..rng.usize(0..8)).map(|_| rng.i32(..).into()).collect();
    let mut fields = vec![
        UaField::new("channel", rng.u8(..)),
        UaField::new("reading", rng.f32()),
        UaField::new(
            "history",
            UaArray::new(BuiltinType::Int32, history).expect("homogeneous history"),
        ),
        UaField::new("sequence", rng.u64(..)),
    ];
    if rng.bool() {
        fields.push(UaField::new("unit", LocalizedText::new("en", "degC")));
    }
    if rng.bool() {
        fields.push(UaField::new("source", random_string(rng)));
    }
    rng.shuffle(&mut fields);
    ExtensionObject::structure(sample_id(), fields)
}

#[test]
fn random_scalars_roundtrip() {
    let mut rng = fastrand::Rng::with_seed(0x5eed);
    let converter = Converter::new(TypeRegistry::new(), false);

    for _ in 0..ITERATIONS {
        let (scalar, kind) = random_scalar(&mut rng);
        let value = UaVariant::Scalar(scalar);
        let type_id = kind.data_type_id();

        let io = converter
            .convert_value_to_internal(&value, &type_id)
            .expect("decode");
        let back = converter
            .convert_value_to_external(&io, &type_id)
            .expect("encode");
        assert_eq!(back, value, "{} via {}", kind, io);
    }
}

#[test]
fn random_structures_roundtrip() {
    let mut rng = fastrand::Rng::with_seed(42);
    let converter = Converter::new(Arc::new(CachedResolver::new(registry())), true);

    for _ in 0..ITERATIONS {
        let sample = random_sample(&mut rng);
        let io = converter
            .convert_value_to_internal(&sample.clone().into(), &sample_id())
            .expect("decode");
        let structure = io.as_structure().expect("structure");

        // own fields first, then inherited ones, whatever the input order
        let names: Vec<&str> = structure.fields().iter().map(|(n, _)| n.as_str()).collect();
        let mut expected = vec!["channel", "reading", "history"];
        if sample.field("unit").is_some() {
            expected.push("unit");
        }
        expected.push("sequence");
        if sample.field("source").is_some() {
            expected.push("source");
        }
        assert_eq!(names, expected);

        let back = converter
            .convert_value_to_external(&io, &sample_id())
            .expect("encode");
        let back = back.as_extension_object().expect("extension object");
        for field in sample.fields() {
            assert_eq!(back.field(&field.name), Some(&field.value), "field {}", field.name);
        }
        assert_eq!(back.fields().len(), sample.fields().len());
    }
}

#[test]
fn random_integer_narrowing() {
    let mut rng = fastrand::Rng::with_seed(7);
    let converter = Converter::new(TypeRegistry::new(), false);
    let int16 = BuiltinType::Int16.data_type_id();

    for _ in 0..ITERATIONS {
        let n = rng.i64(-100_000..100_000);
        let result = converter.convert_value_to_external(&Variant::from(n), &int16);
        if i16::try_from(n).is_ok() {
            assert_eq!(result.expect("in range"), UaVariant::from(n as i16));
        } else {
            assert_eq!(result.expect_err("out of range").kind(), ErrorKind::PrecisionLoss);
        }
    }
}

#[test]
fn structure_with_wrong_field_type_is_rejected() {
    let converter = Converter::new(registry(), false);
    let io = Structure::empty(NodeId::numeric(2, 5001))
        .with_field("channel", Scalar::from("seven"))
        .and_then(|s| s.with_field("reading", 1.0f32))
        .and_then(|s| s.with_field("history", Array::empty(ArrayKind::Scalar(ScalarKind::Long))))
        .and_then(|s| s.with_field("sequence", 1u64))
        .expect("unique names");
    let err = converter
        .convert_value_to_external(&io.into(), &sample_id())
        .expect_err("string into Byte");
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert!(err.message().starts_with("field 'channel'"));
}

#[test]
fn structure_without_inherited_sequence_is_rejected() {
    let converter = Converter::new(registry(), false);
    let mut rng = fastrand::Rng::with_seed(11);
    let mut sample = random_sample(&mut rng);
    if let uaio::ua::StructureBody::Fields(fields) = &mut sample.body {
        fields.retain(|f| f.name != "sequence");
    }
    let err = converter
        .convert_value_to_internal(&sample.into(), &sample_id())
        .expect_err("sequence is mandatory on Header");
    assert_eq!(err.kind(), ErrorKind::ArityMismatch);
    assert!(err.message().contains("'sequence'"));
}
