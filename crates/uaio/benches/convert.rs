// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Conversion Benchmarks
//!
//! Measures the hot paths of the converter:
//! - scalar decode/encode against a well-known type
//! - nested structure decode/encode with inherited fields
//! - resolver lookup cost with and without the concurrent cache

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_wrap)]

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::sync::Arc;
use uaio::io::{NodeData, NodeId};
use uaio::resolver::{CachedResolver, TypeRegistry, TypeResolver};
use uaio::ua::{
    BuiltinType, ExtensionObject, StructureDefinitionBuilder, UaArray, UaDataValue, UaField,
    UaNodeId, UaScalar, UaVariant,
};
use uaio::Converter;

fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register(
        StructureDefinitionBuilder::new(UaNodeId::numeric(2, 10), "Stamped")
            .field("sequence", BuiltinType::UInt32)
            .field("source", BuiltinType::String)
            .build(),
    );
    registry.register(
        StructureDefinitionBuilder::new(UaNodeId::numeric(2, 11), "Vector")
            .field("x", BuiltinType::Double)
            .field("y", BuiltinType::Double)
            .field("z", BuiltinType::Double)
            .build(),
    );
    registry.register(
        StructureDefinitionBuilder::new(UaNodeId::numeric(2, 12), "Pose")
            .field_of("position", UaNodeId::numeric(2, 11))
            .field_of("velocity", UaNodeId::numeric(2, 11))
            .array_field("samples", BuiltinType::Float)
            .build(),
    );
    registry.register_subtype(UaNodeId::numeric(2, 12), UaNodeId::numeric(2, 10));
    registry
}

fn vector(x: f64) -> ExtensionObject {
    ExtensionObject::structure(
        UaNodeId::numeric(2, 11),
        vec![
            UaField::new("x", x),
            UaField::new("y", x * 2.0),
            UaField::new("z", x * 3.0),
        ],
    )
}

fn pose(seq: u32) -> UaVariant {
    let samples: Vec<UaScalar> = (0..16).map(|i| (i as f32 * 0.5).into()).collect();
    let samples = match UaArray::new(BuiltinType::Float, samples) {
        Ok(array) => array,
        Err(e) => panic!("samples: {}", e),
    };
    ExtensionObject::structure(
        UaNodeId::numeric(2, 12),
        vec![
            UaField::new("source", "bench"),
            UaField::new("velocity", vector(0.25)),
            UaField::new("sequence", seq),
            UaField::new("position", vector(1.0)),
            UaField::new("samples", samples),
        ],
    )
    .into()
}

fn bench_scalar(c: &mut Criterion) {
    let converter = Converter::new(TypeRegistry::new(), false);
    let double = BuiltinType::Double.data_type_id();
    let int16 = BuiltinType::Int16.data_type_id();
    let value = UaVariant::from(42.5f64);
    let io = uaio::io::Variant::from(1234i64);

    c.bench_function("scalar_decode_double", |b| {
        b.iter(|| converter.convert_value_to_internal(black_box(&value), &double))
    });
    c.bench_function("scalar_encode_narrow_int16", |b| {
        b.iter(|| converter.convert_value_to_external(black_box(&io), &int16))
    });
}

fn bench_structure(c: &mut Criterion) {
    let type_id = UaNodeId::numeric(2, 12);
    let value = pose(7);

    let plain = Converter::new(registry(), false);
    let cached = Converter::new(Arc::new(CachedResolver::new(registry())), false);
    if let Err(e) = cached.resolver().preload(&type_id) {
        panic!("preload: {}", e);
    }

    c.bench_function("structure_decode_registry", |b| {
        b.iter(|| plain.convert_value_to_internal(black_box(&value), &type_id))
    });
    c.bench_function("structure_decode_cached", |b| {
        b.iter(|| cached.convert_value_to_internal(black_box(&value), &type_id))
    });

    let io = match cached.convert_value_to_internal(&value, &type_id) {
        Ok(io) => io,
        Err(e) => panic!("decode: {}", e),
    };
    c.bench_function("structure_encode_cached", |b| {
        b.iter(|| cached.convert_value_to_external(black_box(&io), &type_id))
    });
}

fn bench_event(c: &mut Criterion) {
    let type_id = UaNodeId::numeric(2, 12);
    let converter = Converter::new(Arc::new(CachedResolver::new(registry())), true);
    let values: Vec<UaDataValue> = (0..32)
        .map(|i| UaDataValue::new(UaNodeId::numeric(2, 1000 + i), type_id.clone(), pose(i)))
        .collect();

    c.bench_function("event_convert_32_nodes", |b| {
        b.iter(|| converter.convert_event(black_box(1_700_000_000_000), &values))
    });

    let storage: Vec<NodeData> = (0..32)
        .map(|i| NodeData::new(NodeId::numeric(2, i64::from(i)), f64::from(i)))
        .collect();
    c.bench_function("event_attach_32_nodes", |b| {
        b.iter_batched(
            || storage.clone(),
            |data| converter.event(0, black_box(&data)).into_attached(),
            BatchSize::SmallInput,
        )
    });
}

fn bench_resolver(c: &mut Criterion) {
    let type_id = UaNodeId::numeric(2, 12);
    let registry = registry();
    let cached = CachedResolver::new(registry.clone());

    c.bench_function("resolve_supertypes_registry", |b| {
        b.iter(|| registry.resolve_supertypes(black_box(&type_id)))
    });
    c.bench_function("resolve_supertypes_cached", |b| {
        b.iter(|| cached.resolve_supertypes(black_box(&type_id)))
    });
}

criterion_group!(value_benches, bench_scalar, bench_structure);
criterion_group!(event_benches, bench_event);
criterion_group!(resolver_benches, bench_resolver);
criterion_main!(value_benches, event_benches, resolver_benches);
