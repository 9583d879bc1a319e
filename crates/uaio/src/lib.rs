// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # uaio - OPC UA <-> IO data conversion
//!
//! Bidirectional structural conversion between the OPC UA value model
//! (variants, extension objects, schema-defined structures with type
//! inheritance) and a simple tagged IO data model keyed by node ids.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use uaio::convert::Converter;
//! use uaio::io::{Scalar, Variant};
//! use uaio::resolver::TypeRegistry;
//! use uaio::ua::{BuiltinType, StructureDefinitionBuilder, UaNodeId, UaVariant};
//!
//! let point_id = UaNodeId::numeric(2, 3001);
//! let mut registry = TypeRegistry::new();
//! registry.register(
//!     StructureDefinitionBuilder::new(point_id.clone(), "Point")
//!         .field("x", BuiltinType::Int32)
//!         .field("y", BuiltinType::Double)
//!         .build(),
//! );
//!
//! let converter = Converter::new(Arc::new(registry), true);
//! let io = converter
//!     .convert_value_to_internal(&UaVariant::from(42i32), &BuiltinType::Int32.data_type_id())
//!     .unwrap();
//! assert_eq!(io, Variant::Scalar(Scalar::Long(42)));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------------------------+
//! |                  Converter (facade, convert)                 |
//! |   ids | values | node data | events (attached/referencing)   |
//! +--------------------------------------------------------------+
//! |  node_id converter | scalar converter | structured converter |
//! +--------------------------------------------------------------+
//! |        TypeResolver (caller capability, resolver)            |
//! |   TypeRegistry | CachedResolver | FnResolver | loaders       |
//! +--------------------------------------------------------------+
//! |        ua (external model)   |    io (internal model)        |
//! +--------------------------------------------------------------+
//! ```
//!
//! ## Modules Overview
//!
//! - [`convert`] - conversion engine and facade (start here)
//! - [`resolver`] - type resolver capability and its adapters
//! - [`ua`] - OPC UA value and schema model
//! - [`io`] - IO data model (variants, node data, events)
//! - [`config`] - converter configuration and defaults
//! - [`error`] - conversion error taxonomy

pub mod config;
pub mod convert;
pub mod error;
pub mod io;
pub mod resolver;
pub mod ua;

pub use config::ConverterConfig;
pub use convert::Converter;
pub use error::{ConversionError, ErrorKind, ResolutionError, Result};
pub use resolver::TypeResolver;
