// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Conversion engine and its public facade.
//!
//! ```text
//!        UaVariant + type id                       Variant
//!   ---------------------------->  Converter  ---------------------->
//!   <----------------------------             <----------------------
//!        UaVariant                                 Variant + type id
//!
//!   base kind of type id:  Value(builtin) -> scalar converter
//!                          Structure/Union -> structured walker
//! ```
//!
//! # Example
//!
//! ```rust
//! use uaio::convert::Converter;
//! use uaio::io::{NodeData, NodeId};
//! use uaio::resolver::TypeRegistry;
//!
//! let converter = Converter::new(TypeRegistry::new(), false);
//! let storage = vec![NodeData::new(NodeId::numeric(2, 7), 1.5f64)];
//! let event = converter.event(1_700_000_000_000, &storage);
//! assert!(!event.is_attached());
//! ```

pub mod node_id;
pub mod scalar;
mod structured;


use crate::config::ConverterConfig;
use crate::error::Result;
use crate::io::{Event, NodeData, NodeId, Variant};
use crate::resolver::TypeResolver;
use crate::ua::{UaDataValue, UaNodeId, UaVariant};
use structured::Walker;

/// Bidirectional converter between OPC UA values and IO values.
///
/// Holds no mutable state: every call is independent, and a `Converter` is
/// `Send + Sync` whenever its resolver is. Whether the resolver is borrowed
/// or owned is up to the caller (`&R`, `Box<R>`, `Arc<R>` or `R`).
#[derive(Debug, Clone)]
pub struct Converter<R> {
    resolver: R,
    config: ConverterConfig,
}

impl<R: TypeResolver> Converter<R> {
    /// Create a converter with default settings.
    ///
    /// `attach_values` decides whether events built by [`event`](Self::event)
    /// own a copy of their node data.
    pub fn new(resolver: R, attach_values: bool) -> Self {
        Self::with_config(resolver, ConverterConfig::new().attach_values(attach_values))
    }

    pub fn with_config(resolver: R, config: ConverterConfig) -> Self {
        Self { resolver, config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn attach_values(&self) -> bool {
        self.config.attach_values
    }

    fn walker(&self) -> Walker<'_, R> {
        Walker::new(&self.resolver, &self.config)
    }

    // ===================================================================
    // Identifiers
    // ===================================================================

    pub fn convert_id_to_internal(&self, id: &UaNodeId) -> Result<NodeId> {
        node_id::external_to_internal(id)
    }

    pub fn convert_id_to_external(&self, id: &NodeId) -> Result<UaNodeId> {
        node_id::internal_to_external(id)
    }

    // ===================================================================
    // Values
    // ===================================================================

    /// Convert an OPC UA value declared as `source_type_id` into the IO model.
    pub fn convert_value_to_internal(
        &self,
        value: &UaVariant,
        source_type_id: &UaNodeId,
    ) -> Result<Variant> {
        let converted = self.walker().decode(value, source_type_id, 0)?;
        if log::log_enabled!(log::Level::Debug) && is_composite(&converted) {
            log::debug!("[convert] {} -> IO: {}", source_type_id, converted);
        }
        Ok(converted)
    }

    /// Convert an IO value into an OPC UA value of `destination_type_id`.
    pub fn convert_value_to_external(
        &self,
        value: &Variant,
        destination_type_id: &UaNodeId,
    ) -> Result<UaVariant> {
        let converted = self.walker().encode(value, destination_type_id, 0)?;
        if log::log_enabled!(log::Level::Debug) && is_composite(value) {
            log::debug!("[convert] IO -> {}: {}", destination_type_id, value);
        }
        Ok(converted)
    }

    // ===================================================================
    // Node data and events
    // ===================================================================

    /// Convert one OPC UA data value into IO node data.
    pub fn node_data(&self, value: &UaDataValue) -> Result<NodeData> {
        let node_id = self.convert_id_to_internal(&value.node_id)?;
        let converted = match &value.value {
            Some(v) => Some(
                self.convert_value_to_internal(v, &value.data_type_id)
                    .map_err(|e| e.context(&value.node_id))?,
            ),
            None => None,
        };
        Ok(NodeData {
            node_id,
            value: converted,
        })
    }

    /// Convert IO node data back into an OPC UA data value of `data_type_id`.
    pub fn data_value(&self, data: &NodeData, data_type_id: &UaNodeId) -> Result<UaDataValue> {
        let node_id = self.convert_id_to_external(&data.node_id)?;
        let value = match &data.value {
            Some(v) => Some(
                self.convert_value_to_external(v, data_type_id)
                    .map_err(|e| e.context(&data.node_id))?,
            ),
            None => None,
        };
        Ok(UaDataValue {
            node_id,
            data_type_id: data_type_id.clone(),
            value,
        })
    }

    /// Wrap `values` into an event.
    ///
    /// With `attach_values` the event owns a deep copy; otherwise it borrows
    /// `values` and cannot outlive them.
    pub fn event<'a>(&self, date_time: i64, values: &'a [NodeData]) -> Event<'a> {
        if self.config.attach_values {
            Event::attached(date_time, values.to_vec())
        } else {
            Event::referencing(date_time, values)
        }
    }

    /// Convert a batch of OPC UA data values into one attached event.
    ///
    /// All or nothing: the first failing value aborts the whole batch.
    pub fn convert_event(&self, date_time: i64, values: &[UaDataValue]) -> Result<Event<'static>> {
        let data = values
            .iter()
            .map(|v| self.node_data(v))
            .collect::<Result<Vec<_>>>()?;
        log::debug!("[convert] event @{} with {} node(s)", date_time, data.len());
        Ok(Event::attached(date_time, data))
    }
}

fn is_composite(value: &Variant) -> bool {
    matches!(value, Variant::Structure(_) | Variant::Array(_))
}
