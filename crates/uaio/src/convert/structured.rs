// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structured value conversion.
//!
//! [`Walker`] converts values recursively, in both directions, using a
//! [`TypeResolver`] for schemas and the scalar converter for leaves.
//!
//! # Field binding
//!
//! Fields present in a value are bound by name: first against the declared
//! type `T`, then against its ancestors (immediate parent first, namespace-0
//! roots skipped). Each bound field gets a position:
//!
//! ```text
//! own field i              -> i
//! field i of ancestor k    -> len(T) + len(A1) + ... + len(Ak-1) + i
//! ```
//!
//! Fields are converted in position order, so the output follows the schema
//! no matter how the input was ordered.

use super::{node_id, scalar};
use crate::config::ConverterConfig;
use crate::error::{ConversionError, Result};
use crate::io::{Array, ArrayKind, Structure, Variant};
use crate::resolver::TypeResolver;
use crate::ua::{
    BaseKind, BuiltinType, ExtensionObject, StructureDefinition, StructureField, UaArray,
    UaField, UaNodeId, UaScalar, UaVariant,
};
use std::collections::HashSet;
use std::sync::Arc;

/// A value field bound to the schema field that declares it.
struct Binding<'v, V> {
    position: usize,
    definition: Arc<StructureDefinition>,
    index: usize,
    value: &'v V,
}

impl<V> Binding<'_, V> {
    fn field(&self) -> &StructureField {
        &self.definition.fields[self.index]
    }
}

/// Recursive converter borrowing the resolver and configuration of a
/// [`Converter`](super::Converter) for the duration of one call.
pub(crate) struct Walker<'c, R> {
    resolver: &'c R,
    config: &'c ConverterConfig,
}

impl<'c, R: TypeResolver> Walker<'c, R> {
    pub(crate) fn new(resolver: &'c R, config: &'c ConverterConfig) -> Self {
        Self { resolver, config }
    }

    // -----------------------------------------------------------------------
    // Type information
    // -----------------------------------------------------------------------

    /// Supertype chain of `type_id`, checked for cycles.
    fn supertypes(&self, type_id: &UaNodeId) -> Result<Vec<UaNodeId>> {
        let chain = self.resolver.resolve_supertypes(type_id)?;
        let mut seen = HashSet::with_capacity(chain.len());
        for id in &chain {
            if id == type_id || !seen.insert(id) {
                return Err(ConversionError::cyclic_type(format!(
                    "supertype chain of {} repeats {}",
                    type_id, id
                )));
            }
        }
        Ok(chain)
    }

    /// What values of `type_id` ultimately are.
    ///
    /// Namespace-0 ids are their own base; any other id uses the last entry
    /// of its supertype chain.
    pub(crate) fn base_kind(&self, type_id: &UaNodeId) -> Result<BaseKind> {
        if type_id.is_namespace_zero() {
            return BaseKind::of(type_id).ok_or_else(|| {
                ConversionError::unknown_type(format!("{} is not a convertible data type", type_id))
            });
        }
        let chain = self.supertypes(type_id)?;
        let root = chain.last().ok_or_else(|| {
            ConversionError::unknown_type(format!("no supertypes known for {}", type_id))
        })?;
        BaseKind::of(root).ok_or_else(|| {
            ConversionError::unknown_type(format!(
                "base type {} of {} is not convertible",
                root, type_id
            ))
        })
    }

    fn check_depth(&self, type_id: &UaNodeId, depth: usize) -> Result<()> {
        if depth > self.config.max_depth {
            return Err(ConversionError::cyclic_type(format!(
                "{} nested {} levels deep (limit {})",
                type_id, depth, self.config.max_depth
            )));
        }
        Ok(())
    }

    /// Bind `fields` to the schema of `type_id` and order them by position.
    fn bind<'v, V>(
        &self,
        type_id: &UaNodeId,
        definition: &Arc<StructureDefinition>,
        fields: &[(&'v str, &'v V)],
    ) -> Result<Vec<Binding<'v, V>>> {
        if definition.is_union && fields.len() > 1 {
            return Err(ConversionError::arity_mismatch(format!(
                "union {} has {} fields set",
                type_id,
                fields.len()
            )));
        }

        let mut bound = Vec::with_capacity(fields.len());
        let mut pending: Vec<(&'v str, &'v V)> = Vec::new();
        let mut seen = HashSet::with_capacity(fields.len());
        for &(name, value) in fields {
            if !seen.insert(name) {
                return Err(ConversionError::arity_mismatch(format!(
                    "field '{}' of {} is set twice",
                    name, type_id
                )));
            }
            match definition.field_index(name) {
                Some(index) => bound.push(Binding {
                    position: index,
                    definition: Arc::clone(definition),
                    index,
                    value,
                }),
                None => pending.push((name, value)),
            }
        }

        // Every ancestor is needed for the mandatory check of a structure;
        // a union only consults them for names it does not declare itself.
        let mut layout: Vec<(usize, Arc<StructureDefinition>)> =
            vec![(0, Arc::clone(definition))];
        if !pending.is_empty() || !definition.is_union {
            let mut offset = definition.len();
            for ancestor in self.supertypes(type_id)? {
                if pending.is_empty() && definition.is_union {
                    break;
                }
                if ancestor.is_namespace_zero() {
                    continue;
                }
                let parent = self.resolver.resolve_structure(&ancestor)?;
                if !pending.is_empty() {
                    log::trace!(
                        "looking up {} field(s) of {} in supertype {}",
                        pending.len(),
                        type_id,
                        ancestor
                    );
                }
                pending.retain(|&(name, value)| match parent.field_index(name) {
                    Some(index) => {
                        bound.push(Binding {
                            position: offset + index,
                            definition: Arc::clone(&parent),
                            index,
                            value,
                        });
                        false
                    }
                    None => true,
                });
                let len = parent.len();
                layout.push((offset, parent));
                offset += len;
            }
            if let Some((name, _)) = pending.first() {
                return Err(ConversionError::unknown_field(format!(
                    "'{}' is declared neither by {} nor by its supertypes",
                    name, type_id
                )));
            }
        }

        if !definition.is_union {
            let positions: HashSet<usize> = bound.iter().map(|b| b.position).collect();
            for (offset, declaring) in &layout {
                for (index, field) in declaring.fields.iter().enumerate() {
                    if field.optional || positions.contains(&(offset + index)) {
                        continue;
                    }
                    return Err(ConversionError::arity_mismatch(if *offset == 0 {
                        format!("mandatory field '{}' of {} is missing", field.name, type_id)
                    } else {
                        format!(
                            "mandatory field '{}' of {} (inherited from {}) is missing",
                            field.name, type_id, declaring.data_type_id
                        )
                    }));
                }
            }
        }

        bound.sort_by_key(|b| b.position);
        Ok(bound)
    }

    // -----------------------------------------------------------------------
    // OPC UA -> IO
    // -----------------------------------------------------------------------

    /// Convert `value`, declared as `type_id`, into the IO model.
    pub(crate) fn decode(&self, value: &UaVariant, type_id: &UaNodeId, depth: usize) -> Result<Variant> {
        let base = match self.base_kind(type_id)? {
            BaseKind::Value(base) => return scalar::decode_value(value, base),
            structured => structured,
        };
        match value {
            UaVariant::Scalar(UaScalar::ExtensionObject(eo)) => self
                .decode_structure(eo, type_id, depth + 1)
                .map(Variant::Structure),
            UaVariant::Array(array) if array.element_type() == BuiltinType::ExtensionObject => {
                let elements = array
                    .elements()
                    .iter()
                    .enumerate()
                    .map(|(i, elem)| match elem {
                        UaScalar::ExtensionObject(eo) => self
                            .decode_structure(eo, type_id, depth + 1)
                            .map(Variant::Structure)
                            .map_err(|e| e.context(format!("[{}]", i))),
                        other => Err(ConversionError::type_mismatch(format!(
                            "[{}]: expected ExtensionObject, got {}",
                            i,
                            other.builtin_type()
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Array::new(ArrayKind::Structure, elements).map(Variant::Array)
            }
            other => Err(ConversionError::type_mismatch(format!(
                "{:?} type {} expects ExtensionObject values, got {}",
                base,
                type_id,
                other.builtin_type()
            ))),
        }
    }

    fn decode_structure(
        &self,
        value: &ExtensionObject,
        type_id: &UaNodeId,
        depth: usize,
    ) -> Result<Structure> {
        self.check_depth(type_id, depth)?;
        let definition = self.resolver.resolve_structure(type_id)?;
        if definition.is_union != value.is_union() {
            return Err(ConversionError::type_mismatch(format!(
                "{} is {}a union but the value is {}",
                type_id,
                if definition.is_union { "" } else { "not " },
                if value.is_union() { "a union" } else { "a structure" }
            )));
        }

        let fields: Vec<(&str, &UaVariant)> = value
            .fields()
            .iter()
            .map(|f| (f.name.as_str(), &f.value))
            .collect();
        log::trace!(
            "{:indent$}decode {} '{}' ({} field(s))",
            "",
            type_id,
            definition.name,
            fields.len(),
            indent = depth * 2
        );

        let bound = self.bind(type_id, &definition, &fields)?;
        let mut out = Structure::empty(node_id::external_to_internal(type_id)?);
        for binding in &bound {
            let field = binding.field();
            log::trace!(
                "{:indent$}#{} {}: {}",
                "",
                binding.position,
                field.name,
                field.data_type_id,
                indent = depth * 2 + 2
            );
            let converted = self
                .decode_field(binding.value, field, depth)
                .map_err(|e| e.context(format!("field '{}'", field.name)))?;
            out.push(field.name.as_str(), converted)?;
        }
        Ok(out)
    }

    fn decode_field(&self, value: &UaVariant, field: &StructureField, depth: usize) -> Result<Variant> {
        check_array_shape(value.is_array(), field)?;
        self.decode(value, &field.data_type_id, depth)
    }

    // -----------------------------------------------------------------------
    // IO -> OPC UA
    // -----------------------------------------------------------------------

    /// Convert `value` into the OPC UA model as data type `type_id`.
    pub(crate) fn encode(&self, value: &Variant, type_id: &UaNodeId, depth: usize) -> Result<UaVariant> {
        let base = match self.base_kind(type_id)? {
            BaseKind::Value(base) => {
                return scalar::encode_value(value, base, &self.config.default_locale)
            }
            structured => structured,
        };
        match value {
            Variant::Structure(structure) => self
                .encode_structure(structure, type_id, depth + 1)
                .map(UaVariant::from),
            Variant::Array(array) if array.kind() == ArrayKind::Structure => {
                let elements = array
                    .elements()
                    .iter()
                    .enumerate()
                    .map(|(i, elem)| match elem.as_structure() {
                        Some(structure) => self
                            .encode_structure(structure, type_id, depth + 1)
                            .map(UaScalar::ExtensionObject)
                            .map_err(|e| e.context(format!("[{}]", i))),
                        None => Err(ConversionError::type_mismatch(format!(
                            "[{}]: expected structure, got {}",
                            i,
                            elem.type_name()
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?;
                UaArray::new(BuiltinType::ExtensionObject, elements).map(UaVariant::Array)
            }
            other => Err(ConversionError::type_mismatch(format!(
                "{:?} type {} expects structure values, got {}",
                base,
                type_id,
                other.type_name()
            ))),
        }
    }

    fn encode_structure(
        &self,
        value: &Structure,
        type_id: &UaNodeId,
        depth: usize,
    ) -> Result<ExtensionObject> {
        self.check_depth(type_id, depth)?;
        let definition = self.resolver.resolve_structure(type_id)?;

        let fields: Vec<(&str, &Variant)> = value
            .fields()
            .iter()
            .map(|(name, v)| (name.as_str(), v))
            .collect();
        log::trace!(
            "{:indent$}encode {} '{}' ({} field(s))",
            "",
            type_id,
            definition.name,
            fields.len(),
            indent = depth * 2
        );

        let bound = self.bind(type_id, &definition, &fields)?;
        let mut out = Vec::with_capacity(bound.len());
        for binding in &bound {
            let field = binding.field();
            log::trace!(
                "{:indent$}#{} {}: {}",
                "",
                binding.position,
                field.name,
                field.data_type_id,
                indent = depth * 2 + 2
            );
            let converted = self
                .encode_field(binding.value, field, depth)
                .map_err(|e| e.context(format!("field '{}'", field.name)))?;
            out.push(UaField {
                name: field.name.clone(),
                value: converted,
            });
        }

        Ok(if definition.is_union {
            ExtensionObject::union(type_id.clone(), out.pop())
        } else {
            ExtensionObject::structure(type_id.clone(), out)
        })
    }

    fn encode_field(&self, value: &Variant, field: &StructureField, depth: usize) -> Result<UaVariant> {
        check_array_shape(value.is_array(), field)?;
        self.encode(value, &field.data_type_id, depth)
    }
}

fn check_array_shape(is_array: bool, field: &StructureField) -> Result<()> {
    if is_array == field.is_array {
        return Ok(());
    }
    Err(ConversionError::type_mismatch(if field.is_array {
        "array expected, got a scalar"
    } else {
        "scalar expected, got an array"
    }))
}
