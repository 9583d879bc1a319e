// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-memory type registry.

use super::TypeResolver;
use crate::error::ResolutionError;
use crate::ua::{data_type_ids, StructureDefinition, UaNodeId};
use std::collections::HashMap;
use std::sync::Arc;

/// Simple [`HashMap`]-backed [`TypeResolver`].
///
/// Structure definitions are registered with [`register`](Self::register);
/// parent links with [`register_subtype`](Self::register_subtype). A
/// registered structure without an explicit parent derives from the
/// namespace-0 `Structure` (or `Union`) type. Namespace-0 ids are roots and
/// have no supertypes.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    definitions: HashMap<UaNodeId, Arc<StructureDefinition>>,
    parents: HashMap<UaNodeId, UaNodeId>,
}

impl TypeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a structure definition under its own data type id.
    pub fn register(&mut self, definition: StructureDefinition) {
        self.definitions
            .insert(definition.data_type_id.clone(), Arc::new(definition));
    }

    /// Declare `parent` as the immediate supertype of `child`.
    pub fn register_subtype(&mut self, child: UaNodeId, parent: UaNodeId) {
        self.parents.insert(child, parent);
    }

    pub fn contains(&self, type_id: &UaNodeId) -> bool {
        self.definitions.contains_key(type_id) || self.parents.contains_key(type_id)
    }

    pub fn definition(&self, type_id: &UaNodeId) -> Option<&Arc<StructureDefinition>> {
        self.definitions.get(type_id)
    }

    /// Registered structure definitions, in no particular order.
    pub fn definitions(&self) -> impl Iterator<Item = &Arc<StructureDefinition>> {
        self.definitions.values()
    }

    /// Number of registered structure definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` if no structure definitions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Move all entries of `other` into this registry.
    pub fn extend(&mut self, other: TypeRegistry) {
        self.definitions.extend(other.definitions);
        self.parents.extend(other.parents);
    }

    fn parent_of(&self, type_id: &UaNodeId) -> Option<UaNodeId> {
        if let Some(parent) = self.parents.get(type_id) {
            return Some(parent.clone());
        }
        self.definitions.get(type_id).map(|def| {
            let root = if def.is_union {
                data_type_ids::UNION
            } else {
                data_type_ids::STRUCTURE
            };
            UaNodeId::numeric(0, root)
        })
    }
}

impl TypeResolver for TypeRegistry {
    fn resolve_structure(
        &self,
        type_id: &UaNodeId,
    ) -> Result<Arc<StructureDefinition>, ResolutionError> {
        self.definitions
            .get(type_id)
            .cloned()
            .ok_or_else(|| ResolutionError::UnknownType(type_id.clone()))
    }

    fn resolve_supertypes(&self, type_id: &UaNodeId) -> Result<Vec<UaNodeId>, ResolutionError> {
        if type_id.is_namespace_zero() {
            return Ok(Vec::new());
        }
        let mut chain: Vec<UaNodeId> = Vec::new();
        let mut current = type_id.clone();
        while let Some(parent) = self.parent_of(&current) {
            if &parent == type_id || chain.contains(&parent) {
                return Err(ResolutionError::CyclicHierarchy(parent));
            }
            chain.push(parent.clone());
            if parent.is_namespace_zero() {
                break;
            }
            current = parent;
        }
        if chain.is_empty() {
            return Err(ResolutionError::UnknownType(type_id.clone()));
        }
        Ok(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ua::{BuiltinType, StructureDefinitionBuilder};

    fn id(n: u32) -> UaNodeId {
        UaNodeId::numeric(1, n)
    }

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register(
            StructureDefinitionBuilder::new(id(1), "Base")
                .field("a", BuiltinType::Int32)
                .build(),
        );
        registry.register(
            StructureDefinitionBuilder::new(id(2), "Middle")
                .field("b", BuiltinType::Int32)
                .build(),
        );
        registry.register(
            StructureDefinitionBuilder::new(id(3), "Leaf")
                .field("c", BuiltinType::Int32)
                .build(),
        );
        registry.register_subtype(id(2), id(1));
        registry.register_subtype(id(3), id(2));
        registry
    }

    #[test]
    fn test_chain_is_parent_first() {
        let chain = registry().resolve_supertypes(&id(3)).unwrap();
        assert_eq!(chain, vec![id(2), id(1), UaNodeId::numeric(0, 22)]);
    }

    #[test]
    fn test_union_root_and_plain_subtype() {
        let mut registry = TypeRegistry::new();
        registry.register(
            StructureDefinitionBuilder::new(id(10), "Choice")
                .union()
                .field("a", BuiltinType::Int32)
                .build(),
        );
        registry.register_subtype(id(11), UaNodeId::numeric(0, 29));

        assert_eq!(
            registry.resolve_supertypes(&id(10)).unwrap(),
            vec![UaNodeId::numeric(0, 12756)]
        );
        assert_eq!(
            registry.resolve_supertypes(&id(11)).unwrap(),
            vec![UaNodeId::numeric(0, 29)]
        );
        assert!(registry.resolve_supertypes(&UaNodeId::numeric(0, 6)).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_and_cyclic() {
        let mut registry = registry();
        assert_eq!(
            registry.resolve_supertypes(&id(99)),
            Err(ResolutionError::UnknownType(id(99)))
        );
        assert!(registry.resolve_structure(&id(99)).is_err());

        registry.register_subtype(id(1), id(3));
        assert!(matches!(
            registry.resolve_supertypes(&id(3)),
            Err(ResolutionError::CyclicHierarchy(_))
        ));
    }

    #[test]
    fn test_extend() {
        let mut a = TypeRegistry::new();
        a.extend(registry());
        assert_eq!(a.len(), 3);
        assert!(a.contains(&id(2)));
        assert_eq!(a.definition(&id(1)).map(|d| d.name.as_str()), Some("Base"));
    }
}
