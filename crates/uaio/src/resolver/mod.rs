// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type resolution.
//!
//! The conversion engine does not know any user-defined data type. It asks a
//! [`TypeResolver`] for two things:
//!
//! - the [`StructureDefinition`] of a structured type id
//! - the supertype chain of a type id, immediate parent first and the
//!   namespace-0 root (e.g. `Structure`, `Int32`) last
//!
//! Adapters:
//!
//! - [`TypeRegistry`] - in-memory `HashMap` registry with parent links
//! - [`CachedResolver`] - thread-safe cache in front of another resolver
//! - [`FnResolver`] - resolver built from two closures
//! - [`nodeset`] / [`yaml`] - registry loaders (feature `loaders`)

mod cached;
#[cfg(feature = "loaders")]
pub mod nodeset;
mod registry;
#[cfg(feature = "loaders")]
pub mod yaml;

pub use cached::CachedResolver;
pub use registry::TypeRegistry;

use crate::error::ResolutionError;
use crate::ua::{StructureDefinition, UaNodeId};
use std::sync::Arc;

/// Capability resolving data type ids to their schema and ancestry.
///
/// Implementations are called re-entrantly while a value is converted, so
/// they take `&self` and must not hold locks across calls into the engine.
pub trait TypeResolver {
    /// Field schema of a structured data type.
    fn resolve_structure(
        &self,
        type_id: &UaNodeId,
    ) -> Result<Arc<StructureDefinition>, ResolutionError>;

    /// Ordered ancestors of `type_id`: immediate parent first, root last.
    fn resolve_supertypes(&self, type_id: &UaNodeId) -> Result<Vec<UaNodeId>, ResolutionError>;
}

impl<R: TypeResolver + ?Sized> TypeResolver for &R {
    fn resolve_structure(
        &self,
        type_id: &UaNodeId,
    ) -> Result<Arc<StructureDefinition>, ResolutionError> {
        (**self).resolve_structure(type_id)
    }

    fn resolve_supertypes(&self, type_id: &UaNodeId) -> Result<Vec<UaNodeId>, ResolutionError> {
        (**self).resolve_supertypes(type_id)
    }
}

impl<R: TypeResolver + ?Sized> TypeResolver for Box<R> {
    fn resolve_structure(
        &self,
        type_id: &UaNodeId,
    ) -> Result<Arc<StructureDefinition>, ResolutionError> {
        (**self).resolve_structure(type_id)
    }

    fn resolve_supertypes(&self, type_id: &UaNodeId) -> Result<Vec<UaNodeId>, ResolutionError> {
        (**self).resolve_supertypes(type_id)
    }
}

impl<R: TypeResolver + ?Sized> TypeResolver for Arc<R> {
    fn resolve_structure(
        &self,
        type_id: &UaNodeId,
    ) -> Result<Arc<StructureDefinition>, ResolutionError> {
        (**self).resolve_structure(type_id)
    }

    fn resolve_supertypes(&self, type_id: &UaNodeId) -> Result<Vec<UaNodeId>, ResolutionError> {
        (**self).resolve_supertypes(type_id)
    }
}

/// Resolver built from a pair of closures.
///
/// ```rust
/// use uaio::resolver::{FnResolver, TypeResolver};
/// use uaio::ua::UaNodeId;
/// use uaio::ResolutionError;
///
/// let resolver = FnResolver::new(
///     |id: &UaNodeId| Err(ResolutionError::UnknownType(id.clone())),
///     |_: &UaNodeId| Ok(vec![UaNodeId::numeric(0, 22)]),
/// );
/// assert!(resolver.resolve_structure(&UaNodeId::numeric(1, 1)).is_err());
/// ```
pub struct FnResolver<S, T> {
    structure: S,
    supertypes: T,
}

impl<S, T> FnResolver<S, T>
where
    S: Fn(&UaNodeId) -> Result<Arc<StructureDefinition>, ResolutionError>,
    T: Fn(&UaNodeId) -> Result<Vec<UaNodeId>, ResolutionError>,
{
    pub fn new(structure: S, supertypes: T) -> Self {
        Self {
            structure,
            supertypes,
        }
    }
}

impl<S, T> TypeResolver for FnResolver<S, T>
where
    S: Fn(&UaNodeId) -> Result<Arc<StructureDefinition>, ResolutionError>,
    T: Fn(&UaNodeId) -> Result<Vec<UaNodeId>, ResolutionError>,
{
    fn resolve_structure(
        &self,
        type_id: &UaNodeId,
    ) -> Result<Arc<StructureDefinition>, ResolutionError> {
        (self.structure)(type_id)
    }

    fn resolve_supertypes(&self, type_id: &UaNodeId) -> Result<Vec<UaNodeId>, ResolutionError> {
        (self.supertypes)(type_id)
    }
}

impl<S, T> std::fmt::Debug for FnResolver<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnResolver").finish_non_exhaustive()
    }
}

/// Failure to load a type system into a [`TypeRegistry`].
#[cfg(feature = "loaders")]
#[derive(Debug, thiserror::Error)]
pub enum SchemaLoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid node id '{value}': {source}")]
    NodeId {
        value: String,
        #[source]
        source: crate::ua::ParseNodeIdError,
    },

    #[error("missing attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("invalid value '{value}' for '{attribute}'")]
    InvalidValue {
        attribute: &'static str,
        value: String,
    },

    #[error("unknown built-in type '{0}'")]
    UnknownBuiltin(String),
}

/// Parse a node id, resolving `aliases` first.
#[cfg(feature = "loaders")]
pub(crate) fn parse_node_id(
    value: &str,
    aliases: &std::collections::HashMap<String, UaNodeId>,
) -> Result<UaNodeId, SchemaLoadError> {
    if let Some(id) = aliases.get(value.trim()) {
        return Ok(id.clone());
    }
    value.parse().map_err(|source| SchemaLoadError::NodeId {
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ua::{BuiltinType, StructureDefinitionBuilder};

    fn point() -> Arc<StructureDefinition> {
        Arc::new(
            StructureDefinitionBuilder::new(UaNodeId::numeric(2, 1), "Point")
                .field("x", BuiltinType::Int32)
                .build(),
        )
    }

    fn via_trait<R: TypeResolver>(resolver: R, id: &UaNodeId) -> Result<Vec<UaNodeId>, ResolutionError> {
        resolver.resolve_supertypes(id)
    }

    #[test]
    fn test_fn_resolver() {
        let resolver = FnResolver::new(
            |id: &UaNodeId| {
                if id == &UaNodeId::numeric(2, 1) {
                    Ok(point())
                } else {
                    Err(ResolutionError::UnknownType(id.clone()))
                }
            },
            |_: &UaNodeId| Ok(vec![UaNodeId::numeric(0, 22)]),
        );
        assert_eq!(
            resolver.resolve_structure(&UaNodeId::numeric(2, 1)).unwrap().name,
            "Point"
        );
        assert_eq!(
            resolver.resolve_structure(&UaNodeId::numeric(2, 2)),
            Err(ResolutionError::UnknownType(UaNodeId::numeric(2, 2)))
        );
    }

    #[test]
    fn test_blanket_impls() {
        let mut registry = TypeRegistry::new();
        registry.register((*point()).clone());
        let id = UaNodeId::numeric(2, 1);
        let root = vec![UaNodeId::numeric(0, 22)];

        assert_eq!(via_trait(&registry, &id).unwrap(), root);
        let boxed: Box<dyn TypeResolver> = Box::new(registry.clone());
        assert_eq!(via_trait(boxed, &id).unwrap(), root);
        assert_eq!(via_trait(Arc::new(registry), &id).unwrap(), root);
    }

    #[cfg(feature = "loaders")]
    #[test]
    fn test_parse_node_id_alias() {
        let mut aliases = std::collections::HashMap::new();
        aliases.insert("Int32".to_string(), UaNodeId::numeric(0, 6));
        assert_eq!(parse_node_id("Int32", &aliases).unwrap(), UaNodeId::numeric(0, 6));
        assert_eq!(parse_node_id("ns=1;i=5", &aliases).unwrap(), UaNodeId::numeric(1, 5));
        assert!(matches!(
            parse_node_id("Int33", &aliases),
            Err(SchemaLoadError::NodeId { .. })
        ));
    }
}
