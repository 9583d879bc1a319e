// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Caching resolver adapter.
//!
//! Wraps another [`TypeResolver`] and remembers every structure definition
//! and supertype chain it returned. Failures are never cached.
//!
//! # Thread Safety
//!
//! Both caches are `DashMap`s (sharded, no global lock), so one
//! `CachedResolver` can be shared by converters on several threads. The
//! inner resolver is called without holding a shard lock.

use super::TypeResolver;
use crate::error::ResolutionError;
use crate::ua::{BaseKind, StructureDefinition, UaNodeId};
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;

/// Thread-safe cache in front of another resolver.
#[derive(Debug)]
pub struct CachedResolver<R> {
    inner: R,
    structures: DashMap<UaNodeId, Arc<StructureDefinition>>,
    supertypes: DashMap<UaNodeId, Arc<[UaNodeId]>>,
}

impl<R: TypeResolver> CachedResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            structures: DashMap::new(),
            supertypes: DashMap::new(),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        self.structures.clear();
        self.supertypes.clear();
    }

    /// Number of cached structure definitions.
    pub fn cached_structures(&self) -> usize {
        self.structures.len()
    }

    /// Number of cached supertype chains.
    pub fn cached_supertypes(&self) -> usize {
        self.supertypes.len()
    }

    /// Warm the cache for `type_id`.
    ///
    /// Loads the supertype chain and, for structured types, the definitions
    /// of the type, of its non-root ancestors and (recursively) of every
    /// field type. Namespace-0 ids are skipped.
    pub fn preload(&self, type_id: &UaNodeId) -> Result<(), ResolutionError> {
        let mut visited = HashSet::new();
        self.preload_inner(type_id, &mut visited)
    }

    fn preload_inner(
        &self,
        type_id: &UaNodeId,
        visited: &mut HashSet<UaNodeId>,
    ) -> Result<(), ResolutionError> {
        if type_id.is_namespace_zero() || !visited.insert(type_id.clone()) {
            return Ok(());
        }

        let chain = self.resolve_supertypes(type_id)?;
        let base = chain
            .last()
            .and_then(BaseKind::of)
            .ok_or_else(|| ResolutionError::UnknownType(type_id.clone()))?;
        if !base.is_structured() {
            return Ok(());
        }

        let mut field_types = Vec::new();
        for id in std::iter::once(type_id).chain(chain.iter()) {
            if id.is_namespace_zero() {
                continue;
            }
            let definition = self.resolve_structure(id)?;
            field_types.extend(definition.fields.iter().map(|f| f.data_type_id.clone()));
        }
        for field_type in &field_types {
            self.preload_inner(field_type, visited)?;
        }
        Ok(())
    }
}

impl<R: TypeResolver> TypeResolver for CachedResolver<R> {
    fn resolve_structure(
        &self,
        type_id: &UaNodeId,
    ) -> Result<Arc<StructureDefinition>, ResolutionError> {
        if let Some(hit) = self.structures.get(type_id) {
            return Ok(Arc::clone(&hit));
        }
        log::debug!("[resolver-cache] loading structure definition of {}", type_id);
        let definition = self.inner.resolve_structure(type_id)?;
        self.structures
            .insert(type_id.clone(), Arc::clone(&definition));
        Ok(definition)
    }

    fn resolve_supertypes(&self, type_id: &UaNodeId) -> Result<Vec<UaNodeId>, ResolutionError> {
        if let Some(hit) = self.supertypes.get(type_id) {
            return Ok(hit.to_vec());
        }
        log::debug!("[resolver-cache] loading supertypes of {}", type_id);
        let chain = self.inner.resolve_supertypes(type_id)?;
        log::debug!(
            "[resolver-cache] {} has {} supertype(s)",
            type_id,
            chain.len()
        );
        self.supertypes
            .insert(type_id.clone(), Arc::from(chain.as_slice()));
        Ok(chain)
    }
}
