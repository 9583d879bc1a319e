// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! IO data model: node ids, tagged values, node data and events.

mod node_data;
mod node_id;
mod scalar;
mod variant;

pub use node_data::{now_millis, Event, NodeData};
pub use node_id::{NodeId, NodeIdentifier};
pub use scalar::{Scalar, ScalarKind};
pub use variant::{Array, ArrayKind, Structure, Variant};
