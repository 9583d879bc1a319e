// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Node data and events.
//!
//! An [`Event`] is either *referencing* (it borrows a caller-owned slice of
//! [`NodeData`] and cannot outlive it) or *attached* (it owns its node
//! data). Cloning always produces an attached event:
//!
//! ```rust
//! use uaio::io::{Event, NodeData, NodeId};
//!
//! let attached = {
//!     let storage = vec![NodeData::new(NodeId::numeric(2, 1), 7i32)];
//!     let borrowed = Event::referencing(0, &storage);
//!     assert!(!borrowed.is_attached());
//!     borrowed.into_attached()
//! };
//! assert!(attached.is_attached());
//! assert_eq!(attached.len(), 1);
//! ```

use super::{NodeId, Variant};
use std::borrow::Cow;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A node id paired with its (optional) current value.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub node_id: NodeId,
    pub value: Option<Variant>,
}

impl NodeData {
    pub fn new(node_id: NodeId, value: impl Into<Variant>) -> Self {
        Self {
            node_id,
            value: Some(value.into()),
        }
    }

    /// Node data without a value.
    pub fn empty(node_id: NodeId) -> Self {
        Self {
            node_id,
            value: None,
        }
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} = {}", self.node_id, value),
            None => write!(f, "{} = <empty>", self.node_id),
        }
    }
}

/// Timestamped batch of node data.
#[derive(Debug, PartialEq)]
pub struct Event<'a> {
    date_time: i64,
    values: Cow<'a, [NodeData]>,
}

impl<'a> Event<'a> {
    /// Event borrowing `values`; it cannot outlive them.
    pub fn referencing(date_time: i64, values: &'a [NodeData]) -> Self {
        Self {
            date_time,
            values: Cow::Borrowed(values),
        }
    }

    /// Event owning `values`.
    pub fn attached(date_time: i64, values: Vec<NodeData>) -> Event<'static> {
        Event {
            date_time,
            values: Cow::Owned(values),
        }
    }

    /// Timestamp in milliseconds since the Unix epoch.
    pub fn date_time(&self) -> i64 {
        self.date_time
    }

    pub fn values(&self) -> &[NodeData] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.values, Cow::Owned(_))
    }

    pub fn get(&self, node_id: &NodeId) -> Option<&NodeData> {
        self.values.iter().find(|d| &d.node_id == node_id)
    }

    /// Deep copy that owns its node data.
    pub fn to_attached(&self) -> Event<'static> {
        Event::attached(self.date_time, self.values.to_vec())
    }

    /// Take ownership of the node data, copying only if it is borrowed.
    pub fn into_attached(self) -> Event<'static> {
        Event::attached(self.date_time, self.values.into_owned())
    }
}

impl Event<'static> {
    /// Attached event stamped with the current wall-clock time.
    pub fn now(values: Vec<NodeData>) -> Self {
        Event::attached(now_millis(), values)
    }
}

impl Clone for Event<'_> {
    fn clone(&self) -> Self {
        Self {
            date_time: self.date_time,
            values: Cow::Owned(self.values.to_vec()),
        }
    }
}

impl fmt::Display for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{} [", self.date_time)?;
        for (i, data) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            fmt::Display::fmt(data, f)?;
        }
        f.write_str("]")
    }
}

/// Current time in milliseconds since the Unix epoch (0 if the clock is
/// before the epoch).
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<NodeData> {
        vec![
            NodeData::new(NodeId::numeric(2, 10), 1.5f64),
            NodeData::empty(NodeId::string(2, "Status")),
        ]
    }

    #[test]
    fn test_clone_of_referencing_is_attached() {
        let copy = {
            let storage = sample();
            let event = Event::referencing(1_700_000_000_000, &storage);
            assert!(!event.is_attached());
            let copy = event.clone();
            assert!(copy.is_attached());
            copy.into_attached()
        };
        // storage is gone; the copy still owns its data
        assert_eq!(copy.len(), 2);
        assert_eq!(copy.date_time(), 1_700_000_000_000);
        assert!(copy.get(&NodeId::string(2, "Status")).is_some_and(|d| !d.has_value()));
    }

    #[test]
    fn test_to_attached_copies() {
        let storage = sample();
        let event = Event::referencing(5, &storage);
        let owned: Event<'static> = event.to_attached();
        assert_eq!(owned, Event::attached(5, sample()));
        assert_eq!(owned.values(), event.values());
    }

    #[test]
    fn test_now_is_attached() {
        let event = Event::now(sample());
        assert!(event.is_attached());
        assert!(event.date_time() > 0);
    }

    #[test]
    fn test_display() {
        let event = Event::attached(3, sample());
        assert_eq!(event.to_string(), "@3 [2:10 = 1.5; 2:\"Status\" = <empty>]");
    }
}
