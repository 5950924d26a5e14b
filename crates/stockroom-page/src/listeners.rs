//! Event listener registry
//!
//! Listeners are plain data: a node, an event type and the handler to run.
//! A (node, event type, handler) triple is registered at most once.

use std::collections::{BTreeMap, HashSet};

use stockroom_dom::{EventType, NodeId};

/// Behavior handler attached to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    ShowTooltip,
    HideTooltip,
    TogglePopover,
    ValidateForm,
    FilterTable,
    Print,
    Confirm,
    UpdateFileLabel,
    ClampNumber,
    SortColumn,
}

/// Listener handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub id: ListenerId,
    pub node: NodeId,
    pub event_type: EventType,
    pub handler: Handler,
}

/// All listeners on a page, in registration order
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    listeners: BTreeMap<ListenerId, Listener>,
    bound: HashSet<(NodeId, EventType, Handler)>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; None when the triple is already bound
    pub fn add(
        &mut self,
        node: NodeId,
        event_type: EventType,
        handler: Handler,
    ) -> Option<ListenerId> {
        if !self.bound.insert((node, event_type, handler)) {
            return None;
        }
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.insert(
            id,
            Listener {
                id,
                node,
                event_type,
                handler,
            },
        );
        Some(id)
    }

    /// Remove a listener
    pub fn remove(&mut self, id: ListenerId) -> Option<Listener> {
        let listener = self.listeners.remove(&id)?;
        self.bound
            .remove(&(listener.node, listener.event_type, listener.handler));
        Some(listener)
    }

    /// Listeners for a node and event type, in registration order
    pub fn listeners_for(&self, node: NodeId, event_type: EventType) -> Vec<Listener> {
        self.listeners
            .values()
            .filter(|l| l.node == node && l.event_type == event_type)
            .copied()
            .collect()
    }

    pub fn is_bound(&self, node: NodeId, event_type: EventType, handler: Handler) -> bool {
        self.bound.contains(&(node, event_type, handler))
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
