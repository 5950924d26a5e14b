//! Page Behavior Binder
//!
//! Scans the document for trigger markers and attaches listeners. Each
//! behavior binds independently and hands back a [`Binding`] that can undo
//! exactly what it attached.

use stockroom_dom::{EventType, NodeId};

use crate::behaviors;
use crate::error::BehaviorResult;
use crate::host::Host;
use crate::listeners::{Handler, ListenerId, ListenerRegistry};
use crate::page::Page;
use crate::timers::TimerId;

/// Page behaviors, in binding order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Behavior {
    Tooltips,
    Popovers,
    AlertDismiss,
    FormValidation,
    TableFilter,
    PrintButtons,
    Confirmation,
    FileInputLabels,
    NumberClamp,
    TableSort,
    ResponsiveTables,
}

impl Behavior {
    pub const ALL: [Behavior; 11] = [
        Behavior::Tooltips,
        Behavior::Popovers,
        Behavior::AlertDismiss,
        Behavior::FormValidation,
        Behavior::TableFilter,
        Behavior::PrintButtons,
        Behavior::Confirmation,
        Behavior::FileInputLabels,
        Behavior::NumberClamp,
        Behavior::TableSort,
        Behavior::ResponsiveTables,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Behavior::Tooltips => "tooltips",
            Behavior::Popovers => "popovers",
            Behavior::AlertDismiss => "alert-dismiss",
            Behavior::FormValidation => "form-validation",
            Behavior::TableFilter => "table-filter",
            Behavior::PrintButtons => "print-buttons",
            Behavior::Confirmation => "confirmation",
            Behavior::FileInputLabels => "file-input-labels",
            Behavior::NumberClamp => "number-clamp",
            Behavior::TableSort => "table-sort",
            Behavior::ResponsiveTables => "responsive-tables",
        }
    }
}

impl std::fmt::Display for Behavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What one bind call attached
///
/// Elements already bound by an earlier call are listed in `elements` but
/// contribute no listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    behavior: Behavior,
    elements: Vec<NodeId>,
    listeners: Vec<ListenerId>,
    timer: Option<TimerId>,
}

impl Binding {
    pub(crate) fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            elements: Vec::new(),
            listeners: Vec::new(),
            timer: None,
        }
    }

    /// Register a listener and record it if it was new
    pub(crate) fn listen(
        &mut self,
        registry: &mut ListenerRegistry,
        node: NodeId,
        event_type: EventType,
        handler: Handler,
    ) {
        if let Some(id) = registry.add(node, event_type, handler) {
            self.listeners.push(id);
        }
    }

    pub(crate) fn push_element(&mut self, node: NodeId) {
        self.elements.push(node);
    }

    pub(crate) fn set_timer(&mut self, timer: TimerId) {
        self.timer = Some(timer);
    }

    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    /// Matched elements
    pub fn elements(&self) -> &[NodeId] {
        &self.elements
    }

    /// Listeners this binding created
    pub fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Nothing attached
    pub fn is_inert(&self) -> bool {
        self.listeners.is_empty() && self.timer.is_none()
    }
}

impl<H: Host> Page<H> {
    /// Bind one behavior
    pub fn bind(&mut self, behavior: Behavior) -> BehaviorResult<Binding> {
        let binding = match behavior {
            Behavior::Tooltips => behaviors::tooltips::bind_tooltips(self)?,
            Behavior::Popovers => behaviors::tooltips::bind_popovers(self)?,
            Behavior::AlertDismiss => behaviors::alerts::bind(self)?,
            Behavior::FormValidation => behaviors::validation::bind(self)?,
            Behavior::TableFilter => behaviors::table_filter::bind(self)?,
            Behavior::PrintButtons => behaviors::print::bind(self)?,
            Behavior::Confirmation => behaviors::confirm::bind(self)?,
            Behavior::FileInputLabels => behaviors::file_label::bind(self)?,
            Behavior::NumberClamp => behaviors::clamp::bind(self)?,
            Behavior::TableSort => behaviors::sort::bind(self)?,
            Behavior::ResponsiveTables => behaviors::responsive::bind(self)?,
        };
        tracing::debug!(
            "Bound {}: {} elements, {} new listeners",
            behavior,
            binding.elements.len(),
            binding.listeners.len()
        );
        self.bindings.push(binding.clone());
        Ok(binding)
    }

    /// Bind every behavior; a failure is logged and the rest still bind
    pub fn bind_all(&mut self) -> Vec<Binding> {
        let mut bindings = Vec::with_capacity(Behavior::ALL.len());
        for behavior in Behavior::ALL {
            match self.bind(behavior) {
                Ok(binding) => bindings.push(binding),
                Err(err) => tracing::warn!("Failed to bind {}: {}", behavior, err),
            }
        }
        bindings
    }

    /// Remove the listeners and timer a binding created
    ///
    /// Returns the number of listeners removed.
    pub fn dispose(&mut self, binding: &Binding) -> usize {
        let removed = binding
            .listeners
            .iter()
            .filter(|&&id| self.listeners.remove(id).is_some())
            .count();
        if let Some(timer) = binding.timer {
            if self.timers.clear(timer) {
                tracing::debug!("Cancelled {} for {}", timer, binding.behavior);
            }
        }
        self.bindings.retain(|b| b != binding);
        removed
    }

    /// Dispose every binding of a behavior
    pub fn unbind(&mut self, behavior: Behavior) -> usize {
        let bindings: Vec<Binding> = self
            .bindings
            .iter()
            .filter(|b| b.behavior == behavior)
            .cloned()
            .collect();
        bindings.iter().map(|b| self.dispose(b)).sum()
    }
}
