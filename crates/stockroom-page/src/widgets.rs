//! Widget controllers
//!
//! Tooltip, popover and alert controllers. One controller per element,
//! created on first use and owned by the page for its lifetime.

use std::collections::BTreeMap;

use stockroom_dom::{DOMStringMap, DomResult, DomTree, NodeId};

/// Popup widget state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupState {
    #[default]
    Hidden,
    Shown,
}

fn dataset(tree: &DomTree, node: NodeId) -> DOMStringMap {
    tree.element(node).map(|el| el.dataset()).unwrap_or_default()
}

/// Drop `aria-describedby` only while it still names `owner`
fn release_description(tree: &mut DomTree, node: NodeId, owner: &str) -> DomResult<()> {
    if tree.get_attribute(node, "aria-describedby") == Some(owner) {
        tree.remove_attribute(node, "aria-describedby")?;
    }
    Ok(())
}

/// Tooltip controller
#[derive(Debug, Clone)]
pub struct Tooltip {
    pub id: u64,
    pub node: NodeId,
    pub title: String,
    pub state: PopupState,
}

impl Tooltip {
    /// Build a controller from the trigger's markup
    ///
    /// A native `title` moves to `data-bs-original-title` so the browser
    /// tooltip does not show on top of ours.
    fn attach(tree: &mut DomTree, id: u64, node: NodeId) -> DomResult<Self> {
        let title = match dataset(tree, node).get("bsTitle") {
            Some(title) => title.to_string(),
            None => {
                let title = tree.remove_attribute(node, "title")?.unwrap_or_default();
                if !title.is_empty() {
                    tree.set_attribute(node, "data-bs-original-title", &title)?;
                }
                title
            }
        };
        Ok(Self {
            id,
            node,
            title,
            state: PopupState::Hidden,
        })
    }

    pub fn element_id(&self) -> String {
        format!("tooltip-{}", self.id)
    }

    pub fn is_shown(&self) -> bool {
        self.state == PopupState::Shown
    }

    /// Show; returns false when already shown
    pub fn show(&mut self, tree: &mut DomTree) -> DomResult<bool> {
        if self.is_shown() {
            return Ok(false);
        }
        tree.set_attribute(self.node, "aria-describedby", &self.element_id())?;
        self.state = PopupState::Shown;
        Ok(true)
    }

    /// Hide; returns false when already hidden
    pub fn hide(&mut self, tree: &mut DomTree) -> DomResult<bool> {
        if !self.is_shown() {
            return Ok(false);
        }
        release_description(tree, self.node, &self.element_id())?;
        self.state = PopupState::Hidden;
        Ok(true)
    }
}

/// Popover controller
#[derive(Debug, Clone)]
pub struct Popover {
    pub id: u64,
    pub node: NodeId,
    pub title: String,
    pub content: String,
    pub state: PopupState,
}

impl Popover {
    fn attach(tree: &DomTree, id: u64, node: NodeId) -> Self {
        let data = dataset(tree, node);
        let title = data
            .get("bsTitle")
            .or_else(|| tree.get_attribute(node, "title"))
            .unwrap_or_default()
            .to_string();
        let content = data.get("bsContent").unwrap_or_default().to_string();
        Self {
            id,
            node,
            title,
            content,
            state: PopupState::Hidden,
        }
    }

    pub fn element_id(&self) -> String {
        format!("popover-{}", self.id)
    }

    pub fn is_shown(&self) -> bool {
        self.state == PopupState::Shown
    }

    /// Flip between shown and hidden; returns the new visibility
    pub fn toggle(&mut self, tree: &mut DomTree) -> DomResult<bool> {
        match self.state {
            PopupState::Hidden => {
                tree.set_attribute(self.node, "aria-describedby", &self.element_id())?;
                self.state = PopupState::Shown;
            }
            PopupState::Shown => {
                release_description(tree, self.node, &self.element_id())?;
                self.state = PopupState::Hidden;
            }
        }
        Ok(self.is_shown())
    }
}

/// Alert dismissal controller
#[derive(Debug, Clone)]
pub struct Alert {
    pub node: NodeId,
    pub closed: bool,
}

impl Alert {
    /// Close the alert: drop `show` and remove it from the document
    ///
    /// Returns false when the alert is already closed or was removed by
    /// someone else.
    pub fn close(&mut self, tree: &mut DomTree) -> DomResult<bool> {
        if self.closed || tree.parent(self.node).is_none() {
            self.closed = true;
            return Ok(false);
        }
        tree.remove_class(self.node, "show")?;
        tree.detach(self.node);
        self.closed = true;
        Ok(true)
    }
}

/// Per-page controller store
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    tooltips: BTreeMap<NodeId, Tooltip>,
    popovers: BTreeMap<NodeId, Popover>,
    alerts: BTreeMap<NodeId, Alert>,
    next_id: u64,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the tooltip controller for a node
    pub fn tooltip_for(&mut self, tree: &mut DomTree, node: NodeId) -> DomResult<&mut Tooltip> {
        if !self.tooltips.contains_key(&node) {
            let tooltip = Tooltip::attach(tree, self.next_id, node)?;
            self.next_id += 1;
            self.tooltips.insert(node, tooltip);
        }
        self.tooltips
            .get_mut(&node)
            .ok_or(stockroom_dom::DomError::NotFound(node))
    }

    /// Get or create the popover controller for a node
    pub fn popover_for(&mut self, tree: &DomTree, node: NodeId) -> &mut Popover {
        let next_id = &mut self.next_id;
        self.popovers.entry(node).or_insert_with(|| {
            let popover = Popover::attach(tree, *next_id, node);
            *next_id += 1;
            popover
        })
    }

    /// Get or create the dismissal controller for an alert
    pub fn alert_for(&mut self, node: NodeId) -> &mut Alert {
        self.alerts.entry(node).or_insert(Alert {
            node,
            closed: false,
        })
    }

    pub fn tooltip(&self, node: NodeId) -> Option<&Tooltip> {
        self.tooltips.get(&node)
    }

    pub fn popover(&self, node: NodeId) -> Option<&Popover> {
        self.popovers.get(&node)
    }

    pub fn tooltip_count(&self) -> usize {
        self.tooltips.len()
    }

    pub fn popover_count(&self) -> usize {
        self.popovers.len()
    }
}
