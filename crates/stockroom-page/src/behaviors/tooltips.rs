//! Tooltip and popover activation

use stockroom_dom::{EventType, NodeId};

use super::select;
use crate::binder::{Behavior, Binding};
use crate::error::BehaviorResult;
use crate::host::Host;
use crate::listeners::Handler;
use crate::page::Page;

const TOOLTIP_TRIGGER: &str = r#"[data-bs-toggle="tooltip"]"#;
const POPOVER_TRIGGER: &str = r#"[data-bs-toggle="popover"]"#;

/// Create a tooltip controller for every trigger and wire show/hide
pub(crate) fn bind_tooltips<H: Host>(page: &mut Page<H>) -> BehaviorResult<Binding> {
    let mut binding = Binding::new(Behavior::Tooltips);
    for node in select(page, TOOLTIP_TRIGGER)? {
        page.widgets.tooltip_for(page.document.tree_mut(), node)?;
        binding.push_element(node);
        for (event_type, handler) in [
            (EventType::MouseEnter, Handler::ShowTooltip),
            (EventType::Focus, Handler::ShowTooltip),
            (EventType::MouseLeave, Handler::HideTooltip),
            (EventType::Blur, Handler::HideTooltip),
        ] {
            binding.listen(&mut page.listeners, node, event_type, handler);
        }
    }
    Ok(binding)
}

/// Create a popover controller for every trigger and wire click-to-toggle
pub(crate) fn bind_popovers<H: Host>(page: &mut Page<H>) -> BehaviorResult<Binding> {
    let mut binding = Binding::new(Behavior::Popovers);
    for node in select(page, POPOVER_TRIGGER)? {
        page.widgets.popover_for(page.document.tree(), node);
        binding.push_element(node);
        binding.listen(&mut page.listeners, node, EventType::Click, Handler::TogglePopover);
    }
    Ok(binding)
}

pub(crate) fn show_tooltip<H: Host>(page: &mut Page<H>, node: NodeId) -> BehaviorResult<()> {
    let tree = page.document.tree_mut();
    page.widgets.tooltip_for(tree, node)?.show(tree)?;
    Ok(())
}

pub(crate) fn hide_tooltip<H: Host>(page: &mut Page<H>, node: NodeId) -> BehaviorResult<()> {
    let tree = page.document.tree_mut();
    page.widgets.tooltip_for(tree, node)?.hide(tree)?;
    Ok(())
}

pub(crate) fn toggle_popover<H: Host>(page: &mut Page<H>, node: NodeId) -> BehaviorResult<()> {
    let tree = page.document.tree_mut();
    let shown = page.widgets.popover_for(tree, node).toggle(tree)?;
    tracing::trace!("Popover on {} {}", node, if shown { "shown" } else { "hidden" });
    Ok(())
}
