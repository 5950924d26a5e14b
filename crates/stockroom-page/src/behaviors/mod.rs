//! Page behaviors
//!
//! One module per behavior. Each exposes a `bind` that matches its trigger
//! markers and a handler the dispatcher calls, plus the pure DOM
//! transformation the handler is built on.

pub mod alerts;
pub mod clamp;
pub mod collate;
pub mod confirm;
pub mod file_label;
pub mod print;
pub mod responsive;
pub mod sort;
pub mod table_filter;
pub mod tooltips;
pub mod validation;

use stockroom_dom::{DOMStringMap, DomTree, Event, NodeId};

use crate::error::BehaviorResult;
use crate::host::Host;
use crate::listeners::Handler;
use crate::page::Page;

/// Run a listener's handler for the event's current target
pub(crate) fn run<H: Host>(
    page: &mut Page<H>,
    handler: Handler,
    event: &mut Event,
) -> BehaviorResult<()> {
    let node = event.current_target;
    match handler {
        Handler::ShowTooltip => tooltips::show_tooltip(page, node),
        Handler::HideTooltip => tooltips::hide_tooltip(page, node),
        Handler::TogglePopover => tooltips::toggle_popover(page, node),
        Handler::ValidateForm => validation::on_submit(page, event),
        Handler::FilterTable => table_filter::on_keyup(page, node),
        Handler::Print => print::on_click(page, event),
        Handler::Confirm => confirm::on_click(page, event),
        Handler::UpdateFileLabel => file_label::on_change(page, node),
        Handler::ClampNumber => clamp::on_input(page, node),
        Handler::SortColumn => sort::on_click(page, node),
    }
}

/// Attached elements matching a selector, in document order
pub(crate) fn select<H: Host>(page: &Page<H>, selector: &str) -> BehaviorResult<Vec<NodeId>> {
    Ok(page.document.query_selector_all(selector)?)
}

/// Read a marker attribute, going through the element's dataset for `data-*`
/// names
pub(crate) fn data_value(tree: &DomTree, node: NodeId, attribute: &str) -> Option<String> {
    let element = tree.element(node)?;
    match DOMStringMap::key_for(attribute) {
        Some(key) => element.dataset().get(&key).map(str::to_string),
        None => element.get_attribute(attribute).map(str::to_string),
    }
}
