//! Confirmation gate
//!
//! The question text comes from the element's confirm attribute at click
//! time, so markup changes after binding are honored.

use stockroom_dom::{Event, EventType};

use super::{data_value, select};
use crate::binder::{Behavior, Binding};
use crate::error::BehaviorResult;
use crate::host::Host;
use crate::listeners::Handler;
use crate::page::Page;

pub(crate) fn bind<H: Host>(page: &mut Page<H>) -> BehaviorResult<Binding> {
    let mut binding = Binding::new(Behavior::Confirmation);
    for node in select(page, &format!("[{}]", page.config.confirm_attribute))? {
        binding.push_element(node);
        binding.listen(&mut page.listeners, node, EventType::Click, Handler::Confirm);
    }
    Ok(binding)
}

pub(crate) fn on_click<H: Host>(page: &mut Page<H>, event: &mut Event) -> BehaviorResult<()> {
    let node = event.current_target;
    let Some(message) = data_value(page.tree(), node, &page.config.confirm_attribute) else {
        tracing::trace!("Confirm attribute gone from {}; not asking", node);
        return Ok(());
    };
    if !page.host.ask(&message) {
        tracing::debug!("Declined {:?}", message);
        event.prevent_default();
    }
    Ok(())
}
