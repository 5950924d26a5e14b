//! Print trigger

use stockroom_dom::{Event, EventType};

use super::select;
use crate::binder::{Behavior, Binding};
use crate::error::BehaviorResult;
use crate::host::Host;
use crate::listeners::Handler;
use crate::page::Page;

pub(crate) fn bind<H: Host>(page: &mut Page<H>) -> BehaviorResult<Binding> {
    let mut binding = Binding::new(Behavior::PrintButtons);
    for button in select(page, &format!(".{}", page.config.print_class))? {
        binding.push_element(button);
        binding.listen(&mut page.listeners, button, EventType::Click, Handler::Print);
    }
    Ok(binding)
}

pub(crate) fn on_click<H: Host>(page: &mut Page<H>, event: &mut Event) -> BehaviorResult<()> {
    event.prevent_default();
    page.host.print();
    Ok(())
}
