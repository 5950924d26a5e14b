//! Form validation gate

use stockroom_dom::{Event, EventType};

use super::select;
use crate::binder::{Behavior, Binding};
use crate::error::BehaviorResult;
use crate::host::Host;
use crate::listeners::Handler;
use crate::page::Page;

pub(crate) fn bind<H: Host>(page: &mut Page<H>) -> BehaviorResult<Binding> {
    let mut binding = Binding::new(Behavior::FormValidation);
    for form in select(page, &format!(".{}", page.config.validation_class))? {
        binding.push_element(form);
        binding.listen(&mut page.listeners, form, EventType::Submit, Handler::ValidateForm);
    }
    Ok(binding)
}

/// Block submission of an invalid form and flag it as validated
///
/// The validated class goes on after every attempt, valid or not, so field
/// styling shows up on the next render.
pub(crate) fn on_submit<H: Host>(page: &mut Page<H>, event: &mut Event) -> BehaviorResult<()> {
    let form = event.current_target;
    let tree = page.document.tree_mut();
    if !tree.check_validity(form) {
        tracing::debug!("Blocked submit of invalid form {}", form);
        event.prevent_default();
        event.stop_propagation();
    }
    tree.add_class(form, &page.config.validated_class)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ScriptedHost;
    use stockroom_dom::{Document, NodeId};

    fn page() -> (Page<ScriptedHost>, NodeId, NodeId) {
        let mut document = Document::new("about:blank");
        let body = document.body();
        let tree = document.tree_mut();
        let form = tree.create_element("form");
        tree.set_attribute(form, "class", "needs-validation").unwrap();
        let name = tree.create_element("input");
        tree.set_attribute(name, "name", "name").unwrap();
        tree.set_attribute(name, "required", "").unwrap();
        tree.append_child(body, form).unwrap();
        tree.append_child(form, name).unwrap();
        let mut page = Page::new(document, ScriptedHost::default());
        page.bind(Behavior::FormValidation).unwrap();
        (page, form, name)
    }

    #[test]
    fn test_invalid_submit_blocked() {
        let (mut page, form, _) = page();
        let event = page.submit(form);
        assert!(event.is_default_prevented());
        assert!(event.is_propagation_stopped());
        assert!(page.tree().has_class(form, "was-validated"));
    }

    #[test]
    fn test_resubmit_reevaluates() {
        let (mut page, form, name) = page();
        assert!(page.submit(form).is_default_prevented());

        page.document_mut().tree_mut().set_value(name, "Widget A").unwrap();
        let event = page.submit(form);
        assert!(!event.is_default_prevented());
        assert!(page.tree().has_class(form, "was-validated"));
    }
}
