//! File input label updater

use stockroom_dom::{DomError, DomTree, EventType, NodeId};

use super::select;
use crate::binder::{Behavior, Binding};
use crate::error::{BehaviorError, BehaviorResult};
use crate::host::Host;
use crate::listeners::Handler;
use crate::page::Page;

pub(crate) fn bind<H: Host>(page: &mut Page<H>) -> BehaviorResult<Binding> {
    let mut binding = Binding::new(Behavior::FileInputLabels);
    for input in select(page, &format!(".{}", page.config.file_input_class))? {
        binding.push_element(input);
        binding.listen(&mut page.listeners, input, EventType::Change, Handler::UpdateFileLabel);
    }
    Ok(binding)
}

pub(crate) fn on_change<H: Host>(page: &mut Page<H>, input: NodeId) -> BehaviorResult<()> {
    if let Some(name) = update_file_label(page.document.tree_mut(), input)? {
        tracing::trace!("File label for {} set to {:?}", input, name);
    }
    Ok(())
}

/// Write the first selected file's name into the input's next element
/// sibling
///
/// Returns the name written, or None when nothing is selected.
pub fn update_file_label(tree: &mut DomTree, input: NodeId) -> BehaviorResult<Option<String>> {
    let element = tree.element(input).ok_or(DomError::InvalidNodeType(input))?;
    let Some(file) = element.files().first() else {
        return Ok(None);
    };
    let name = file.name.clone();
    let label = tree
        .next_element_sibling(input)
        .ok_or(BehaviorError::MissingLabel(input))?;
    tree.set_text_content(label, &name)?;
    Ok(Some(name))
}
