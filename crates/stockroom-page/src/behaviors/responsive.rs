//! Responsive table wrapping

use stockroom_dom::{DomResult, DomTree, NodeId};

use super::select;
use crate::binder::{Behavior, Binding};
use crate::error::BehaviorResult;
use crate::host::Host;
use crate::page::Page;

/// Result of wrapping one table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapOutcome {
    /// A new wrapper was inserted
    Wrapped(NodeId),
    /// The parent already is a wrapper
    AlreadyWrapped(NodeId),
    /// The table has no parent
    Detached,
}

/// Wrap every responsive table; no listeners are attached
pub(crate) fn bind<H: Host>(page: &mut Page<H>) -> BehaviorResult<Binding> {
    let mut binding = Binding::new(Behavior::ResponsiveTables);
    let tables = select(page, &format!(".{}", page.config.responsive_class))?;
    let tree = page.document.tree_mut();
    for table in tables {
        match wrap_table(tree, table, &page.config.wrapper_class)? {
            WrapOutcome::Wrapped(_) => binding.push_element(table),
            WrapOutcome::AlreadyWrapped(_) => {}
            WrapOutcome::Detached => tracing::warn!("Responsive table {} has no parent", table),
        }
    }
    Ok(binding)
}

/// Move `table` into a new `div.<wrapper_class>` at its current position
pub fn wrap_table(tree: &mut DomTree, table: NodeId, wrapper_class: &str) -> DomResult<WrapOutcome> {
    let Some(parent) = tree.parent(table) else {
        return Ok(WrapOutcome::Detached);
    };
    if tree.has_class(parent, wrapper_class) {
        return Ok(WrapOutcome::AlreadyWrapped(parent));
    }

    let wrapper = tree.create_element("div");
    tree.add_class(wrapper, wrapper_class)?;
    tree.insert_before(parent, wrapper, Some(table))?;
    tree.append_child(wrapper, table)?;
    Ok(WrapOutcome::Wrapped(wrapper))
}
