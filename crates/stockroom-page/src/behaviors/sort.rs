//! Click-to-sort table columns
//!
//! The header's `asc` class is the only sort state: absent means the next
//! click sorts ascending, present means descending. It flips after every
//! sort that completes.

use stockroom_dom::{DomTree, EventType, NodeId};

use super::collate::compare_natural;
use super::select;
use crate::binder::{Behavior, Binding};
use crate::error::{BehaviorError, BehaviorResult};
use crate::host::Host;
use crate::listeners::Handler;
use crate::page::Page;

/// Sort order applied by a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

pub(crate) fn bind<H: Host>(page: &mut Page<H>) -> BehaviorResult<Binding> {
    let mut binding = Binding::new(Behavior::TableSort);
    for header in select(page, &format!(".{}", page.config.sortable_class))? {
        binding.push_element(header);
        binding.listen(&mut page.listeners, header, EventType::Click, Handler::SortColumn);
    }
    Ok(binding)
}

pub(crate) fn on_click<H: Host>(page: &mut Page<H>, header: NodeId) -> BehaviorResult<()> {
    let direction = sort_by_header(
        page.document.tree_mut(),
        header,
        &page.config.sort_ascending_class,
    )?;
    tracing::debug!("Sorted column of {} {:?}", header, direction);
    Ok(())
}

/// Sort the table owning `header` on the header's column and flip the
/// header's ascending marker
pub fn sort_by_header(
    tree: &mut DomTree,
    header: NodeId,
    ascending_class: &str,
) -> BehaviorResult<SortDirection> {
    let table = tree
        .closest_tag(header, "table")
        .ok_or(BehaviorError::NotInTable(header))?;
    let column = tree
        .element_index(header)
        .ok_or(BehaviorError::NotInTable(header))?;
    let body = tree
        .get_elements_by_tag_name(table, "tbody")
        .into_iter()
        .next()
        .ok_or(BehaviorError::MissingBody(table))?;

    let direction = if tree.has_class(header, ascending_class) {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    sort_rows(tree, body, column, direction)?;
    tree.toggle_class(header, ascending_class)?;
    Ok(direction)
}

/// Reorder the rows of `body` by the trimmed text of cell `column`
///
/// Rows are re-appended in sorted order; equal keys keep their relative
/// order. If any row is too short the body is left as it was.
pub fn sort_rows(
    tree: &mut DomTree,
    body: NodeId,
    column: usize,
    direction: SortDirection,
) -> BehaviorResult<()> {
    let rows: Vec<NodeId> = tree
        .element_children(body)
        .into_iter()
        .filter(|&row| tree.element(row).is_some_and(|el| el.is("tr")))
        .collect();

    let mut keyed = Vec::with_capacity(rows.len());
    for row in rows {
        let cells = tree.element_children(row);
        let cell = cells.get(column).ok_or(BehaviorError::ColumnOutOfRange {
            row,
            index: column,
            cells: cells.len(),
        })?;
        keyed.push((tree.text_content(*cell).trim().to_string(), row));
    }

    keyed.sort_by(|(a, _), (b, _)| match direction {
        SortDirection::Ascending => compare_natural(a, b),
        SortDirection::Descending => compare_natural(b, a),
    });
    for (_, row) in keyed {
        tree.append_child(body, row)?;
    }
    Ok(())
}
