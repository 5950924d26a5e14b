//! Live table text filter
//!
//! A search box names its table by id. Every key release hides the rows
//! whose text does not contain the query; the first row is the header and
//! always stays visible.

use stockroom_dom::{DomResult, DomTree, EventType, NodeId};

use super::{data_value, select};
use crate::binder::{Behavior, Binding};
use crate::error::{BehaviorError, BehaviorResult};
use crate::host::Host;
use crate::listeners::Handler;
use crate::page::Page;

/// Rows left visible and hidden by a filter pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterOutcome {
    pub shown: usize,
    pub hidden: usize,
}

pub(crate) fn bind<H: Host>(page: &mut Page<H>) -> BehaviorResult<Binding> {
    let mut binding = Binding::new(Behavior::TableFilter);
    for input in select(page, &format!("[{}]", page.config.search_attribute))? {
        binding.push_element(input);
        binding.listen(&mut page.listeners, input, EventType::KeyUp, Handler::FilterTable);
    }
    Ok(binding)
}

pub(crate) fn on_keyup<H: Host>(page: &mut Page<H>, input: NodeId) -> BehaviorResult<()> {
    let table_id =
        data_value(page.tree(), input, &page.config.search_attribute).unwrap_or_default();
    let table = page
        .document
        .get_element_by_id(&table_id)
        .ok_or(BehaviorError::MissingTable { input, table_id })?;
    let query = page.tree().value(input);
    let outcome = filter_rows(page.document.tree_mut(), table, &query)?;
    tracing::trace!(
        "Filter {:?} on {}: {} shown, {} hidden",
        query,
        table,
        outcome.shown,
        outcome.hidden
    );
    Ok(())
}

/// Show the rows of `table` containing `query`, hide the rest
///
/// Matching is case-insensitive on the row's text content; the query is
/// trimmed and an empty query shows every row.
pub fn filter_rows(tree: &mut DomTree, table: NodeId, query: &str) -> DomResult<FilterOutcome> {
    let needle = query.trim().to_lowercase();
    let mut outcome = FilterOutcome::default();
    for row in tree.get_elements_by_tag_name(table, "tr").into_iter().skip(1) {
        let text = tree.text_content(row).to_lowercase();
        if text.contains(&needle) {
            tree.set_style_property(row, "display", "")?;
            outcome.shown += 1;
        } else {
            tree.set_style_property(row, "display", "none")?;
            outcome.hidden += 1;
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(tree: &mut DomTree, rows: &[&str]) -> (NodeId, Vec<NodeId>) {
        let root = tree.root();
        let table = tree.create_element("table");
        tree.append_child(root, table).unwrap();
        let mut out = Vec::new();
        for text in rows {
            let tr = tree.create_element("tr");
            let td = tree.create_element("td");
            let label = tree.create_text(text);
            tree.append_child(td, label).unwrap();
            tree.append_child(tr, td).unwrap();
            tree.append_child(table, tr).unwrap();
            out.push(tr);
        }
        (table, out)
    }

    #[test]
    fn test_filter_hides_non_matching() {
        let mut tree = DomTree::new();
        let (table, rows) = table(&mut tree, &["Name", "Blue Widget", "Red Gadget", "blue pen"]);

        let outcome = filter_rows(&mut tree, table, "  BLUE ").unwrap();
        assert_eq!(outcome, FilterOutcome { shown: 2, hidden: 1 });
        assert!(!tree.is_display_none(rows[0]));
        assert!(!tree.is_display_none(rows[1]));
        assert!(tree.is_display_none(rows[2]));
        assert!(!tree.is_display_none(rows[3]));
    }

    #[test]
    fn test_empty_query_shows_all() {
        let mut tree = DomTree::new();
        let (table, rows) = table(&mut tree, &["Name", "Blue Widget", "Red Gadget"]);
        filter_rows(&mut tree, table, "zzz").unwrap();
        assert!(tree.is_display_none(rows[1]));

        let outcome = filter_rows(&mut tree, table, "").unwrap();
        assert_eq!(outcome.hidden, 0);
        assert!(rows.iter().all(|&r| tree.style_property(r, "display").is_none()));
    }

    #[test]
    fn test_header_never_hidden() {
        let mut tree = DomTree::new();
        let (table, rows) = table(&mut tree, &["Name", "Widget"]);
        filter_rows(&mut tree, table, "no such product").unwrap();
        assert!(!tree.is_display_none(rows[0]));
    }
}
