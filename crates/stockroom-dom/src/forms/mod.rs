//! Form Controls Module
//!
//! Control values, file selections and native constraint validation over
//! the DOM tree.

mod input;
mod validation;

pub use input::{ControlState, FileEntry, InputType};
pub use validation::{ValidationConstraints, ValidityState};

use crate::{DomError, DomResult, DomTree, NodeId};

impl DomTree {
    /// Current value of a form control (the `value` property)
    pub fn value(&self, node: NodeId) -> String {
        let Some(el) = self.element(node) else {
            return String::new();
        };
        if let Some(dirty) = &el.control.dirty_value {
            return dirty.clone();
        }

        if el.is("textarea") {
            self.text_content(node)
        } else if el.is("select") {
            self.selected_option(node)
                .map(|option| self.option_value(option))
                .unwrap_or_default()
        } else if el.is("option") {
            self.option_value(node)
        } else if el.is("input") && el.get_attribute("value").is_none() {
            let input_type = InputType::parse(el.get_attribute("type").unwrap_or("text"));
            if input_type.is_checkable() { "on".to_string() } else { String::new() }
        } else {
            el.get_attribute("value").unwrap_or_default().to_string()
        }
    }

    /// Set the `value` property of a control
    pub fn set_value(&mut self, node: NodeId, value: &str) -> DomResult<()> {
        let el = self.element_mut(node).ok_or(DomError::InvalidNodeType(node))?;
        el.control.dirty_value = Some(value.to_string());
        Ok(())
    }

    /// Checkedness of a checkbox or radio button
    pub fn checked(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|el| {
            el.control
                .dirty_checked
                .unwrap_or_else(|| el.has_attribute("checked"))
        })
    }

    pub fn set_checked(&mut self, node: NodeId, checked: bool) -> DomResult<()> {
        let el = self.element_mut(node).ok_or(DomError::InvalidNodeType(node))?;
        el.control.dirty_checked = Some(checked);
        Ok(())
    }

    /// Replace the file selection of a file input
    pub fn set_files(&mut self, node: NodeId, files: Vec<FileEntry>) -> DomResult<()> {
        let el = self.element_mut(node).ok_or(DomError::InvalidNodeType(node))?;
        el.control.files = files;
        Ok(())
    }

    fn selected_option(&self, select: NodeId) -> Option<NodeId> {
        let options: Vec<NodeId> = self
            .descendants(select)
            .into_iter()
            .filter(|&id| self.element(id).is_some_and(|el| el.is("option")))
            .collect();
        options
            .iter()
            .copied()
            .find(|&id| self.element(id).is_some_and(|el| el.has_attribute("selected")))
            .or_else(|| options.first().copied())
    }

    fn option_value(&self, option: NodeId) -> String {
        match self.get_attribute(option, "value") {
            Some(value) => value.to_string(),
            None => self
                .text_content(option)
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Whether a node takes part in constraint validation
    pub fn will_validate(&self, node: NodeId) -> bool {
        let Some(el) = self.element(node) else {
            return false;
        };
        if el.has_attribute("disabled") {
            return false;
        }
        if el.is("input") {
            let input_type = InputType::parse(el.get_attribute("type").unwrap_or("text"));
            input_type.is_validatable() && !el.has_attribute("readonly")
        } else if el.is("textarea") {
            !el.has_attribute("readonly")
        } else {
            el.is("select")
        }
    }

    /// Validity of a single control
    pub fn validity(&self, node: NodeId) -> ValidityState {
        let Some(el) = self.element(node) else {
            return ValidityState::default();
        };
        if !self.will_validate(node) {
            return ValidityState::default();
        }

        let constraints = ValidationConstraints::from_element(el);
        if constraints.input_type.is_checkable() {
            constraints.validate_checked(self.checked(node))
        } else if constraints.input_type == InputType::File {
            ValidityState {
                value_missing: constraints.required && el.files().is_empty(),
                ..Default::default()
            }
        } else {
            constraints.validate_string(&self.value(node))
        }
    }

    /// `form.checkValidity()`: true when every control under `form` is valid
    pub fn check_validity(&self, form: NodeId) -> bool {
        let invalid: Vec<NodeId> = self
            .descendants(form)
            .into_iter()
            .filter(|&id| !self.validity(id).is_valid())
            .collect();

        if !invalid.is_empty() {
            tracing::trace!("Form {} has {} invalid controls", form, invalid.len());
        }
        invalid.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(tree: &mut DomTree) -> NodeId {
        let form = tree.create_element("form");
        tree.append_child(tree.root(), form).unwrap();
        form
    }

    fn control(tree: &mut DomTree, form: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = tree.create_element(tag);
        for (name, value) in attrs {
            tree.set_attribute(id, name, value).unwrap();
        }
        tree.append_child(form, id).unwrap();
        id
    }

    #[test]
    fn test_value_property_overrides_attribute() {
        let mut tree = DomTree::new();
        let form = form(&mut tree);
        let input = control(&mut tree, form, "input", &[("value", "5")]);
        assert_eq!(tree.value(input), "5");

        tree.set_value(input, "7").unwrap();
        assert_eq!(tree.value(input), "7");
        assert_eq!(tree.get_attribute(input, "value"), Some("5"));
    }

    #[test]
    fn test_select_and_textarea_values() {
        let mut tree = DomTree::new();
        let form = form(&mut tree);
        let select = control(&mut tree, form, "select", &[]);
        let textarea = control(&mut tree, form, "textarea", &[]);
        let first = control(&mut tree, select, "option", &[]);
        let second = control(&mut tree, select, "option", &[("selected", ""), ("value", "tools")]);
        let label = tree.create_text("  Hardware  ");
        tree.append_child(first, label).unwrap();
        let text = tree.create_text("Fragile, handle with care");
        tree.append_child(textarea, text).unwrap();

        assert_eq!(tree.value(select), "tools");
        tree.remove_attribute(second, "selected").unwrap();
        assert_eq!(tree.value(select), "Hardware");
        assert_eq!(tree.value(textarea), "Fragile, handle with care");
    }

    #[test]
    fn test_check_validity() {
        let mut tree = DomTree::new();
        let form = form(&mut tree);
        let sku = control(&mut tree, form, "input", &[("name", "sku"), ("required", "")]);
        let qty = control(&mut tree, form, "input", &[("type", "number"), ("min", "0")]);
        control(&mut tree, form, "input", &[("type", "hidden"), ("required", "")]);

        assert!(!tree.check_validity(form));
        tree.set_value(sku, "ABC-1").unwrap();
        assert!(tree.check_validity(form));

        tree.set_value(qty, "-3").unwrap();
        assert!(tree.validity(qty).range_underflow);
        assert!(!tree.check_validity(form));
    }

    #[test]
    fn test_disabled_controls_are_skipped() {
        let mut tree = DomTree::new();
        let form = form(&mut tree);
        control(&mut tree, form, "input", &[("required", ""), ("disabled", "")]);
        assert!(tree.check_validity(form));
    }

    #[test]
    fn test_required_file_and_checkbox() {
        let mut tree = DomTree::new();
        let form = form(&mut tree);
        let file = control(&mut tree, form, "input", &[("type", "file"), ("required", "")]);
        let agree = control(&mut tree, form, "input", &[("type", "checkbox"), ("required", "")]);
        assert!(tree.validity(file).value_missing);
        assert!(tree.validity(agree).value_missing);

        tree.set_files(file, vec![FileEntry::new("invoice.pdf")]).unwrap();
        tree.set_checked(agree, true).unwrap();
        assert!(tree.check_validity(form));
    }
}
