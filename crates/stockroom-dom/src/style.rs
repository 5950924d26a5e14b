//! Inline Style
//!
//! The `style` attribute as an ordered list of declarations, enough for
//! scripts that toggle `display` and similar single properties.

/// Parsed inline style declarations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `prop: value; prop: value` text, skipping malformed entries
    pub fn parse(css_text: &str) -> Self {
        let mut style = Self::new();
        for decl in css_text.split(';') {
            let Some((prop, value)) = decl.split_once(':') else {
                continue;
            };
            style.set_property(prop, value);
        }
        style
    }

    /// Get a property value
    pub fn get_property(&self, prop: &str) -> Option<&str> {
        let prop = prop.trim();
        self.declarations
            .iter()
            .find(|(p, _)| p.eq_ignore_ascii_case(prop))
            .map(|(_, v)| v.as_str())
    }

    /// Set a property; an empty value removes it, as `el.style.x = ''` does
    pub fn set_property(&mut self, prop: &str, value: &str) {
        let prop = prop.trim().to_ascii_lowercase();
        let value = value.trim();
        if prop.is_empty() {
            return;
        }
        if value.is_empty() {
            self.remove_property(&prop);
            return;
        }
        match self.declarations.iter_mut().find(|(p, _)| *p == prop) {
            Some((_, v)) => *v = value.to_string(),
            None => self.declarations.push((prop, value.to_string())),
        }
    }

    /// Remove a property, returning its old value
    pub fn remove_property(&mut self, prop: &str) -> Option<String> {
        let pos = self
            .declarations
            .iter()
            .position(|(p, _)| p.eq_ignore_ascii_case(prop.trim()))?;
        Some(self.declarations.remove(pos).1)
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Serialize back to attribute text
    pub fn css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(p, v)| format!("{p}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_serialize() {
        let style = InlineStyle::parse("display:none; color : red;;bogus");
        assert_eq!(style.get_property("display"), Some("none"));
        assert_eq!(style.get_property("COLOR"), Some("red"));
        assert_eq!(style.css_text(), "display: none; color: red;");
    }

    #[test]
    fn test_empty_value_removes() {
        let mut style = InlineStyle::parse("display: none");
        style.set_property("display", "");
        assert!(style.is_empty());
        assert_eq!(style.get_property("display"), None);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut style = InlineStyle::parse("display: none; width: 10px");
        style.set_property("display", "block");
        assert_eq!(style.css_text(), "display: block; width: 10px;");
    }
}
