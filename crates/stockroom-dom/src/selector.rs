//! Selector Matching
//!
//! A compact subset of CSS selectors: compound selectors made of a type
//! selector, `#id`, `.class`, `[attr]`, `[attr=value]` and `:not(...)`,
//! combined into comma-separated lists. Combinators are rejected.

use crate::ElementData;

/// Selector parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("expected {expected} at offset {offset} in `{source_text}`")]
    Expected {
        expected: &'static str,
        offset: usize,
        source_text: String,
    },

    #[error("unsupported selector syntax `{found}` at offset {offset} in `{source_text}`")]
    Unsupported {
        found: char,
        offset: usize,
        source_text: String,
    },
}

/// HTML attributes whose values match without regard to ASCII case
const CASE_INSENSITIVE_ATTRS: &[&str] = &[
    "align", "autocomplete", "checked", "dir", "disabled", "enctype", "method", "multiple",
    "readonly", "rel", "required", "selected", "target", "type", "valign",
];

fn value_matches(name: &str, actual: &str, expected: &str) -> bool {
    if CASE_INSENSITIVE_ATTRS.contains(&name) {
        actual.eq_ignore_ascii_case(expected)
    } else {
        actual == expected
    }
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrSelector {
    Exists(String),
    Equals(String, String),
}

/// One compound selector (no combinators)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrSelector>,
    negations: Vec<Compound>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attrs.is_empty()
            && self.negations.is_empty()
    }

    fn matches(&self, el: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if !el.is(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.id() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| el.has_class(c)) {
            return false;
        }
        let attrs_match = self.attrs.iter().all(|attr| match attr {
            AttrSelector::Exists(name) => el.has_attribute(name),
            AttrSelector::Equals(name, value) => el
                .get_attribute(name)
                .is_some_and(|actual| value_matches(name, actual, value)),
        });
        attrs_match && !self.negations.iter().any(|n| n.matches(el))
    }
}

/// Parsed selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

impl Selector {
    /// Parse selector text
    pub fn parse(text: &str) -> Result<Self, SelectorError> {
        let mut cursor = Cursor { src: text, pos: 0 };
        let mut alternatives = Vec::new();

        cursor.skip_ws();
        if cursor.peek().is_none() {
            return Err(SelectorError::Empty);
        }

        loop {
            cursor.skip_ws();
            alternatives.push(cursor.compound()?);
            cursor.skip_ws();
            match cursor.peek() {
                None => break,
                Some(',') => {
                    cursor.bump();
                }
                Some(found) => return Err(cursor.unsupported(found)),
            }
        }

        Ok(Self { alternatives })
    }

    /// Check if an element matches any alternative
    pub fn matches(&self, el: &ElementData) -> bool {
        self.alternatives.iter().any(|c| c.matches(el))
    }
}

impl std::str::FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

impl Cursor<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expected(&self, expected: &'static str) -> SelectorError {
        SelectorError::Expected {
            expected,
            offset: self.pos,
            source_text: self.src.to_string(),
        }
    }

    fn unsupported(&self, found: char) -> SelectorError {
        SelectorError::Unsupported {
            found,
            offset: self.pos,
            source_text: self.src.to_string(),
        }
    }

    fn ident(&mut self) -> Option<String> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }
        (self.pos > start).then(|| self.src[start..self.pos].to_string())
    }

    fn expect(&mut self, c: char, expected: &'static str) -> Result<(), SelectorError> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.expected(expected))
        }
    }

    fn attr_value(&mut self) -> Result<String, SelectorError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let start = self.pos;
                while self.peek().is_some_and(|c| c != quote) {
                    self.bump();
                }
                let value = self.src[start..self.pos].to_string();
                self.expect(quote, "closing quote")?;
                Ok(value)
            }
            _ => self.ident().ok_or_else(|| self.expected("attribute value")),
        }
    }

    fn compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();

        let universal = self.eat('*');
        if !universal && self.peek().is_some_and(char::is_alphabetic) {
            compound.tag = self.ident().map(|t| t.to_ascii_lowercase());
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    compound.id = Some(self.ident().ok_or_else(|| self.expected("identifier after `#`"))?);
                }
                Some('.') => {
                    self.bump();
                    let class = self.ident().ok_or_else(|| self.expected("class name after `.`"))?;
                    compound.classes.push(class);
                }
                Some('[') => {
                    self.bump();
                    self.skip_ws();
                    let name = self
                        .ident()
                        .ok_or_else(|| self.expected("attribute name"))?
                        .to_ascii_lowercase();
                    self.skip_ws();
                    let attr = if self.eat('=') {
                        self.skip_ws();
                        AttrSelector::Equals(name, self.attr_value()?)
                    } else {
                        AttrSelector::Exists(name)
                    };
                    self.skip_ws();
                    self.expect(']', "`]`")?;
                    compound.attrs.push(attr);
                }
                Some(':') => {
                    self.bump();
                    let start = self.pos;
                    match self.ident() {
                        Some(name) if name.eq_ignore_ascii_case("not") => {}
                        _ => {
                            self.pos = start;
                            return Err(self.unsupported(':'));
                        }
                    }
                    self.expect('(', "`(` after `:not`")?;
                    self.skip_ws();
                    let inner = self.compound()?;
                    self.skip_ws();
                    self.expect(')', "`)`")?;
                    compound.negations.push(inner);
                }
                _ => break,
            }
        }

        if compound.is_empty() && !universal {
            return Err(self.expected("selector"));
        }
        Ok(compound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(tag: &str, attrs: &[(&str, &str)]) -> ElementData {
        let mut el = ElementData::new(tag);
        for (name, value) in attrs {
            el.set_attribute(name, value);
        }
        el
    }

    #[test]
    fn test_class_and_not() {
        let sel = Selector::parse(".alert:not(.alert-permanent)").unwrap();
        assert!(sel.matches(&element("div", &[("class", "alert alert-success")])));
        assert!(!sel.matches(&element("div", &[("class", "alert alert-permanent")])));
        assert!(!sel.matches(&element("div", &[("class", "card")])));
    }

    #[test]
    fn test_attribute_selectors() {
        let sel = Selector::parse(r#"input[type="number"]"#).unwrap();
        assert!(sel.matches(&element("input", &[("type", "number")])));
        assert!(!sel.matches(&element("input", &[("type", "text")])));
        assert!(!sel.matches(&element("select", &[("type", "number")])));

        let sel = Selector::parse("[data-search-table]").unwrap();
        assert!(sel.matches(&element("input", &[("data-search-table", "products")])));

        let sel = Selector::parse("[data-bs-toggle='tooltip']").unwrap();
        assert!(sel.matches(&element("span", &[("data-bs-toggle", "tooltip")])));
        assert!(!sel.matches(&element("span", &[("data-bs-toggle", "popover")])));
    }

    #[test]
    fn test_enumerated_values_ignore_case() {
        let sel = Selector::parse(r#"input[type="number"]"#).unwrap();
        assert!(sel.matches(&element("input", &[("type", "Number")])));
        assert!(sel.matches(&element("input", &[("type", "NUMBER")])));

        let sel = Selector::parse("form[method=post]").unwrap();
        assert!(sel.matches(&element("form", &[("method", "POST")])));

        // Free-form values stay case-sensitive
        let sel = Selector::parse("[data-bs-toggle=tooltip]").unwrap();
        assert!(!sel.matches(&element("span", &[("data-bs-toggle", "Tooltip")])));
        let sel = Selector::parse("[name=qty]").unwrap();
        assert!(!sel.matches(&element("input", &[("name", "QTY")])));
    }

    #[test]
    fn test_selector_list_and_universal() {
        let sel = Selector::parse("input, select , textarea").unwrap();
        assert!(sel.matches(&element("select", &[])));
        assert!(!sel.matches(&element("button", &[])));

        let sel = Selector::parse("*").unwrap();
        assert!(sel.matches(&element("td", &[])));

        let sel = Selector::parse("#productTable").unwrap();
        assert!(sel.matches(&element("table", &[("id", "productTable")])));
    }

    #[test]
    fn test_rejects_unsupported_syntax() {
        assert_eq!(Selector::parse("  "), Err(SelectorError::Empty));
        assert!(matches!(
            Selector::parse("table tbody"),
            Err(SelectorError::Unsupported { found: 't', .. })
        ));
        assert!(matches!(
            Selector::parse("tr:first-child"),
            Err(SelectorError::Unsupported { found: ':', .. })
        ));
        assert!(matches!(Selector::parse("[type=\"number\""), Err(SelectorError::Expected { .. })));
        assert!(matches!(Selector::parse("."), Err(SelectorError::Expected { .. })));
    }
}
