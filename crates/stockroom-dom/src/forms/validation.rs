//! Form Validation
//!
//! Constraint Validation API implementation.

use std::sync::LazyLock;

use regex::Regex;

use super::InputType;
use crate::ElementData;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)*$").expect("email regex is valid")
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:\S+$").expect("url regex is valid")
});

/// Validity state for form controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidityState {
    /// The element's value is missing (for required)
    pub value_missing: bool,
    /// The element's value doesn't match the type
    pub type_mismatch: bool,
    /// The element's value doesn't match the pattern
    pub pattern_mismatch: bool,
    /// The element's value is too long
    pub too_long: bool,
    /// The element's value is too short
    pub too_short: bool,
    /// The element's value is below the minimum
    pub range_underflow: bool,
    /// The element's value is above the maximum
    pub range_overflow: bool,
    /// The element's value doesn't match step
    pub step_mismatch: bool,
    /// The element has a bad input format
    pub bad_input: bool,
}

impl ValidityState {
    /// Check if the element is valid
    pub fn is_valid(&self) -> bool {
        !self.value_missing
            && !self.type_mismatch
            && !self.pattern_mismatch
            && !self.too_long
            && !self.too_short
            && !self.range_underflow
            && !self.range_overflow
            && !self.step_mismatch
            && !self.bad_input
    }

    /// Browser-style message for the first failing constraint
    pub fn validation_message(&self) -> &'static str {
        if self.value_missing {
            "Please fill out this field."
        } else if self.type_mismatch || self.bad_input || self.step_mismatch {
            "Please enter a valid value."
        } else if self.pattern_mismatch {
            "Please match the requested format."
        } else if self.too_long {
            "Please shorten this text."
        } else if self.too_short {
            "Please lengthen this text."
        } else if self.range_underflow {
            "Value must be greater."
        } else if self.range_overflow {
            "Value must be less."
        } else {
            ""
        }
    }
}

/// Validation constraints declared on a control
#[derive(Debug, Clone, Default)]
pub struct ValidationConstraints {
    pub input_type: InputType,
    pub required: bool,
    pub pattern: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// None means `step="any"`
    pub step: Option<f64>,
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

impl ValidationConstraints {
    /// Read constraints from element attributes
    pub fn from_element(el: &ElementData) -> Self {
        let input_type = if el.is("input") {
            InputType::parse(el.get_attribute("type").unwrap_or("text"))
        } else {
            InputType::Text
        };

        let step = match el.get_attribute("step").map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("any") => None,
            Some(s) => parse_number(s).filter(|n| *n > 0.0).or(Some(1.0)),
            None => Some(1.0),
        };

        Self {
            input_type,
            required: el.has_attribute("required"),
            pattern: el.get_attribute("pattern").map(str::to_string),
            min: el.get_attribute("min").and_then(parse_number),
            max: el.get_attribute("max").and_then(parse_number),
            min_length: el.get_attribute("minlength").and_then(|s| s.trim().parse().ok()),
            max_length: el.get_attribute("maxlength").and_then(|s| s.trim().parse().ok()),
            step,
        }
    }

    /// Validate a checkbox or radio button
    pub fn validate_checked(&self, checked: bool) -> ValidityState {
        ValidityState {
            value_missing: self.required && !checked,
            ..Default::default()
        }
    }

    /// Validate a string value
    pub fn validate_string(&self, value: &str) -> ValidityState {
        let mut state = ValidityState::default();

        if self.required && value.is_empty() {
            state.value_missing = true;
        }
        if value.is_empty() {
            return state;
        }

        if self.input_type.supports_length() {
            let len = value.chars().count();
            if self.max_length.is_some_and(|max| len > max) {
                state.too_long = true;
            }
            if self.min_length.is_some_and(|min| len < min) {
                state.too_short = true;
            }
        }

        match self.input_type {
            InputType::Email if !EMAIL_RE.is_match(value) => state.type_mismatch = true,
            InputType::Url if !URL_RE.is_match(value) => state.type_mismatch = true,
            _ => {}
        }

        if self.input_type.supports_pattern() {
            if let Some(pattern) = &self.pattern {
                match Regex::new(&format!("^(?:{pattern})$")) {
                    Ok(re) => state.pattern_mismatch = !re.is_match(value),
                    Err(err) => tracing::warn!("Ignoring invalid pattern `{}`: {}", pattern, err),
                }
            }
        }

        if self.input_type == InputType::Number {
            match parse_number(value) {
                Some(n) => {
                    let numeric = self.validate_number(n);
                    state.range_underflow = numeric.range_underflow;
                    state.range_overflow = numeric.range_overflow;
                    state.step_mismatch = numeric.step_mismatch;
                }
                None => state.bad_input = true,
            }
        }

        state
    }

    /// Validate a numeric value
    pub fn validate_number(&self, value: f64) -> ValidityState {
        let mut state = ValidityState::default();

        if let Some(min) = self.min {
            if value < min {
                state.range_underflow = true;
            }
        }

        if let Some(max) = self.max {
            if value > max {
                state.range_overflow = true;
            }
        }

        if let Some(step) = self.step {
            let base = self.min.unwrap_or(0.0);
            let steps = (value - base) / step;
            if (steps - steps.round()).abs() > 1e-9 {
                state.step_mismatch = true;
            }
        }

        state
    }
}
