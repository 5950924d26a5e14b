//! Numeric input clamp

use stockroom_dom::{EventType, NodeId};

use super::select;
use crate::binder::{Behavior, Binding};
use crate::error::BehaviorResult;
use crate::host::Host;
use crate::listeners::Handler;
use crate::page::Page;

const BOUNDED_NUMBER: &str = r#"input[type="number"][min], input[type="number"][max]"#;

pub(crate) fn bind<H: Host>(page: &mut Page<H>) -> BehaviorResult<Binding> {
    let mut binding = Binding::new(Behavior::NumberClamp);
    for input in select(page, BOUNDED_NUMBER)? {
        binding.push_element(input);
        binding.listen(&mut page.listeners, input, EventType::Input, Handler::ClampNumber);
    }
    Ok(binding)
}

pub(crate) fn on_input<H: Host>(page: &mut Page<H>, input: NodeId) -> BehaviorResult<()> {
    let tree = page.document.tree_mut();
    let value = tree.value(input);
    let clamped = clamp_value(
        &value,
        tree.get_attribute(input, "min"),
        tree.get_attribute(input, "max"),
    );
    if let Some(clamped) = clamped {
        tracing::trace!("Clamped {} from {:?} to {:?}", input, value, clamped);
        tree.set_value(input, &clamped)?;
    }
    Ok(())
}

fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// The value to write back when `value` falls outside `[min, max]`
///
/// Bounds are compared numerically. The bound is returned as written in the
/// markup. Empty or non-numeric values, and unparsable bounds, yield None.
pub fn clamp_value(value: &str, min: Option<&str>, max: Option<&str>) -> Option<String> {
    let current = parse_number(value)?;
    if let Some(min) = min {
        if parse_number(min).is_some_and(|bound| current < bound) {
            return Some(min.trim().to_string());
        }
    }
    if let Some(max) = max {
        if parse_number(max).is_some_and(|bound| current > bound) {
            return Some(max.trim().to_string());
        }
    }
    None
}
