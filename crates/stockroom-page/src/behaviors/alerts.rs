//! Alert auto-dismissal
//!
//! One timer per page. When it fires, every dismissible alert still in the
//! document is closed; alerts added afterwards are left alone.

use super::select;
use crate::binder::{Behavior, Binding};
use crate::error::BehaviorResult;
use crate::host::Host;
use crate::page::Page;
use crate::timers::TimerTask;

fn dismissible_selector(page_config: &crate::config::BinderConfig) -> String {
    format!(
        ".{}:not(.{})",
        page_config.alert_class, page_config.permanent_alert_class
    )
}

/// Arm the dismissal timer unless one is already pending
pub(crate) fn bind<H: Host>(page: &mut Page<H>) -> BehaviorResult<Binding> {
    let mut binding = Binding::new(Behavior::AlertDismiss);
    let alerts = select(page, &dismissible_selector(&page.config))?;
    for &alert in &alerts {
        binding.push_element(alert);
    }

    let armed = page
        .bindings
        .iter()
        .filter_map(Binding::timer)
        .any(|timer| page.timers.is_pending(timer));
    if armed {
        tracing::debug!("Alert dismissal already scheduled");
        return Ok(binding);
    }

    let delay = page.config.alert_dismiss_delay_ms;
    let timer = page.timers.set_timeout(TimerTask::DismissAlerts, delay);
    binding.set_timer(timer);
    tracing::debug!("Scheduled {} to dismiss {} alerts in {} ms", timer, alerts.len(), delay);
    Ok(binding)
}

/// Close every dismissible alert currently in the document
///
/// Returns the number of alerts closed.
pub fn dismiss_alerts<H: Host>(page: &mut Page<H>) -> BehaviorResult<usize> {
    let alerts = select(page, &dismissible_selector(&page.config))?;
    let tree = page.document.tree_mut();
    let mut closed = 0;
    for alert in alerts {
        if page.widgets.alert_for(alert).close(tree)? {
            closed += 1;
        }
    }
    Ok(closed)
}
