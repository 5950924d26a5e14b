//! Page context
//!
//! A loaded inventory page: its document, host, listeners, timers and widget
//! controllers. Events are dispatched synchronously and run to completion.

use stockroom_dom::{Document, DomResult, DomTree, Event, EventType, FileEntry, NodeId};

use crate::behaviors;
use crate::binder::Binding;
use crate::config::BinderConfig;
use crate::host::Host;
use crate::listeners::ListenerRegistry;
use crate::timers::{TimerManager, TimerTask};
use crate::widgets::WidgetRegistry;

/// A loaded page with behaviors attached
#[derive(Debug)]
pub struct Page<H: Host> {
    pub(crate) document: Document,
    pub(crate) host: H,
    pub(crate) config: BinderConfig,
    pub(crate) listeners: ListenerRegistry,
    pub(crate) timers: TimerManager,
    pub(crate) widgets: WidgetRegistry,
    pub(crate) bindings: Vec<Binding>,
    loaded: bool,
}

impl<H: Host> Page<H> {
    /// Create a page with the default configuration
    pub fn new(document: Document, host: H) -> Self {
        Self::with_config(document, host, BinderConfig::default())
    }

    pub fn with_config(document: Document, host: H, config: BinderConfig) -> Self {
        Self {
            document,
            host,
            config,
            listeners: ListenerRegistry::new(),
            timers: TimerManager::new(),
            widgets: WidgetRegistry::new(),
            bindings: Vec::new(),
            loaded: false,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn tree(&self) -> &DomTree {
        self.document.tree()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &BinderConfig {
        &self.config
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn timers(&self) -> &TimerManager {
        &self.timers
    }

    pub fn widgets(&self) -> &WidgetRegistry {
        &self.widgets
    }

    /// Live bindings, in the order they were made
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Current virtual time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// Signal that the document content has loaded
    ///
    /// Binds every behavior the first time; later signals are ignored and
    /// return false.
    pub fn content_loaded(&mut self) -> bool {
        if self.loaded {
            tracing::debug!("Content-loaded signal repeated; behaviors already bound");
            return false;
        }
        self.loaded = true;
        let root = self.document.tree().root();
        self.dispatch(root, EventType::DOMContentLoaded);
        let bindings = self.bind_all();
        tracing::debug!(
            "Bound {} behaviors with {} listeners",
            bindings.len(),
            self.listeners.len()
        );
        true
    }

    /// Dispatch an event at `target`
    ///
    /// Listeners on the target run first, then (for bubbling events) those on
    /// each ancestor. A failing handler is logged and skipped.
    pub fn dispatch(&mut self, target: NodeId, event_type: EventType) -> Event {
        let mut event = Event::new(event_type, target);
        let path = self.propagation_path(target, event.bubbles);
        tracing::trace!("Dispatching {} at {} through {} nodes", event_type, target, path.len());

        for node in path {
            event.current_target = node;
            for listener in self.listeners.listeners_for(node, event_type) {
                // An earlier listener may have unbound this one
                if !self
                    .listeners
                    .is_bound(listener.node, listener.event_type, listener.handler)
                {
                    continue;
                }
                if let Err(err) = behaviors::run(self, listener.handler, &mut event) {
                    tracing::warn!(
                        "{:?} handler failed on {} for {}: {}",
                        listener.handler,
                        node,
                        event_type,
                        err
                    );
                }
            }
            if event.is_propagation_stopped() {
                break;
            }
        }
        event
    }

    fn propagation_path(&self, target: NodeId, bubbles: bool) -> Vec<NodeId> {
        let tree = self.document.tree();
        if tree.get(target).is_none() {
            return Vec::new();
        }
        let mut path = vec![target];
        if bubbles {
            let mut cur = tree.parent(target);
            while let Some(node) = cur {
                path.push(node);
                cur = tree.parent(node);
            }
        }
        path
    }

    /// Advance the virtual clock, firing every timer that falls due
    pub fn advance_time(&mut self, ms: u64) -> usize {
        let until = self.timers.now_ms().saturating_add(ms);
        let mut fired = 0;
        while let Some(timer) = self.timers.pop_due(until) {
            fired += 1;
            tracing::debug!("Firing {} ({:?}) at {} ms", timer.id, timer.task, timer.due_ms);
            match timer.task {
                TimerTask::DismissAlerts => match behaviors::alerts::dismiss_alerts(self) {
                    Ok(closed) => tracing::debug!("Dismissed {} alerts", closed),
                    Err(err) => tracing::warn!("Alert dismissal failed: {}", err),
                },
            }
        }
        self.timers.advance_clock(until);
        fired
    }

    // ---------------------------------------------------------------------
    // User interaction
    // ---------------------------------------------------------------------

    pub fn click(&mut self, node: NodeId) -> Event {
        self.dispatch(node, EventType::Click)
    }

    pub fn submit(&mut self, form: NodeId) -> Event {
        self.dispatch(form, EventType::Submit)
    }

    /// Replace a control's value the way typing does: `input` then `keyup`
    ///
    /// Returns the `keyup` event.
    pub fn type_text(&mut self, node: NodeId, text: &str) -> DomResult<Event> {
        self.document.tree_mut().set_value(node, text)?;
        self.dispatch(node, EventType::Input);
        Ok(self.dispatch(node, EventType::KeyUp))
    }

    /// Replace a file input's selection and fire `change`
    pub fn choose_files(&mut self, node: NodeId, files: Vec<FileEntry>) -> DomResult<Event> {
        self.document.tree_mut().set_files(node, files)?;
        Ok(self.dispatch(node, EventType::Change))
    }

    pub fn hover(&mut self, node: NodeId) -> Event {
        self.dispatch(node, EventType::MouseEnter)
    }

    pub fn unhover(&mut self, node: NodeId) -> Event {
        self.dispatch(node, EventType::MouseLeave)
    }

    pub fn focus(&mut self, node: NodeId) -> Event {
        self.dispatch(node, EventType::Focus)
    }

    pub fn blur(&mut self, node: NodeId) -> Event {
        self.dispatch(node, EventType::Blur)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ScriptedHost;

    fn page_with_button(class: &str) -> (Page<ScriptedHost>, NodeId, NodeId) {
        let mut document = Document::new("about:blank");
        let body = document.body();
        let tree = document.tree_mut();
        let form = tree.create_element("form");
        let button = tree.create_element("button");
        tree.set_attribute(button, "class", class).unwrap();
        tree.append_child(body, form).unwrap();
        tree.append_child(form, button).unwrap();
        (Page::new(document, ScriptedHost::default()), form, button)
    }

    #[test]
    fn test_content_loaded_binds_once() {
        let (mut page, _, _) = page_with_button("print-button");
        assert!(page.content_loaded());
        let count = page.listeners().len();
        assert_eq!(count, 1);
        assert!(!page.content_loaded());
        assert_eq!(page.listeners().len(), count);
    }

    #[test]
    fn test_click_bubbles_from_child() {
        let (mut page, _, button) = page_with_button("print-button");
        page.content_loaded();

        let text = page.document.tree_mut().create_text("Print");
        page.document.tree_mut().append_child(button, text).unwrap();

        let event = page.click(text);
        assert!(event.is_default_prevented());
        assert_eq!(event.target, text);
        assert_eq!(page.host().print_requests(), 1);
    }

    #[test]
    fn test_non_bubbling_event_stays_on_target() {
        let (mut page, form, button) = page_with_button("btn");
        page.listeners
            .add(form, EventType::Focus, crate::listeners::Handler::Print);
        page.focus(button);
        assert_eq!(page.host().print_requests(), 0);
        page.focus(form);
        assert_eq!(page.host().print_requests(), 1);
    }

    #[test]
    fn test_advance_time_moves_clock() {
        let (mut page, _, _) = page_with_button("btn");
        assert_eq!(page.advance_time(1500), 0);
        assert_eq!(page.now_ms(), 1500);
    }
}
