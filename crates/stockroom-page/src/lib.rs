//! Stockroom Page - inventory page behaviors
//!
//! Event wiring for the server-rendered inventory pages: tooltips and
//! popovers, alert auto-dismissal, form validation, live table search,
//! printing, confirmations, file input labels, numeric clamping, column
//! sorting and responsive table wrapping.
//!
//! ```ignore
//! let document = stockroom_html::parse(html)?;
//! let mut page = Page::new(document, ScriptedHost::accepting());
//! page.content_loaded();
//! page.click(delete_link);
//! ```

pub mod behaviors;
mod binder;
mod config;
mod error;
mod host;
mod listeners;
mod page;
mod timers;
mod widgets;

pub use behaviors::collate::compare_natural;
pub use behaviors::responsive::WrapOutcome;
pub use behaviors::sort::SortDirection;
pub use behaviors::table_filter::FilterOutcome;
pub use binder::{Behavior, Binding};
pub use config::{BinderConfig, ConfigError};
pub use error::{BehaviorError, BehaviorResult};
pub use host::{Host, ScriptedHost};
pub use listeners::{Handler, Listener, ListenerId, ListenerRegistry};
pub use page::Page;
pub use timers::{Timer, TimerId, TimerManager, TimerTask};
pub use widgets::{Alert, Popover, PopupState, Tooltip, WidgetRegistry};

pub use stockroom_dom::{Document, Event, EventType, FileEntry, NodeId};
