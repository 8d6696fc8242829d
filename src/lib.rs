//! Typed client for the Apple Reminders store.
//!
//! Wraps EventKit behind a plain data model: create, query, update, and
//! delete reminders and reminder lists without touching the framework's
//! object graph. On macOS [`RemindKit::connect`] opens the native store;
//! everywhere (including tests) the client runs against any
//! [`ReminderStore`] backend, such as the bundled [`MemoryStore`].
//!
//! ```no_run
//! # #[cfg(target_os = "macos")]
//! # fn main() -> remindkit::Result<()> {
//! use remindkit::{NewReminder, RemindKit};
//!
//! let kit = RemindKit::connect()?;
//! let created = kit.create_reminder(NewReminder::new("water the plants"))?;
//! println!("created {}", created.id);
//! # Ok(())
//! # }
//! # #[cfg(not(target_os = "macos"))]
//! # fn main() {}
//! ```

pub mod calendars;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod store;

pub use calendars::Calendars;
pub use client::RemindKit;
pub use error::{Error, Result};
pub use model::{Calendar, NewReminder, Priority, Reminder, ReminderPatch};
pub use query::ReminderQuery;
#[cfg(target_os = "macos")]
pub use store::EventKitStore;
pub use store::{MemoryStore, ReminderStore};
