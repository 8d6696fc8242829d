#[cfg(target_os = "macos")]
pub mod eventkit;
pub mod memory;

use crate::error::Result;
use crate::model::{Calendar, NewReminder, Reminder, ReminderPatch};

#[cfg(target_os = "macos")]
pub use eventkit::EventKitStore;
pub use memory::MemoryStore;

/// The native store handle, as seen by the client.
///
/// Lookup misses are `Option`/`bool` here; [`crate::RemindKit`] turns them
/// into the `NotFound` errors callers see.
pub trait ReminderStore {
    fn calendars(&self) -> Result<Vec<Calendar>>;

    fn default_calendar(&self) -> Result<Option<Calendar>>;

    /// All reminders, or only those in one list when `calendar_id` is set.
    fn reminders(&self, calendar_id: Option<&str>) -> Result<Vec<Reminder>>;

    fn reminder_by_id(&self, id: &str) -> Result<Option<Reminder>>;

    /// Create a reminder in the given list and return it with its
    /// store-assigned identifier.
    fn create_reminder(&self, calendar_id: &str, draft: &NewReminder) -> Result<Reminder>;

    /// Apply the supplied patch fields and return the post-update record,
    /// or `None` when the id is unknown.
    fn update_reminder(&self, id: &str, patch: &ReminderPatch) -> Result<Option<Reminder>>;

    /// Returns whether a reminder with the given id existed.
    fn delete_reminder(&self, id: &str) -> Result<bool>;
}
