use chrono::Local;
use tracing::debug;

use crate::calendars::Calendars;
use crate::error::{Error, Result};
use crate::model::{NewReminder, Reminder, ReminderPatch};
use crate::query::{self, ReminderQuery};
use crate::store::ReminderStore;

type Callback = Box<dyn Fn(&Reminder)>;

/// Client over a reminders store.
///
/// Generic over the [`ReminderStore`] backend so the same surface runs
/// against EventKit on macOS and against [`crate::MemoryStore`] elsewhere.
pub struct RemindKit<S: ReminderStore> {
    store: S,
    on_created: Vec<Callback>,
    on_completed: Vec<Callback>,
}

impl<S: ReminderStore> RemindKit<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            on_created: Vec::new(),
            on_completed: Vec::new(),
        }
    }

    /// Calendar (reminder list) operations.
    pub fn calendars(&self) -> Calendars<'_, S> {
        Calendars::new(&self.store)
    }

    /// Create a reminder in the draft's target list, or in the default
    /// list when none is given.
    pub fn create_reminder(&self, draft: NewReminder) -> Result<Reminder> {
        let calendar = match draft.calendar_id {
            Some(ref id) => self.calendars().get_by_id(id)?,
            None => self.calendars().get_default()?,
        };

        let created = self.store.create_reminder(&calendar.id, &draft)?;
        debug!(id = %created.id, calendar = %calendar.name, "reminder created");

        for callback in &self.on_created {
            callback(&created);
        }

        Ok(created)
    }

    pub fn reminder_by_id(&self, id: &str) -> Result<Reminder> {
        self.store
            .reminder_by_id(id)?
            .ok_or_else(|| Error::ReminderNotFound(id.to_string()))
    }

    /// Apply a partial update and return the post-update record.
    pub fn update_reminder(&self, id: &str, patch: ReminderPatch) -> Result<Reminder> {
        let before = self.reminder_by_id(id)?;
        let updated = self
            .store
            .update_reminder(id, &patch)?
            .ok_or_else(|| Error::ReminderNotFound(id.to_string()))?;

        if !before.completed && updated.completed {
            debug!(id = %updated.id, "reminder completed");
            for callback in &self.on_completed {
                callback(&updated);
            }
        }

        Ok(updated)
    }

    pub fn delete_reminder(&self, id: &str) -> Result<()> {
        if !self.store.delete_reminder(id)? {
            return Err(Error::ReminderNotFound(id.to_string()));
        }
        debug!(id, "reminder deleted");
        Ok(())
    }

    /// Reminders matching all supplied filters.
    pub fn reminders(&self, query: &ReminderQuery) -> Result<Vec<Reminder>> {
        let calendar_id = match query.calendar_id {
            Some(ref id) => {
                self.calendars().get_by_id(id)?;
                Some(id.as_str())
            }
            None => None,
        };

        Ok(self
            .store
            .reminders(calendar_id)?
            .into_iter()
            .filter(|r| query.matches(r))
            .collect())
    }

    /// Reminders whose title or notes contain `text`, case-insensitively.
    pub fn search_reminders(&self, text: &str) -> Result<Vec<Reminder>> {
        Ok(self
            .store
            .reminders(None)?
            .into_iter()
            .filter(|r| query::matches_text(r, text))
            .collect())
    }

    /// The incomplete reminder with the nearest future due date, if any.
    pub fn next_upcoming(&self) -> Result<Option<Reminder>> {
        Ok(query::next_upcoming(
            self.store.reminders(None)?,
            Local::now(),
        ))
    }

    /// Register a callback run synchronously after each successful create.
    pub fn on_reminder_created(&mut self, callback: impl Fn(&Reminder) + 'static) {
        self.on_created.push(Box::new(callback));
    }

    /// Register a callback run synchronously when an update transitions a
    /// reminder from incomplete to completed.
    pub fn on_reminder_completed(&mut self, callback: impl Fn(&Reminder) + 'static) {
        self.on_completed.push(Box::new(callback));
    }
}

#[cfg(target_os = "macos")]
impl RemindKit<crate::store::EventKitStore> {
    /// Connect to the native Reminders store, requesting access if needed.
    pub fn connect() -> Result<Self> {
        Ok(Self::new(crate::store::EventKitStore::connect()?))
    }
}
