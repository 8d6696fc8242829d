use std::cell::RefCell;

use chrono::Local;
use uuid::Uuid;

use crate::error::Result;
use crate::model::{Calendar, NewReminder, Reminder, ReminderPatch};

use super::ReminderStore;

/// In-memory stand-in for the native store.
///
/// Backs the test suite, and usable as a scratch backend on platforms
/// without EventKit. Identifiers are v4 UUIDs; created/modified
/// timestamps are maintained here the way the native store would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    calendars: RefCell<Vec<Calendar>>,
    reminders: RefCell<Vec<Reminder>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reminder list and return it.
    pub fn add_calendar(&self, name: impl Into<String>, is_default: bool) -> Calendar {
        let calendar = Calendar {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            is_default,
        };
        self.calendars.borrow_mut().push(calendar.clone());
        calendar
    }
}

impl ReminderStore for MemoryStore {
    fn calendars(&self) -> Result<Vec<Calendar>> {
        Ok(self.calendars.borrow().clone())
    }

    fn default_calendar(&self) -> Result<Option<Calendar>> {
        Ok(self
            .calendars
            .borrow()
            .iter()
            .find(|c| c.is_default)
            .cloned())
    }

    fn reminders(&self, calendar_id: Option<&str>) -> Result<Vec<Reminder>> {
        let reminders = self.reminders.borrow();
        Ok(match calendar_id {
            Some(id) => reminders
                .iter()
                .filter(|r| r.calendar_id == id)
                .cloned()
                .collect(),
            None => reminders.clone(),
        })
    }

    fn reminder_by_id(&self, id: &str) -> Result<Option<Reminder>> {
        Ok(self.reminders.borrow().iter().find(|r| r.id == id).cloned())
    }

    fn create_reminder(&self, calendar_id: &str, draft: &NewReminder) -> Result<Reminder> {
        let now = Local::now();
        let reminder = Reminder {
            id: Uuid::new_v4().to_string(),
            title: draft.title.clone(),
            due: draft.due,
            notes: draft.notes.clone(),
            url: draft.url.clone(),
            priority: draft.priority,
            completed: draft.completed,
            flagged: draft.flagged,
            created: Some(now),
            modified: Some(now),
            calendar_id: calendar_id.to_string(),
        };
        self.reminders.borrow_mut().push(reminder.clone());
        Ok(reminder)
    }

    fn update_reminder(&self, id: &str, patch: &ReminderPatch) -> Result<Option<Reminder>> {
        let mut reminders = self.reminders.borrow_mut();
        let Some(reminder) = reminders.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        if let Some(ref title) = patch.title {
            reminder.title = title.clone();
        }
        if let Some(due) = patch.due {
            reminder.due = Some(due);
        }
        if let Some(ref notes) = patch.notes {
            reminder.notes = Some(notes.clone());
        }
        if let Some(ref url) = patch.url {
            reminder.url = Some(url.clone());
        }
        if let Some(priority) = patch.priority {
            reminder.priority = priority;
        }
        if let Some(completed) = patch.completed {
            reminder.completed = completed;
        }
        if let Some(flagged) = patch.flagged {
            reminder.flagged = flagged;
        }
        reminder.modified = Some(Local::now());

        Ok(Some(reminder.clone()))
    }

    fn delete_reminder(&self, id: &str) -> Result<bool> {
        let mut reminders = self.reminders.borrow_mut();
        let before = reminders.len();
        reminders.retain(|r| r.id != id);
        Ok(reminders.len() != before)
    }
}
