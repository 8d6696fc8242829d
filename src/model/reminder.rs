use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::priority::Priority;

/// A to-do item as read from the native store.
///
/// `created` and `modified` are maintained by the store and never written
/// through this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub title: String,
    pub due: Option<DateTime<Local>>,
    pub notes: Option<String>,
    pub url: Option<String>,
    pub priority: Priority,
    pub completed: bool,
    pub flagged: bool,
    pub created: Option<DateTime<Local>>,
    pub modified: Option<DateTime<Local>>,
    pub calendar_id: String,
}

/// Draft for a reminder about to be created.
///
/// `calendar_id` picks the target list; when unset the reminder lands in
/// the default list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewReminder {
    pub title: String,
    pub due: Option<DateTime<Local>>,
    pub notes: Option<String>,
    pub url: Option<String>,
    pub priority: Priority,
    pub completed: bool,
    pub flagged: bool,
    pub calendar_id: Option<String>,
}

impl NewReminder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update applied to an existing reminder.
///
/// Only `Some` fields are written back; fields cannot be cleared back to
/// empty through a patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReminderPatch {
    pub title: Option<String>,
    pub due: Option<DateTime<Local>>,
    pub notes: Option<String>,
    pub url: Option<String>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
    pub flagged: Option<bool>,
}

impl ReminderPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn due(mut self, due: DateTime<Local>) -> Self {
        self.due = Some(due);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn flagged(mut self, flagged: bool) -> Self {
        self.flagged = Some(flagged);
        self
    }
}
