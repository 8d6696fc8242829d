use tracing::warn;

use crate::config;
use crate::error::{Error, Result};
use crate::model::Calendar;
use crate::store::ReminderStore;

/// Calendar (reminder list) operations, reached through
/// [`crate::RemindKit::calendars`].
pub struct Calendars<'a, S: ReminderStore> {
    store: &'a S,
}

impl<'a, S: ReminderStore> Calendars<'a, S> {
    pub(crate) fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<Calendar>> {
        self.store.calendars()
    }

    /// First list whose name matches exactly (case-sensitive).
    pub fn get(&self, name: &str) -> Result<Calendar> {
        self.list()?
            .into_iter()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::CalendarNotFound(name.to_string()))
    }

    pub fn get_by_id(&self, id: &str) -> Result<Calendar> {
        self.list()?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::CalendarNotFound(id.to_string()))
    }

    /// The list new reminders land in when no target is given.
    ///
    /// A `default_calendar` name in the config file takes precedence over
    /// the store's own default.
    pub fn get_default(&self) -> Result<Calendar> {
        self.default_with_override(config::current().default_calendar.as_deref())
    }

    fn default_with_override(&self, override_name: Option<&str>) -> Result<Calendar> {
        if let Some(name) = override_name {
            match self.get(name) {
                Ok(calendar) => return Ok(calendar),
                Err(_) => {
                    warn!(name, "configured default list not found, using store default");
                }
            }
        }
        self.store
            .default_calendar()?
            .ok_or(Error::NoDefaultCalendar)
    }

    /// Case-insensitive substring match on list names.
    pub fn search(&self, query: &str) -> Result<Vec<Calendar>> {
        let needle = query.to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::store::MemoryStore;

    use super::*;

    #[test]
    fn get_is_case_sensitive_exact_match() {
        let store = MemoryStore::new();
        store.add_calendar("Work", false);

        let calendars = Calendars::new(&store);
        assert_eq!(calendars.get("Work").unwrap().name, "Work");
        assert!(matches!(
            calendars.get("work"),
            Err(Error::CalendarNotFound(_))
        ));
    }

    #[test]
    fn get_by_id_misses_on_unknown_id() {
        let store = MemoryStore::new();
        let work = store.add_calendar("Work", false);

        let calendars = Calendars::new(&store);
        assert_eq!(calendars.get_by_id(&work.id).unwrap().name, "Work");
        assert!(matches!(
            calendars.get_by_id("nope"),
            Err(Error::CalendarNotFound(_))
        ));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let store = MemoryStore::new();
        store.add_calendar("Work", false);
        store.add_calendar("Homework", false);
        store.add_calendar("Groceries", false);

        let calendars = Calendars::new(&store);
        let hits = calendars.search("work").unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn default_comes_from_store() {
        let store = MemoryStore::new();
        store.add_calendar("Work", false);
        let inbox = store.add_calendar("Inbox", true);

        let calendars = Calendars::new(&store);
        assert_eq!(calendars.default_with_override(None).unwrap().id, inbox.id);
    }

    #[test]
    fn default_override_by_name_wins() {
        let store = MemoryStore::new();
        let work = store.add_calendar("Work", false);
        store.add_calendar("Inbox", true);

        let calendars = Calendars::new(&store);
        let picked = calendars.default_with_override(Some("Work")).unwrap();
        assert_eq!(picked.id, work.id);
    }

    #[test]
    fn unknown_override_falls_back_to_store_default() {
        let store = MemoryStore::new();
        let inbox = store.add_calendar("Inbox", true);

        let calendars = Calendars::new(&store);
        let picked = calendars.default_with_override(Some("Missing")).unwrap();
        assert_eq!(picked.id, inbox.id);
    }

    #[test]
    fn no_default_anywhere_is_an_error() {
        let store = MemoryStore::new();
        store.add_calendar("Work", false);

        let calendars = Calendars::new(&store);
        assert!(matches!(
            calendars.default_with_override(None),
            Err(Error::NoDefaultCalendar)
        ));
    }
}
