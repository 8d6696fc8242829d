use chrono::{DateTime, Local};

use crate::model::{Priority, Reminder};

/// Filter set for [`crate::RemindKit::reminders`].
///
/// All supplied filters must hold for a reminder to match; unset filters
/// are ignored. Date bounds are inclusive, and a reminder without a due
/// date never matches a date-bounded query.
#[derive(Debug, Clone, Default)]
pub struct ReminderQuery {
    pub due_after: Option<DateTime<Local>>,
    pub due_before: Option<DateTime<Local>>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub calendar_id: Option<String>,
}

impl ReminderQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn due_after(mut self, after: DateTime<Local>) -> Self {
        self.due_after = Some(after);
        self
    }

    pub fn due_before(mut self, before: DateTime<Local>) -> Self {
        self.due_before = Some(before);
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn in_calendar(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_id = Some(calendar_id.into());
        self
    }

    pub fn matches(&self, reminder: &Reminder) -> bool {
        if let Some(after) = self.due_after {
            match reminder.due {
                Some(due) if due >= after => {}
                _ => return false,
            }
        }
        if let Some(before) = self.due_before {
            match reminder.due {
                Some(due) if due <= before => {}
                _ => return false,
            }
        }
        if let Some(completed) = self.completed {
            if reminder.completed != completed {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if reminder.priority != priority {
                return false;
            }
        }
        if let Some(ref calendar_id) = self.calendar_id {
            if reminder.calendar_id != *calendar_id {
                return false;
            }
        }
        true
    }
}

/// Case-insensitive substring match over title and notes.
pub(crate) fn matches_text(reminder: &Reminder, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    if reminder.title.to_lowercase().contains(&needle) {
        return true;
    }
    reminder
        .notes
        .as_deref()
        .is_some_and(|notes| notes.to_lowercase().contains(&needle))
}

/// Pick the incomplete reminder with the nearest strictly-future due date.
///
/// Completed, past-due, and undated reminders are skipped.
pub(crate) fn next_upcoming(
    reminders: Vec<Reminder>,
    now: DateTime<Local>,
) -> Option<Reminder> {
    reminders
        .into_iter()
        .filter(|r| !r.completed)
        .filter(|r| r.due.is_some_and(|due| due > now))
        .min_by_key(|r| r.due)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 1, hour, 0, 0).unwrap()
    }

    fn reminder(id: &str, due: Option<DateTime<Local>>) -> Reminder {
        Reminder {
            id: id.to_string(),
            title: format!("reminder {id}"),
            due,
            notes: None,
            url: None,
            priority: Priority::None,
            completed: false,
            flagged: false,
            created: None,
            modified: None,
            calendar_id: "cal-1".to_string(),
        }
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(ReminderQuery::new().matches(&reminder("a", None)));
        assert!(ReminderQuery::new().matches(&reminder("b", Some(at(9)))));
    }

    #[test]
    fn filters_and_combine() {
        let query = ReminderQuery::new()
            .due_after(at(8))
            .due_before(at(12))
            .completed(false)
            .priority(Priority::High)
            .in_calendar("cal-1");

        let mut r = reminder("a", Some(at(10)));
        r.priority = Priority::High;
        assert!(query.matches(&r));

        // each filter individually knocks the reminder out
        let mut wrong_priority = r.clone();
        wrong_priority.priority = Priority::Low;
        assert!(!query.matches(&wrong_priority));

        let mut wrong_calendar = r.clone();
        wrong_calendar.calendar_id = "cal-2".to_string();
        assert!(!query.matches(&wrong_calendar));

        let mut done = r.clone();
        done.completed = true;
        assert!(!query.matches(&done));

        let mut too_late = r.clone();
        too_late.due = Some(at(13));
        assert!(!query.matches(&too_late));
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let query = ReminderQuery::new().due_after(at(8)).due_before(at(12));
        assert!(query.matches(&reminder("a", Some(at(8)))));
        assert!(query.matches(&reminder("b", Some(at(12)))));
        assert!(!query.matches(&reminder("c", Some(at(7)))));
        assert!(!query.matches(&reminder("d", Some(at(13)))));
    }

    #[test]
    fn undated_never_matches_date_bounded_query() {
        assert!(!ReminderQuery::new().due_after(at(8)).matches(&reminder("a", None)));
        assert!(!ReminderQuery::new().due_before(at(8)).matches(&reminder("b", None)));
    }

    #[test]
    fn text_match_is_case_insensitive() {
        let mut r = reminder("a", None);
        r.title = "Buy Groceries".to_string();
        r.notes = Some("milk and Eggs".to_string());

        assert!(matches_text(&r, "groceries"));
        assert!(matches_text(&r, "GROCERIES"));
        assert!(matches_text(&r, "eggs"));
        assert!(!matches_text(&r, "bread"));
    }

    #[test]
    fn next_upcoming_picks_nearest_future_due() {
        let now = at(10);
        let soon = reminder("soon", Some(at(11)));
        let later = reminder("later", Some(at(15)));
        let past = reminder("past", Some(at(9)));
        let undated = reminder("undated", None);
        let mut done = reminder("done", Some(at(10) + chrono::Duration::minutes(30)));
        done.completed = true;

        let picked = next_upcoming(vec![later, past, done, undated, soon], now);
        assert_eq!(picked.map(|r| r.id), Some("soon".to_string()));
    }

    #[test]
    fn next_upcoming_none_when_nothing_qualifies() {
        let now = at(10);
        let past = reminder("past", Some(at(9)));
        let undated = reminder("undated", None);
        assert!(next_upcoming(vec![past, undated], now).is_none());
    }

    #[test]
    fn next_upcoming_excludes_exact_now() {
        let now = at(10);
        let due_now = reminder("now", Some(now));
        assert!(next_upcoming(vec![due_now], now).is_none());
    }
}
