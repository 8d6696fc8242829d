use std::sync::mpsc;
use std::time::Duration;

use block2::RcBlock;
use chrono::{DateTime, Local, TimeZone};
use objc2::rc::Retained;
use objc2::runtime::Bool;
use objc2_event_kit::{
    EKAuthorizationStatus, EKCalendar, EKEntityType, EKEventStore, EKReminder,
};
use objc2_foundation::{
    NSArray, NSCalendar, NSCalendarUnit, NSDate, NSDateComponents, NSError, NSString, NSURL,
};
use tracing::{debug, warn};

use crate::config;
use crate::error::{Error, Result};
use crate::model::{Calendar, NewReminder, Priority, Reminder, ReminderPatch};

use super::ReminderStore;

/// Seconds between Unix epoch (1970-01-01) and NSDate reference date (2001-01-01)
const NSDATE_UNIX_OFFSET: f64 = 978307200.0;

/// Backend over `EKEventStore`.
///
/// All calls are synchronous; EventKit completion blocks are bridged to
/// blocking receives with the configured timeouts.
pub struct EventKitStore {
    store: Retained<EKEventStore>,
}

impl EventKitStore {
    /// Open the native store, requesting full access to reminders if it
    /// has not been granted yet.
    pub fn connect() -> Result<Self> {
        let store = unsafe { EKEventStore::new() };
        let this = Self { store };
        if !this.request_access()? {
            return Err(Error::AccessDenied);
        }
        Ok(this)
    }

    pub fn authorization_status() -> EKAuthorizationStatus {
        unsafe { EKEventStore::authorizationStatusForEntityType(EKEntityType::Reminder) }
    }

    fn request_access(&self) -> Result<bool> {
        let status = Self::authorization_status();

        match status {
            EKAuthorizationStatus::FullAccess => return Ok(true),
            EKAuthorizationStatus::Denied | EKAuthorizationStatus::Restricted => {
                return Ok(false);
            }
            _ => {}
        }

        let (tx, rx) = mpsc::channel();
        let block = RcBlock::new(move |granted: Bool, _error: *mut NSError| {
            let _ = tx.send(granted.as_bool());
        });

        unsafe {
            self.store
                .requestFullAccessToRemindersWithCompletion(&*block as *const _ as *mut _);
        }

        let timeout = Duration::from_secs(config::current().access_timeout_secs);
        let granted = rx.recv_timeout(timeout).map_err(|_| Error::Timeout)?;
        debug!(granted, "reminders access request answered");
        Ok(granted)
    }

    fn ek_calendar(&self, id: &str) -> Option<Retained<EKCalendar>> {
        unsafe { self.store.calendarWithIdentifier(&NSString::from_str(id)) }
    }

    fn ek_reminder(&self, id: &str) -> Option<Retained<EKReminder>> {
        let item = unsafe {
            self.store
                .calendarItemWithIdentifier(&NSString::from_str(id))
        }?;
        item.downcast::<EKReminder>().ok()
    }

    fn fetch_matching(&self, calendars: Option<&NSArray<EKCalendar>>) -> Result<Vec<Reminder>> {
        let predicate = unsafe { self.store.predicateForRemindersInCalendars(calendars) };

        let (tx, rx) = mpsc::channel();
        let block = RcBlock::new(move |ek_reminders: *mut NSArray<EKReminder>| {
            let mut reminders = Vec::new();
            if !ek_reminders.is_null() {
                let array = unsafe { &*ek_reminders };
                let count = array.len();
                for i in 0..count {
                    reminders.push(convert_reminder(&array.objectAtIndex(i)));
                }
            }
            let _ = tx.send(reminders);
        });

        let _fetch_request = unsafe {
            self.store
                .fetchRemindersMatchingPredicate_completion(&predicate, &*block as *const _ as *mut _)
        };

        let timeout = Duration::from_secs(config::current().fetch_timeout_secs);
        let reminders = rx.recv_timeout(timeout).map_err(|_| Error::Timeout)?;
        debug!(count = reminders.len(), "fetched reminders");
        Ok(reminders)
    }

    fn save(&self, reminder: &EKReminder) -> Result<()> {
        unsafe { self.store.saveReminder_commit_error(reminder, true) }
            .map_err(|err| Error::Store(err.localizedDescription().to_string()))
    }
}

impl ReminderStore for EventKitStore {
    fn calendars(&self) -> Result<Vec<Calendar>> {
        let default_id = unsafe {
            self.store
                .defaultCalendarForNewReminders()
                .map(|c| c.calendarIdentifier().to_string())
        };

        let ek_calendars = unsafe { self.store.calendarsForEntityType(EKEntityType::Reminder) };

        let mut calendars = Vec::new();
        let count = ek_calendars.len();

        for i in 0..count {
            let cal = ek_calendars.objectAtIndex(i);
            let id = unsafe { cal.calendarIdentifier().to_string() };
            let name = unsafe { cal.title().to_string() };
            let is_default = default_id.as_deref() == Some(id.as_str());

            calendars.push(Calendar {
                id,
                name,
                is_default,
            });
        }

        Ok(calendars)
    }

    fn default_calendar(&self) -> Result<Option<Calendar>> {
        let default = unsafe { self.store.defaultCalendarForNewReminders() };
        Ok(default.map(|cal| {
            let id = unsafe { cal.calendarIdentifier().to_string() };
            let name = unsafe { cal.title().to_string() };
            Calendar {
                id,
                name,
                is_default: true,
            }
        }))
    }

    fn reminders(&self, calendar_id: Option<&str>) -> Result<Vec<Reminder>> {
        match calendar_id {
            Some(id) => {
                let cal = self
                    .ek_calendar(id)
                    .ok_or_else(|| Error::CalendarNotFound(id.to_string()))?;
                let calendars = NSArray::from_retained_slice(&[cal]);
                self.fetch_matching(Some(&calendars))
            }
            None => self.fetch_matching(None),
        }
    }

    fn reminder_by_id(&self, id: &str) -> Result<Option<Reminder>> {
        Ok(self.ek_reminder(id).map(|r| convert_reminder(&r)))
    }

    fn create_reminder(&self, calendar_id: &str, draft: &NewReminder) -> Result<Reminder> {
        let cal = self
            .ek_calendar(calendar_id)
            .ok_or_else(|| Error::CalendarNotFound(calendar_id.to_string()))?;

        let reminder = unsafe { EKReminder::reminderWithEventStore(&self.store) };
        unsafe {
            reminder.setCalendar(Some(&cal));
            reminder.setTitle(Some(&NSString::from_str(&draft.title)));
            if let Some(due) = draft.due {
                reminder.setDueDateComponents(Some(&due_components(&due)));
            }
            if let Some(ref notes) = draft.notes {
                reminder.setNotes(Some(&NSString::from_str(notes)));
            }
            if let Some(ref url) = draft.url {
                reminder.setURL(NSURL::URLWithString(&NSString::from_str(url)).as_deref());
            }
            reminder.setPriority(draft.priority.to_raw() as usize);
            reminder.setCompleted(draft.completed);
        }
        if draft.flagged {
            // EventKit exposes no public accessor for the Reminders app flag
            warn!("flagged is not supported by the EventKit backend, ignoring");
        }

        self.save(&reminder)?;
        Ok(convert_reminder(&reminder))
    }

    fn update_reminder(&self, id: &str, patch: &ReminderPatch) -> Result<Option<Reminder>> {
        let Some(reminder) = self.ek_reminder(id) else {
            return Ok(None);
        };

        unsafe {
            if let Some(ref title) = patch.title {
                reminder.setTitle(Some(&NSString::from_str(title)));
            }
            if let Some(due) = patch.due {
                reminder.setDueDateComponents(Some(&due_components(&due)));
            }
            if let Some(ref notes) = patch.notes {
                reminder.setNotes(Some(&NSString::from_str(notes)));
            }
            if let Some(ref url) = patch.url {
                reminder.setURL(NSURL::URLWithString(&NSString::from_str(url)).as_deref());
            }
            if let Some(priority) = patch.priority {
                reminder.setPriority(priority.to_raw() as usize);
            }
            if let Some(completed) = patch.completed {
                reminder.setCompleted(completed);
            }
        }
        if patch.flagged.is_some() {
            warn!("flagged is not supported by the EventKit backend, ignoring");
        }

        self.save(&reminder)?;
        Ok(Some(convert_reminder(&reminder)))
    }

    fn delete_reminder(&self, id: &str) -> Result<bool> {
        let Some(reminder) = self.ek_reminder(id) else {
            return Ok(false);
        };

        unsafe { self.store.removeReminder_commit_error(&reminder, true) }
            .map_err(|err| Error::Store(err.localizedDescription().to_string()))?;
        Ok(true)
    }
}

fn convert_reminder(ek: &EKReminder) -> Reminder {
    let id = unsafe { ek.calendarItemIdentifier().to_string() };
    let title = unsafe { ek.title().to_string() };
    let due = unsafe {
        ek.dueDateComponents()
            .and_then(|c| c.date())
            .map(|d| nsdate_to_datetime(&d))
    };
    let notes = unsafe { ek.notes().map(|s| s.to_string()) };
    let url = unsafe {
        ek.URL()
            .and_then(|u| u.absoluteString())
            .map(|s| s.to_string())
    };
    let raw_priority = unsafe { ek.priority() };
    let completed = unsafe { ek.isCompleted() };
    let created = unsafe { ek.creationDate().map(|d| nsdate_to_datetime(&d)) };
    let modified = unsafe { ek.lastModifiedDate().map(|d| nsdate_to_datetime(&d)) };
    let calendar_id = unsafe {
        ek.calendar()
            .map(|c| c.calendarIdentifier().to_string())
            .unwrap_or_default()
    };

    Reminder {
        id,
        title,
        due,
        notes,
        url,
        priority: Priority::from_raw(raw_priority.min(9) as u8),
        completed,
        // not readable through public EventKit API
        flagged: false,
        created,
        modified,
        calendar_id,
    }
}

fn due_components(dt: &DateTime<Local>) -> Retained<NSDateComponents> {
    let units = NSCalendarUnit::Year
        | NSCalendarUnit::Month
        | NSCalendarUnit::Day
        | NSCalendarUnit::Hour
        | NSCalendarUnit::Minute
        | NSCalendarUnit::Second;
    let date = datetime_to_nsdate(dt);
    unsafe { NSCalendar::currentCalendar().components_fromDate(units, &date) }
}

fn datetime_to_nsdate(dt: &DateTime<Local>) -> Retained<NSDate> {
    let unix_ts = dt.timestamp() as f64;
    let nsdate_ts = unix_ts - NSDATE_UNIX_OFFSET;
    NSDate::dateWithTimeIntervalSinceReferenceDate(nsdate_ts)
}

fn nsdate_to_datetime(date: &NSDate) -> DateTime<Local> {
    let nsdate_ts = date.timeIntervalSinceReferenceDate();
    let unix_ts = (nsdate_ts + NSDATE_UNIX_OFFSET) as i64;
    Local
        .timestamp_opt(unix_ts, 0)
        .single()
        .unwrap_or_else(Local::now)
}
