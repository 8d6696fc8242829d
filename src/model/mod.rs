pub mod calendar;
pub mod priority;
pub mod reminder;

pub use calendar::Calendar;
pub use priority::Priority;
pub use reminder::{NewReminder, Reminder, ReminderPatch};
