#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("reminder with id `{0}` not found")]
    ReminderNotFound(String),
    #[error("reminder list `{0}` not found")]
    CalendarNotFound(String),
    #[error("no default reminder list")]
    NoDefaultCalendar,
    #[error("access to reminders denied")]
    AccessDenied,
    #[error("timed out waiting for the reminders store")]
    Timeout,
    #[error("reminders store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, Error>;
