use serde::{Deserialize, Serialize};

/// Reminder urgency, as shown in the Reminders app.
///
/// The native store keeps priority as an integer 0-9. Writes use the
/// canonical values (0, 1, 5, 9); reads bucket whatever value the store
/// hands back, since synced reminders can carry any of the in-between
/// numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Priority {
    /// The integer written to the native store.
    pub fn to_raw(self) -> u8 {
        match self {
            Priority::None => 0,
            Priority::Low => 1,
            Priority::Medium => 5,
            Priority::High => 9,
        }
    }

    /// Bucket a raw store value: 0 none, 1-4 low, 5 medium, 6-9 high.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Priority::None,
            1..=4 => Priority::Low,
            5 => Priority::Medium,
            _ => Priority::High,
        }
    }
}
