use serde::{Deserialize, Serialize};

/// A reminder list. Read-only from this crate's perspective, apart from
/// being the target container when a reminder is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub id: String,
    pub name: String,
    pub is_default: bool,
}
