// src/db/data.rs

/// One buried-point record.
///
/// `id` is assigned by the store on insert and is the only field `remove`
/// looks at. Callers building a fresh record leave it at
/// [`Data::UNASSIGNED_ID`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Data {
    pub id: i64,
    pub priority: i32,
    pub timestamp: u64,
    pub content: String,
}

impl Data {
    pub const UNASSIGNED_ID: i64 = -1;

    pub fn new(priority: i32, timestamp: u64, content: impl Into<String>) -> Self {
        Data {
            id: Self::UNASSIGNED_ID,
            priority,
            timestamp,
            content: content.into(),
        }
    }
}
