use serde::{Deserialize, Serialize};

/// A persisted note.
///
/// Optional fields are serialized as `null` rather than skipped, so every
/// response carries the same six keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Assigned by the store on insert. Never changes afterwards.
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    /// Short icon identifier or label chosen by the client.
    pub icon: Option<String>,
    /// Free-form date string supplied by the client. Not parsed or checked.
    pub duedate: Option<String>,
}

/// Writable fields of a note, used for both create and update.
///
/// Update is a full overwrite: an optional field left as `None` here clears
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub icon: Option<String>,
    pub duedate: Option<String>,
}

impl NoteInput {
    /// Input with only the required fields set.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    /// Attach the id the store assigned, producing the persisted shape.
    pub fn into_note(self, id: i64) -> Note {
        Note {
            id,
            title: self.title,
            content: self.content,
            category: self.category,
            icon: self.icon,
            duedate: self.duedate,
        }
    }
}
