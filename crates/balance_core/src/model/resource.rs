//! Saved reference item for the resource notebook.

use crate::model::record_id::RecordId;
use serde::{Deserialize, Serialize};

/// Link or note kept alongside the schedule.
///
/// `url` is free text and never validated; `url` and `notes` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub notes: String,
}

impl Resource {
    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }

    pub fn has_notes(&self) -> bool {
        !self.notes.is_empty()
    }
}
