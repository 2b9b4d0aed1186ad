use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// the persisted state of a single folder. The folder name is the key this record is stored under
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FolderRecord {
    /// at most one record in a [`ConfigDocument`] is active at a time
    pub active: bool,
    /// hand-edited documents may not have this, in which case it's the time the document was read
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// the last time this folder was activated. Overwritten on every activation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activated_at: Option<DateTime<Utc>>,
    /// the last time this folder was deactivated. Overwritten on every deactivation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deactivated_at: Option<DateTime<Utc>>,
}

impl FolderRecord {
    /// a fresh, inactive record
    pub fn new(created_at: DateTime<Utc>) -> Self {
        FolderRecord {
            active: false,
            created_at,
            activated_at: None,
            deactivated_at: None,
        }
    }
}

/// folder name -> folder state. This is written to disk as a single json object
pub type ConfigDocument = BTreeMap<String, FolderRecord>;
