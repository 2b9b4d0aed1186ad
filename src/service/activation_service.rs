use chrono::{DateTime, Utc};

use crate::model::error::folder_errors::ToggleFolderError;
use crate::model::repository::{ConfigDocument, FolderRecord};
use crate::repository;
use crate::service::folder_service::is_valid_folder_name;

/// the outcome of flipping a folder's active flag
#[derive(Debug, PartialEq)]
pub struct ToggleResult {
    pub folder_name: String,
    /// the folder's state after the toggle
    pub active: bool,
    /// the folder that was active before this one was activated. Always `None` when deactivating
    pub previous_active: Option<String>,
    /// how many folders are active after the toggle
    pub total_active: usize,
}

/// flips the active flag of the folder with the passed name. Activating a folder deactivates every other
/// folder, so at most one folder is ever active.
///
/// The whole read-modify-write happens under the config lock
pub fn toggle_folder(name: &str) -> Result<ToggleResult, ToggleFolderError> {
    if !is_valid_folder_name(name) {
        return Err(ToggleFolderError::InvalidName);
    }
    let result = repository::update_config(|document| toggle_in_document(document, name, Utc::now()))
        .map_err(|_| ToggleFolderError::ConfigFailure)?;
    if result.active {
        log::info!(
            "Activated folder {name} (previously active: {:?})",
            result.previous_active
        );
    } else {
        log::info!("Deactivated folder {name}");
    }
    Ok(result)
}

pub fn toggle_in_document(
    document: &mut ConfigDocument,
    name: &str,
    now: DateTime<Utc>,
) -> ToggleResult {
    let currently_active = document
        .entry(name.to_string())
        .or_insert_with(|| FolderRecord::new(now))
        .active;
    let previous_active = if currently_active {
        if let Some(record) = document.get_mut(name) {
            record.active = false;
            record.deactivated_at = Some(now);
        }
        None
    } else {
        let previous_active = document
            .iter()
            .find(|(folder, record)| record.active && folder.as_str() != name)
            .map(|(folder, _)| folder.clone());
        for (folder, record) in document.iter_mut() {
            record.active = false;
            if folder != name {
                record.deactivated_at = Some(now);
            }
        }
        if let Some(record) = document.get_mut(name) {
            record.active = true;
            record.activated_at = Some(now);
        }
        previous_active
    };
    ToggleResult {
        folder_name: name.to_string(),
        active: !currently_active,
        previous_active,
        total_active: document.values().filter(|record| record.active).count(),
    }
}
