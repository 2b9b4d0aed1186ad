use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::sync::Mutex;

use rocket::serde::json::serde_json;
use tempfile::NamedTempFile;

use crate::model::error::config_errors::ConfigStoreError;
use crate::model::repository::ConfigDocument;

pub mod folder_repository;


/// guards every read-modify-write of the folder config document
static CONFIG_LOCK: Mutex<()> = Mutex::new(());

/// where the folder config document lives
#[cfg(not(test))]
pub fn config_location() -> String {
    crate::config::IMAGE_FOLDERS_CONFIG
        .storage
        .folder_config
        .clone()
}

#[cfg(test)]
pub fn config_location() -> String {
    format!("./{}_folders.json", crate::test::current_thread_name())
}

/// reads the folder config document from disk.
///
/// This never fails: a missing or unreadable document is treated as empty
pub fn load_config() -> ConfigDocument {
    let location = config_location();
    let contents = match fs::read_to_string(&location) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("No folder config found at {location}, starting with an empty one");
            return ConfigDocument::new();
        }
        Err(e) => {
            log::error!("Failed to read folder config at {location}! Treating it as empty. Error is {e:?}");
            return ConfigDocument::new();
        }
    };
    match serde_json::from_str::<ConfigDocument>(&contents) {
        Ok(document) => document,
        Err(e) => {
            log::error!("Failed to parse folder config at {location}! Treating it as empty. Error is {e:?}");
            ConfigDocument::new()
        }
    }
}

/// replaces the folder config document on disk with the passed one.
///
/// The document is written to a temp file next to the real one and then moved over it, so readers
/// only ever see a complete document
pub fn save_config(document: &ConfigDocument) -> Result<(), ConfigStoreError> {
    let location = config_location();
    let path = Path::new(&location);
    let json = serde_json::to_string_pretty(document).map_err(|e| {
        log::error!("Failed to serialize folder config! Error is {e:?}");
        ConfigStoreError::SerializeFailure
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_failure = |e: std::io::Error| {
        log::error!("Failed to write folder config to {location}! Error is {e:?}");
        ConfigStoreError::WriteFailure
    };
    fs::create_dir_all(parent).map_err(write_failure)?;
    let mut temp_file = NamedTempFile::new_in(parent).map_err(write_failure)?;
    temp_file
        .write_all(json.as_bytes())
        .map_err(write_failure)?;
    temp_file.flush().map_err(write_failure)?;
    temp_file.persist(path).map_err(|e| write_failure(e.error))?;
    Ok(())
}

/// loads the folder config, applies `mutation` to it, and saves it back, all while holding the config lock.
/// Every change to the document needs to go through here so that concurrent requests can't clobber each other
pub fn update_config<R>(
    mutation: impl FnOnce(&mut ConfigDocument) -> R,
) -> Result<R, ConfigStoreError> {
    let _guard = match CONFIG_LOCK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::warn!("The folder config lock was poisoned! Recovering...");
            CONFIG_LOCK.clear_poison();
            poisoned.into_inner()
        }
    };
    let mut document = load_config();
    let result = mutation(&mut document);
    save_config(&document)?;
    Ok(result)
}
