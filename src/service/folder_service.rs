use std::io::ErrorKind;

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::error::folder_errors::{
    CreateFolderError, DeleteFolderError, ListFoldersError, ReconcileError,
};
use crate::model::repository::{ConfigDocument, FolderRecord};
use crate::model::response::folder_responses::{CurrentActiveResponse, FolderResponse};
use crate::repository;
use crate::repository::folder_repository;

//language=RegExp
static DISALLOWED_NAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_\s-]").unwrap());

/// how many records a reconciliation pass added and removed
#[derive(Debug, PartialEq, Default)]
pub struct ReconcileSummary {
    pub added: usize,
    pub pruned: usize,
}

/// strips everything that isn't an ascii letter, digit, `-`, `_` or whitespace, then trims the result
pub fn sanitize_folder_name(name: &str) -> String {
    DISALLOWED_NAME_CHARS
        .replace_all(name, "")
        .trim()
        .to_string()
}

/// whether the name could have come out of [`sanitize_folder_name`]. Names from the url have to pass this
/// before they're used as a path
pub fn is_valid_folder_name(name: &str) -> bool {
    !name.is_empty() && sanitize_folder_name(name) == name
}

/// lists every folder in the upload directory, or only the active ones if `active_only` is set.
///
/// Folders that don't have a record yet get an inactive one
pub fn list_folders(active_only: bool) -> Result<Vec<FolderResponse>, ListFoldersError> {
    let names = managed_folder_names().map_err(|e| {
        log::error!("Failed to list the upload directory! Error is {e:?}");
        ListFoldersError::FileSystemFailure
    })?;
    let mut document = repository::load_config();
    let missing: Vec<&String> = names
        .iter()
        .filter(|name| !document.contains_key(*name))
        .collect();
    if !missing.is_empty() {
        match backfill_records(&missing) {
            Some(saved) => document = saved,
            None => {
                let now = Utc::now();
                for name in &missing {
                    document.insert(name.to_string(), FolderRecord::new(now));
                }
            }
        }
    }
    let mut folders = Vec::new();
    for name in names.iter() {
        let active = document.get(name).map(|r| r.active).unwrap_or(false);
        if active_only && !active {
            continue;
        }
        let images = match folder_repository::get_image_names(name) {
            Ok(images) => images,
            // removed since we listed the upload directory
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => {
                log::error!("Failed to list images in folder {name}! Error is {e:?}");
                return Err(ListFoldersError::FileSystemFailure);
            }
        };
        let urls = images
            .iter()
            .map(|image| folder_repository::image_url(name, image))
            .collect();
        folders.push(FolderResponse::new(name, urls, active));
    }
    Ok(folders)
}

/// creates a folder on disk with a fresh, inactive record. Returns the created folder
pub fn create_folder(requested_name: &str) -> Result<FolderResponse, CreateFolderError> {
    let name = sanitize_folder_name(requested_name);
    if name.is_empty() {
        return Err(CreateFolderError::InvalidName);
    }
    if folder_repository::folder_exists(&name) {
        return Err(CreateFolderError::AlreadyExists);
    }
    if let Err(e) = folder_repository::create_folder(&name) {
        if e.kind() == ErrorKind::AlreadyExists {
            return Err(CreateFolderError::AlreadyExists);
        }
        log::error!("Failed to create folder {name} on disk! Error is {e:?}");
        return Err(CreateFolderError::FileSystemFailure);
    }
    repository::update_config(|document| {
        // replaces any stale record left behind by a folder with the same name
        document.insert(name.clone(), FolderRecord::new(Utc::now()));
    })
    .map_err(|_| CreateFolderError::ConfigFailure)?;
    log::info!("Created folder {name}");
    Ok(FolderResponse::new(&name, Vec::new(), false))
}

/// removes the folder and everything in it from the disk, along with its record
pub fn delete_folder(name: &str) -> Result<(), DeleteFolderError> {
    if !is_valid_folder_name(name) || !folder_repository::folder_exists(name) {
        return Err(DeleteFolderError::NotFound);
    }
    if let Err(e) = folder_repository::delete_folder(name) {
        log::error!("Failed to recursively delete folder {name} from disk! Error is {e:?}");
        return Err(DeleteFolderError::FileSystemFailure);
    }
    repository::update_config(|document| document.remove(name))
        .map_err(|_| DeleteFolderError::ConfigFailure)?;
    log::info!("Deleted folder {name}");
    Ok(())
}

/// reports which folders are active, along with every record
pub fn get_current_active() -> CurrentActiveResponse {
    let document = repository::load_config();
    let active_folders: Vec<String> = document
        .iter()
        .filter(|(_, record)| record.active)
        .map(|(name, _)| name.clone())
        .collect();
    CurrentActiveResponse {
        active_folder: active_folders.first().cloned(),
        active_count: active_folders.len(),
        active_folders,
        all_folders: document,
        timestamp: Utc::now(),
    }
}

/// brings the folder config in line with the upload directory: folders without a record get an inactive one,
/// and records without a folder are dropped
pub fn reconcile_folders() -> Result<ReconcileSummary, ReconcileError> {
    let names = managed_folder_names().map_err(|e| {
        log::error!("Failed to list the upload directory for reconciliation! Error is {e:?}");
        ReconcileError::FileSystemFailure
    })?;
    let current = repository::load_config();
    if current.len() == names.len() && names.iter().all(|name| current.contains_key(name)) {
        return Ok(ReconcileSummary::default());
    }
    repository::update_config(|document| reconcile_document(document, &names))
        .map_err(|_| ReconcileError::ConfigFailure)
}

fn reconcile_document(document: &mut ConfigDocument, folder_names: &[String]) -> ReconcileSummary {
    let before = document.len();
    document.retain(|name, _| folder_names.contains(name));
    let pruned = before - document.len();
    let now = Utc::now();
    let mut added = 0;
    for name in folder_names {
        if !document.contains_key(name) {
            document.insert(name.clone(), FolderRecord::new(now));
            added += 1;
        }
    }
    ReconcileSummary { added, pruned }
}

/// the directories in the upload directory that can be addressed by name. Anything else (e.g. `.hidden`) was
/// made outside of this app and couldn't be toggled or deleted, so it's left alone
fn managed_folder_names() -> std::io::Result<Vec<String>> {
    let mut names = folder_repository::get_folder_names()?;
    names.retain(|name| {
        let valid = is_valid_folder_name(name);
        if !valid {
            log::warn!("Ignoring folder {name:?} since its name isn't a valid folder name");
        }
        valid
    });
    Ok(names)
}

/// gives every passed folder an inactive record if it still doesn't have one, returning the saved document.
/// Returns `None` if the document couldn't be saved
fn backfill_records(names: &[&String]) -> Option<ConfigDocument> {
    let now = Utc::now();
    let saved = repository::update_config(|document| {
        for name in names {
            document
                .entry(name.to_string())
                .or_insert_with(|| FolderRecord::new(now));
        }
        document.clone()
    });
    match saved {
        Ok(document) => {
            log::debug!("Added records for {} untracked folders", names.len());
            Some(document)
        }
        Err(e) => {
            log::warn!("Failed to save records for untracked folders: {e:?}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::folder_repository::folder_exists;
    use crate::test::{cleanup, create_file_disk, create_folder_disk, read_config_disk, write_config_disk};

    fn active_record() -> FolderRecord {
        let mut record = FolderRecord::new(Utc::now());
        record.active = true;
        record
    }

    #[test]
    fn sanitize_strips_disallowed_characters() {
        assert_eq!("my trip-2024_b", sanitize_folder_name("  my trip!-2024_b?/.. "));
        assert_eq!("", sanitize_folder_name("../.."));
        assert_eq!("", sanitize_folder_name("   "));
        assert_eq!("tst", sanitize_folder_name("tést"));
    }

    #[test]
    fn sanitize_is_idempotent() {
        let names = ["Vacation 2024", "  a/b\\c  ", "x_y-z", "!!!", "über cool", "\ttabbed\n"];
        for name in names {
            let once = sanitize_folder_name(name);
            assert_eq!(once, sanitize_folder_name(&once));
        }
    }

    #[test]
    fn is_valid_folder_name_rejects_paths() {
        assert!(is_valid_folder_name("vacation"));
        assert!(is_valid_folder_name("my trip"));
        assert!(!is_valid_folder_name(""));
        assert!(!is_valid_folder_name(".."));
        assert!(!is_valid_folder_name("a/b"));
        assert!(!is_valid_folder_name(" padded "));
    }

    #[test]
    fn create_folder_works() {
        cleanup();
        let created = create_folder("vacation").unwrap();
        assert_eq!("vacation", created.name);
        assert_eq!(0, created.image_count);
        assert!(!created.active);
        assert!(folder_exists("vacation"));
        let record = read_config_disk().remove("vacation").unwrap();
        assert!(!record.active);
        cleanup();
    }

    #[test]
    fn create_folder_sanitizes_name() {
        cleanup();
        let created = create_folder(" summer/../trip! ").unwrap();
        assert_eq!("summertrip", created.name);
        assert!(folder_exists("summertrip"));
        cleanup();
    }

    #[test]
    fn create_folder_invalid_name() {
        cleanup();
        assert_eq!(CreateFolderError::InvalidName, create_folder("?!/").unwrap_err());
        assert_eq!(CreateFolderError::InvalidName, create_folder("").unwrap_err());
        cleanup();
    }

    #[test]
    fn create_folder_only_once() {
        cleanup();
        create_folder("vacation").unwrap();
        assert_eq!(
            CreateFolderError::AlreadyExists,
            create_folder("vacation!").unwrap_err()
        );
        cleanup();
    }

    #[test]
    fn create_folder_resets_stale_record() {
        cleanup();
        let mut document = ConfigDocument::new();
        document.insert("vacation".to_string(), active_record());
        write_config_disk(&document);
        create_folder("vacation").unwrap();
        assert!(!read_config_disk()["vacation"].active);
        cleanup();
    }

    #[test]
    fn list_folders_backfills_records() {
        cleanup();
        create_folder_disk("untracked");
        let folders = list_folders(false).unwrap();
        assert_eq!(1, folders.len());
        assert!(!folders[0].active);
        assert!(read_config_disk().contains_key("untracked"));
        cleanup();
    }

    #[test]
    fn list_folders_skips_unaddressable_folders() {
        cleanup();
        create_folder_disk(".hidden");
        create_folder_disk("odd!name");
        create_folder_disk("vacation");
        let folders = list_folders(false).unwrap();
        assert_eq!(1, folders.len());
        assert_eq!("vacation", folders[0].name);
        let on_disk = read_config_disk();
        assert!(!on_disk.contains_key(".hidden"));
        assert!(!on_disk.contains_key("odd!name"));
        cleanup();
    }

    #[test]
    fn list_folders_reports_images() {
        cleanup();
        create_file_disk("vacation", "beach_1.jpg", "hi");
        create_file_disk("vacation", "notes.txt", "hi");
        let folders = list_folders(false).unwrap();
        assert_eq!(1, folders[0].image_count);
        assert_eq!(vec!["/uploads/vacation/beach_1.jpg".to_string()], folders[0].images);
        cleanup();
    }

    #[test]
    fn list_active_folders_is_subset() {
        cleanup();
        create_folder_disk("first");
        create_folder_disk("second");
        let mut document = ConfigDocument::new();
        document.insert("first".to_string(), FolderRecord::new(Utc::now()));
        document.insert("second".to_string(), active_record());
        write_config_disk(&document);
        let all = list_folders(false).unwrap();
        let active = list_folders(true).unwrap();
        assert_eq!(2, all.len());
        assert_eq!(1, active.len());
        assert_eq!("second", active[0].name);
        assert!(all.contains(&active[0]));
        cleanup();
    }

    #[test]
    fn delete_folder_removes_folder_and_record() {
        cleanup();
        create_folder("vacation").unwrap();
        create_file_disk("vacation", "beach.jpg", "hi");
        delete_folder("vacation").unwrap();
        assert!(!folder_exists("vacation"));
        assert!(!read_config_disk().contains_key("vacation"));
        assert!(list_folders(false).unwrap().is_empty());
        cleanup();
    }

    #[test]
    fn delete_folder_not_found() {
        cleanup();
        assert_eq!(DeleteFolderError::NotFound, delete_folder("nope").unwrap_err());
        assert_eq!(DeleteFolderError::NotFound, delete_folder("..").unwrap_err());
        cleanup();
    }

    #[test]
    fn get_current_active_reports_active_folders() {
        cleanup();
        let mut document = ConfigDocument::new();
        document.insert("first".to_string(), FolderRecord::new(Utc::now()));
        document.insert("second".to_string(), active_record());
        write_config_disk(&document);
        let current = get_current_active();
        assert_eq!(vec!["second".to_string()], current.active_folders);
        assert_eq!(Some("second".to_string()), current.active_folder);
        assert_eq!(1, current.active_count);
        assert_eq!(2, current.all_folders.len());
        cleanup();
    }

    #[test]
    fn get_current_active_with_nothing_active() {
        cleanup();
        let current = get_current_active();
        assert!(current.active_folders.is_empty());
        assert_eq!(None, current.active_folder);
        assert_eq!(0, current.active_count);
        cleanup();
    }

    #[test]
    fn reconcile_folders_adds_and_prunes() {
        cleanup();
        create_folder_disk("on_disk");
        let mut document = ConfigDocument::new();
        document.insert("gone".to_string(), active_record());
        write_config_disk(&document);
        let summary = reconcile_folders().unwrap();
        assert_eq!(ReconcileSummary { added: 1, pruned: 1 }, summary);
        let on_disk = read_config_disk();
        assert!(on_disk.contains_key("on_disk"));
        assert!(!on_disk.contains_key("gone"));
        cleanup();
    }

    #[test]
    fn reconcile_folders_ignores_unaddressable_folders() {
        cleanup();
        create_folder_disk(".hidden");
        let summary = reconcile_folders().unwrap();
        assert_eq!(ReconcileSummary::default(), summary);
        cleanup();
    }

    #[test]
    fn reconcile_folders_noop_when_in_sync() {
        cleanup();
        let summary = reconcile_folders().unwrap();
        assert_eq!(ReconcileSummary::default(), summary);
        cleanup();
    }
}
