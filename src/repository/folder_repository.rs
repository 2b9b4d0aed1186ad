use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::file_types::ImageType;

/// the directory every folder lives in
#[cfg(not(test))]
pub fn upload_dir() -> String {
    crate::config::IMAGE_FOLDERS_CONFIG.storage.upload_dir.clone()
}

#[cfg(test)]
pub fn upload_dir() -> String {
    format!("./{}_uploads", crate::test::current_thread_name())
}

/// ensures that the upload directory exists on the file system
pub fn ensure_upload_dir() -> io::Result<()> {
    fs::create_dir_all(upload_dir())
}

pub fn folder_path(name: &str) -> PathBuf {
    Path::new(upload_dir().as_str()).join(name)
}

pub fn folder_exists(name: &str) -> bool {
    folder_path(name).is_dir()
}

/// the url an image in a folder is served from
pub fn image_url(folder: &str, file_name: &str) -> String {
    format!("/uploads/{folder}/{file_name}")
}

/// returns the name of every directory directly inside the upload directory, sorted
pub fn get_folder_names() -> io::Result<Vec<String>> {
    ensure_upload_dir()?;
    let mut names = Vec::new();
    for entry in fs::read_dir(upload_dir())? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => log::warn!("Skipping folder with a non utf-8 name: {raw:?}"),
        }
    }
    names.sort();
    Ok(names)
}

/// returns the name of every image file in the passed folder, sorted. Files that don't have an image
/// extension are ignored
pub fn get_image_names(folder: &str) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(folder_path(folder))? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string() {
            if ImageType::is_image_file_name(&name) {
                names.push(name);
            }
        }
    }
    names.sort();
    Ok(names)
}

/// creates the folder's directory. Fails with [`io::ErrorKind::AlreadyExists`] if it's already there
pub fn create_folder(name: &str) -> io::Result<()> {
    ensure_upload_dir()?;
    fs::create_dir(folder_path(name))
}

/// creates the folder's directory if it doesn't exist yet and returns its path
pub fn create_folder_if_missing(name: &str) -> io::Result<PathBuf> {
    let path = folder_path(name);
    fs::create_dir_all(&path)?;
    Ok(path)
}

/// removes the folder's directory along with everything in it
pub fn delete_folder(name: &str) -> io::Result<()> {
    fs::remove_dir_all(folder_path(name))
}
