use std::fs;
use std::fs::{remove_dir_all, remove_file};
use std::path::Path;

use rocket::serde::json::serde_json;

use crate::model::repository::ConfigDocument;
use crate::repository::config_location;
use crate::repository::folder_repository::upload_dir;


pub fn current_thread_name() -> String {
    let current_thread = std::thread::current();
    current_thread.name().unwrap_or("main").to_string()
}

/// removes this thread's upload directory and folder config
pub fn cleanup() {
    let upload_path = upload_dir();
    let upload_path = Path::new(upload_path.as_str());
    if upload_path.exists() {
        remove_dir_all(upload_path).unwrap_or(());
    }
    remove_file(Path::new(config_location().as_str())).unwrap_or(());
}

pub fn create_folder_disk(folder_name: &str) {
    fs::create_dir_all(Path::new(format!("{}/{folder_name}", upload_dir()).as_str())).unwrap();
}

pub fn create_file_disk(folder_name: &str, file_name: &str, contents: &str) {
    create_folder_disk(folder_name);
    fs::write(
        Path::new(format!("{}/{folder_name}/{file_name}", upload_dir()).as_str()),
        contents,
    )
    .unwrap();
}

pub fn write_config_disk(document: &ConfigDocument) {
    fs::write(
        config_location(),
        serde_json::to_string(document).unwrap(),
    )
    .unwrap();
}

pub fn read_config_disk() -> ConfigDocument {
    let contents = fs::read_to_string(config_location()).unwrap();
    serde_json::from_str(&contents).unwrap()
}
