#[macro_use]
extern crate rocket;

use rocket::data::{Limits, ToByteUnit};
use rocket::fs::FileServer;
use rocket::{Build, Rocket};

use handler::{
    api_handler::health,
    folder_handler::{
        create_folder, delete_folder, get_current_active, list_active_folders, list_folders,
        toggle_folder,
    },
    upload_handler::upload_images,
};

use crate::config::IMAGE_FOLDERS_CONFIG;
use crate::repository::folder_repository::{ensure_upload_dir, upload_dir};
use crate::service::folder_service::reconcile_folders;

mod config;
mod handler;
mod logging;
mod model;
mod repository;
mod service;
#[cfg(test)]
mod test;

#[launch]
fn rocket() -> Rocket<Build> {
    start_logging();
    if let Err(e) = ensure_upload_dir() {
        panic!("Failed to create upload directory {}: {e}", upload_dir());
    }
    match reconcile_folders() {
        Ok(summary) => log::info!(
            "Folder config reconciled: {} records added, {} records pruned",
            summary.added,
            summary.pruned
        ),
        Err(e) => log::error!("Failed to reconcile folder config with the upload directory: {e:?}"),
    }
    // the per-file cap is checked by the upload service so it can answer with a useful message
    let upload = &IMAGE_FOLDERS_CONFIG.upload;
    let form_limit = upload
        .max_file_size_bytes
        .saturating_mul(upload.max_files_per_request as u64 + 1)
        .bytes();
    let limits = Limits::default()
        .limit("data-form", form_limit)
        .limit("file", form_limit);
    let figment = rocket::Config::figment().merge(("limits", limits));
    rocket::custom(figment)
        .mount("/api", routes![health, upload_images])
        .mount(
            "/api/folders",
            routes![
                list_folders,
                list_active_folders,
                get_current_active,
                create_folder,
                toggle_folder,
                delete_folder
            ],
        )
        .mount("/uploads", FileServer::from(upload_dir()))
}

#[cfg(not(test))]
fn start_logging() {
    if let Err(e) = logging::init_logging(&IMAGE_FOLDERS_CONFIG.logging) {
        eprintln!("Failed to initialize logging: {e}");
    }
}

#[cfg(test)]
fn start_logging() {}
