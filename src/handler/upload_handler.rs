use rocket::form::Form;
use rocket::serde::json::Json;

use crate::config::IMAGE_FOLDERS_CONFIG;
use crate::model::error::upload_errors::UploadError;
use crate::model::request::upload_requests::ImageUpload;
use crate::model::response::upload_responses::UploadResponse;
use crate::model::response::BasicMessage;
use crate::service::upload_service;

/// accepts up to the configured number of images and stores them in the requested folder
#[post("/upload", data = "<upload>")]
pub async fn upload_images(upload: Form<ImageUpload<'_>>) -> UploadResponse {
    let mut upload = upload.into_inner();
    let limits = &IMAGE_FOLDERS_CONFIG.upload;
    match upload_service::upload_images(&upload.folder_name, &mut upload.images, limits).await {
        Ok(uploaded) => UploadResponse::Success(Json(uploaded)),
        Err(UploadError::NoFiles) => {
            UploadResponse::InvalidInput(BasicMessage::new("No files were uploaded"))
        }
        Err(UploadError::TooManyFiles(count)) => UploadResponse::InvalidInput(BasicMessage::new(
            format!(
                "{count} files were sent but at most {} can be uploaded at once",
                limits.max_files_per_request
            )
            .as_str(),
        )),
        Err(UploadError::InvalidName) => {
            UploadResponse::InvalidInput(BasicMessage::new("A valid folder name is required"))
        }
        Err(UploadError::UnsupportedType(name)) => UploadResponse::InvalidInput(BasicMessage::new(
            format!("{name} is not a supported image. Only jpeg, jpg, png, gif, webp and svg files are allowed")
                .as_str(),
        )),
        Err(UploadError::FileTooLarge(name)) => UploadResponse::FileTooLarge(BasicMessage::new(
            format!(
                "{name} is larger than the {} byte limit",
                limits.max_file_size_bytes
            )
            .as_str(),
        )),
        Err(UploadError::FileSystemFailure) => UploadResponse::FileSystemError(BasicMessage::new(
            "Failed to save files to disk. Check server logs for details",
        )),
    }
}
