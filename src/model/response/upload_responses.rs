use rocket::serde::{json::Json, Deserialize, Serialize};

use crate::model::response::BasicMessage;

/// describes a single image that was written to disk
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct StoredFile {
    /// the file name the client sent
    #[serde(rename = "originalName")]
    pub original_name: String,
    /// the file name on disk
    #[serde(rename = "storedName")]
    pub stored_name: String,
    pub url: String,
    pub size: u64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct UploadedImages {
    pub message: String,
    pub files: Vec<StoredFile>,
    pub folder: String,
}

#[derive(Responder)]
pub enum UploadResponse {
    #[response(status = 200)]
    Success(Json<UploadedImages>),
    #[response(status = 400, content_type = "json")]
    InvalidInput(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    FileTooLarge(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    FileSystemError(Json<BasicMessage>),
}
