use chrono::{DateTime, Utc};
use rocket::serde::{json::Json, Deserialize, Serialize};

use crate::model::repository::ConfigDocument;
use crate::model::response::BasicMessage;

/// a folder on disk, along with the urls of every image in it
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct FolderResponse {
    pub name: String,
    #[serde(rename = "imageCount")]
    pub image_count: usize,
    /// urls relative to the server root, e.g. `/uploads/vacation/beach_1700000000000.jpg`
    pub images: Vec<String>,
    pub active: bool,
}

impl FolderResponse {
    pub fn new(name: &str, images: Vec<String>, active: bool) -> FolderResponse {
        FolderResponse {
            name: name.to_string(),
            image_count: images.len(),
            images,
            active,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct CreatedFolder {
    pub message: String,
    #[serde(rename = "folderName")]
    pub folder_name: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct ToggledFolder {
    pub message: String,
    #[serde(rename = "folderName")]
    pub folder_name: String,
    pub active: bool,
    /// only sent when the folder was activated. `null` if nothing was active before
    #[serde(
        rename = "previousActive",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub previous_active: Option<Option<String>>,
    #[serde(rename = "totalActiveFolders")]
    pub total_active_folders: usize,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct CurrentActiveResponse {
    #[serde(rename = "activeFolders")]
    pub active_folders: Vec<String>,
    #[serde(rename = "activeFolder")]
    pub active_folder: Option<String>,
    #[serde(rename = "activeCount")]
    pub active_count: usize,
    #[serde(rename = "allFolders")]
    pub all_folders: ConfigDocument,
    pub timestamp: DateTime<Utc>,
}

#[derive(Responder)]
pub enum ListFoldersResponse {
    #[response(status = 200)]
    Success(Json<Vec<FolderResponse>>),
    #[response(status = 500, content_type = "json")]
    FileSystemError(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum CreateFolderResponse {
    #[response(status = 201)]
    Success(Json<CreatedFolder>),
    #[response(status = 400, content_type = "json")]
    InvalidName(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    FolderAlreadyExists(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    FileSystemError(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    ConfigError(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum ToggleFolderResponse {
    #[response(status = 200)]
    Success(Json<ToggledFolder>),
    #[response(status = 400, content_type = "json")]
    InvalidName(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    ConfigError(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum DeleteFolderResponse {
    #[response(status = 200)]
    Success(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    FolderNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    FileSystemError(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    ConfigError(Json<BasicMessage>),
}
