use rocket::serde::json::Json;

use crate::model::error::folder_errors::{
    CreateFolderError, DeleteFolderError, ListFoldersError, ToggleFolderError,
};
use crate::model::request::folder_requests::CreateFolderRequest;
use crate::model::response::folder_responses::{
    CreatedFolder, CreateFolderResponse, CurrentActiveResponse, DeleteFolderResponse,
    ListFoldersResponse, ToggleFolderResponse, ToggledFolder,
};
use crate::model::response::BasicMessage;
use crate::service::{activation_service, folder_service};

#[get("/")]
pub fn list_folders() -> ListFoldersResponse {
    list(false)
}

/// only the folders whose images should be shown to users
#[get("/active")]
pub fn list_active_folders() -> ListFoldersResponse {
    list(true)
}

#[get("/current-active")]
pub fn get_current_active() -> Json<CurrentActiveResponse> {
    Json(folder_service::get_current_active())
}

#[post("/", data = "<request>")]
pub fn create_folder(request: Json<CreateFolderRequest>) -> CreateFolderResponse {
    match folder_service::create_folder(&request.folder_name) {
        Ok(folder) => CreateFolderResponse::Success(Json(CreatedFolder {
            message: "Folder created successfully".to_string(),
            folder_name: folder.name,
        })),
        Err(CreateFolderError::InvalidName) => CreateFolderResponse::InvalidName(
            BasicMessage::new("A folder name with at least one letter, digit, `-` or `_` is required"),
        ),
        Err(CreateFolderError::AlreadyExists) => CreateFolderResponse::FolderAlreadyExists(
            BasicMessage::new("That folder already exists"),
        ),
        Err(CreateFolderError::FileSystemFailure) => CreateFolderResponse::FileSystemError(
            BasicMessage::new("Failed to create folder on disk. Check server logs for details"),
        ),
        Err(CreateFolderError::ConfigFailure) => CreateFolderResponse::ConfigError(
            BasicMessage::new("Failed to save folder state. Check server logs for details"),
        ),
    }
}

#[patch("/<folder_name>/toggle")]
pub fn toggle_folder(folder_name: &str) -> ToggleFolderResponse {
    match activation_service::toggle_folder(folder_name) {
        Ok(result) => {
            let (message, previous_active) = if result.active {
                (
                    format!("Folder {} is now active", result.folder_name),
                    Some(result.previous_active),
                )
            } else {
                (format!("Folder {} is now inactive", result.folder_name), None)
            };
            ToggleFolderResponse::Success(Json(ToggledFolder {
                message,
                folder_name: result.folder_name,
                active: result.active,
                previous_active,
                total_active_folders: result.total_active,
            }))
        }
        Err(ToggleFolderError::InvalidName) => {
            ToggleFolderResponse::InvalidName(BasicMessage::new("Invalid folder name"))
        }
        Err(ToggleFolderError::ConfigFailure) => ToggleFolderResponse::ConfigError(
            BasicMessage::new("Failed to save folder state. Check server logs for details"),
        ),
    }
}

#[delete("/<folder_name>")]
pub fn delete_folder(folder_name: &str) -> DeleteFolderResponse {
    match folder_service::delete_folder(folder_name) {
        Ok(()) => DeleteFolderResponse::Success(BasicMessage::new("Folder deleted successfully")),
        Err(DeleteFolderError::NotFound) => DeleteFolderResponse::FolderNotFound(
            BasicMessage::new("The folder with the passed name could not be found."),
        ),
        Err(DeleteFolderError::FileSystemFailure) => DeleteFolderResponse::FileSystemError(
            BasicMessage::new("Failed to delete folder from disk. Check server logs for details"),
        ),
        Err(DeleteFolderError::ConfigFailure) => DeleteFolderResponse::ConfigError(
            BasicMessage::new("Folder was deleted but its state could not be removed. Check server logs for details"),
        ),
    }
}

fn list(active_only: bool) -> ListFoldersResponse {
    match folder_service::list_folders(active_only) {
        Ok(folders) => ListFoldersResponse::Success(Json(folders)),
        Err(ListFoldersError::FileSystemFailure) => ListFoldersResponse::FileSystemError(
            BasicMessage::new("Failed to read folders from disk. Check server logs for details"),
        ),
    }
}
