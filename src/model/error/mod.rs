pub mod config_errors;
pub mod folder_errors;
pub mod upload_errors;
