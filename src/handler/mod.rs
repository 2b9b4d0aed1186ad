pub mod api_handler;
pub mod folder_handler;
pub mod upload_handler;
