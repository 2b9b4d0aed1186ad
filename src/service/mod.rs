pub mod activation_service;
pub mod folder_service;
pub mod upload_service;
