pub mod folder_requests;
pub mod upload_requests;
