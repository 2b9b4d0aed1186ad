use rocket::serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CreateFolderRequest {
    /// a missing name is treated the same as an empty one
    #[serde(rename = "folderName", default)]
    pub folder_name: String,
}
