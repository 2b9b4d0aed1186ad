use rocket::fs::TempFile;
use rocket::FromForm;

#[derive(FromForm)]
pub struct ImageUpload<'a> {
    #[field(name = "folderName")]
    pub folder_name: String,
    /// every part named `images`. Left empty rather than failing the form when there are none
    #[field(default = Vec::new())]
    pub images: Vec<TempFile<'a>>,
}
