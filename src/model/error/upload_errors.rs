#[derive(PartialEq, Debug)]
pub enum UploadError {
    /// the request didn't contain any image parts
    NoFiles,
    /// more parts were sent than a single upload allows
    TooManyFiles(usize),
    /// the file with this name is over the per-file size cap
    FileTooLarge(String),
    /// the file with this name has an extension or content type that isn't an image
    UnsupportedType(String),
    /// nothing was left of the folder name after sanitizing it
    InvalidName,
    /// failed to create the folder or write a file into it
    FileSystemFailure,
}
