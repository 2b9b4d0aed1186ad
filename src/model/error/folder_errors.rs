#[derive(PartialEq, Debug)]
pub enum ListFoldersError {
    /// the upload directory could not be read
    FileSystemFailure,
}

#[derive(PartialEq, Debug)]
pub enum CreateFolderError {
    /// nothing was left of the name after sanitizing it
    InvalidName,
    /// a folder with the sanitized name already exists
    AlreadyExists,
    /// the file system failed to write the folder
    FileSystemFailure,
    /// the folder state document could not be saved
    ConfigFailure,
}

#[derive(PartialEq, Debug)]
pub enum DeleteFolderError {
    /// no folder with that name exists on disk
    NotFound,
    /// could not remove the folder from the disk
    FileSystemFailure,
    /// the folder was removed but its record could not be purged
    ConfigFailure,
}

#[derive(PartialEq, Debug)]
pub enum ToggleFolderError {
    /// the name is empty or isn't a sanitized folder name
    InvalidName,
    ConfigFailure,
}

#[derive(PartialEq, Debug)]
pub enum ReconcileError {
    FileSystemFailure,
    ConfigFailure,
}
