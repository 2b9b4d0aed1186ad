#[derive(PartialEq, Debug)]
pub enum ConfigStoreError {
    /// the folder state document could not be serialized
    SerializeFailure,
    /// the folder state document could not be written to disk
    WriteFailure,
}
