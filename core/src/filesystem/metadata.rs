use std::{
    fs::{metadata, Metadata},
    io::Error,
};

/// Get the metadata associated with provided path
pub(crate) fn get_metadata(path: &str) -> Result<Metadata, Error> {
    metadata(path)
}
