use super::{error::FileSystemError, metadata::get_metadata};
use log::error;
use std::{
    fs::{read, OpenOptions},
    io::Write,
    path::Path,
};

/// Check if path is a file
pub(crate) fn is_file(path: &str) -> bool {
    let file = Path::new(path);
    if file.is_file() {
        return true;
    }
    false
}

/// Read a file that is less than 2GB in size
pub(crate) fn read_file(path: &str) -> Result<Vec<u8>, FileSystemError> {
    if file_too_large(path) {
        return Err(FileSystemError::LargeFile);
    }
    file_read(path)
}

/// Read a file into memory
fn file_read(path: &str) -> Result<Vec<u8>, FileSystemError> {
    // Verify provided path is a file
    if !is_file(path) {
        return Err(FileSystemError::NotFile);
    }

    let read_result = read(path);
    match read_result {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[filesystem] Failed to read file {path}: {err:?}");
            Err(FileSystemError::ReadFile)
        }
    }
}

/// Create or truncate the file at `path` and write all of `data` in one call
pub(crate) fn write_file(path: &str, data: &[u8]) -> Result<(), FileSystemError> {
    let file_result = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path);

    let mut file = match file_result {
        Ok(result) => result,
        Err(err) => {
            error!("[filesystem] Failed to open {path} for writing: {err:?}");
            return Err(FileSystemError::OpenFile);
        }
    };

    let write_result = file.write_all(data);
    match write_result {
        Ok(_) => Ok(()),
        Err(err) => {
            error!("[filesystem] Failed to write file {path}: {err:?}");
            Err(FileSystemError::WriteFile)
        }
    }
}

/// Get the size of a file. Returns 0 if the path is not a file
pub(crate) fn get_file_size(path: &str) -> u64 {
    if !is_file(path) {
        return 0;
    }

    let meta = get_metadata(path);
    match meta {
        Ok(result) => result.len(),
        Err(err) => {
            error!("[filesystem] Failed to get file size: {err:?}");
            0
        }
    }
}

/// Check if a provided file is too large than the default acceptable size (2GB).
pub(crate) fn file_too_large(path: &str) -> bool {
    let size = get_file_size(path);
    let max_size = 2147483648; // 2GB
    if size < max_size {
        return false;
    }
    true
}
