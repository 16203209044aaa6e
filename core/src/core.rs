use crate::{
    artifacts::os::windows::shortcuts::{
        details::get_details,
        error::LnkError,
        parser::{grab_lnk_file, is_lnk_data, is_lnk_file, parse_lnk_data},
        patch::patch_lnk_file,
        shortname,
        writer::{create_lnk_data, write_lnk_file},
    },
    error::{TomlError, UtilsError},
    filesystem::files::read_file,
    structs::toml::{LnkToml, Output, WriteOptions},
    utils::logging::{create_log_file, log_level},
};
use common::windows::{LinkDetails, LinkRecord};
use log::{error, info};
use simplelog::{Config, SimpleLogger, WriteLogger};
use std::str::from_utf8;

/// Check if provided bytes start with a valid `Shortcut` header
pub fn is_link(data: &[u8]) -> bool {
    is_lnk_data(data)
}

/// Check if the file at `path` is a `Shortcut`
pub fn is_link_file(path: &str) -> bool {
    is_lnk_file(path)
}

/// Decode `Shortcut` bytes into a `LinkRecord`
pub fn parse_link(data: &[u8]) -> Result<LinkRecord, LnkError> {
    let shortcut = parse_lnk_data(data)?;
    Ok(shortcut.to_record())
}

/// Read and decode the `Shortcut` at `path`
pub fn read_link(path: &str) -> Result<LinkRecord, LnkError> {
    let shortcut = grab_lnk_file(path)?;
    Ok(shortcut.to_record())
}

/// Encode a `LinkRecord` without touching the filesystem (other than probing the target if enabled)
pub fn create_link_data(record: &LinkRecord, options: &WriteOptions) -> Result<Vec<u8>, LnkError> {
    let data = create_lnk_data(record, options)?;
    Ok(data.into_bytes())
}

/// Create or overwrite a `Shortcut` at `path`
pub fn write_link(path: &str, record: &LinkRecord, options: &WriteOptions) -> Result<bool, LnkError> {
    write_lnk_file(path, record, options)
}

/// Replace `find` with `replace` in the target, network path and working directory of an existing `Shortcut`
pub fn patch_link(
    path: &str,
    find: &str,
    replace: &str,
    options: &WriteOptions,
) -> Result<bool, LnkError> {
    patch_lnk_file(path, find, replace, options)
}

/// Get what the `Shortcut` at `path` points to
pub fn link_target(path: &str) -> Result<String, LnkError> {
    let shortcut = grab_lnk_file(path)?;
    Ok(shortcut.link_target())
}

pub fn link_target_data(data: &[u8]) -> Result<String, LnkError> {
    let shortcut = parse_lnk_data(data)?;
    Ok(shortcut.link_target())
}

/// Dump every decoded field of a `Shortcut`
pub fn inspect_link(data: &[u8]) -> Result<LinkDetails, LnkError> {
    let shortcut = parse_lnk_data(data)?;
    Ok(get_details(&shortcut))
}

/// Same as `inspect_link` but serialized as JSON
pub fn inspect_link_json(data: &[u8]) -> Result<String, LnkError> {
    let details = inspect_link(data)?;
    let serde_data = serde_json::to_string(&details);
    match serde_data {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[core] Failed to serialize shortcut details: {err:?}");
            Err(LnkError::Serialize)
        }
    }
}

/// Estimate the 8.3 name of a single path element
pub fn estimate_short_name(element: &str) -> String {
    shortname::estimate_short_name(element)
}

/// Parse a TOML file at provided path. Logging is set up from the `output` table
pub fn parse_toml_file(path: &str) -> Result<LnkToml, TomlError> {
    let buffer_results = read_file(path);
    let buffer = match buffer_results {
        Ok(results) => results,
        Err(_) => {
            return Err(TomlError::NoFile);
        }
    };

    parse_toml_data(&buffer)
}

/// Parse an already read TOML file
pub fn parse_toml_data(data: &[u8]) -> Result<LnkToml, TomlError> {
    let toml_results = toml::from_str(from_utf8(data).unwrap_or_default());
    let config: LnkToml = match toml_results {
        Ok(results) => results,
        Err(_) => {
            return Err(TomlError::BadToml);
        }
    };

    if setup_logging(&config.output).is_ok() {
        info!("[core] Loaded TOML config {}", config.output.name);
    }
    Ok(config)
}

/// Start the global logger. Writes to a file if an output directory is configured, otherwise to the terminal.
/// Only the first call in a process installs a logger
pub fn setup_logging(output: &Output) -> Result<(), UtilsError> {
    let level = log_level(output);
    if let Some(directory) = &output.directory {
        let log_file = create_log_file(output, directory)?;
        let _ = WriteLogger::init(level, Config::default(), log_file);
        return Ok(());
    }

    let _ = SimpleLogger::init(level, Config::default());
    Ok(())
}
