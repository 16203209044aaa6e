use super::{error::UtilsError, uuid::generate_uuid};
use crate::structs::toml::Output;
use log::{error, LevelFilter};
use std::fs::{create_dir_all, File};

/// Create log output file based on TOML `Output` configuration. Logs are written to `<directory>/<name>/<uuid>.log`
pub(crate) fn create_log_file(output: &Output, directory: &str) -> Result<File, UtilsError> {
    let path = format!("{directory}/{}", output.name);
    let result = create_dir_all(&path);
    match result {
        Ok(_) => {}
        Err(err) => {
            error!("[lnk-core] Failed to create logging output directory for {path}. Error: {err:?}");
            return Err(UtilsError::CreateDirectory);
        }
    }

    let output_result = File::create(format!("{path}/{}.log", generate_uuid()));
    match output_result {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[lnk-core] Failed to create log file at {path}. Error: {err:?}");
            Err(UtilsError::LogFile)
        }
    }
}

/// Get the logging level from TOML `Output` configuration. Defaults to `warn`
pub(crate) fn log_level(output: &Output) -> LevelFilter {
    if let Some(log_level) = &output.logging {
        match log_level.to_lowercase().as_str() {
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            _ => LevelFilter::Warn,
        }
    } else {
        LevelFilter::Warn
    }
}
