use super::{error::LnkError, parser::grab_lnk_file, writer::write_lnk_file};
use crate::{structs::toml::WriteOptions, utils::strings::replace_all};
use log::info;

/// Rewrite the `Shortcut` at `path` with every `find` replaced in the target, network path and working directory.
/// All other fields are carried over
pub(crate) fn patch_lnk_file(
    path: &str,
    find: &str,
    replace: &str,
    options: &WriteOptions,
) -> Result<bool, LnkError> {
    let shortcut = grab_lnk_file(path)?;
    let mut record = shortcut.to_record();

    record.target = replace_all(&record.target, find, replace);
    record.network_path = replace_all(&record.network_path, find, replace);
    record.working_directory = replace_all(&record.working_directory, find, replace);

    info!("[shortcuts] Patching {path}. New target: {}", record.target);
    write_lnk_file(path, &record, options)
}
