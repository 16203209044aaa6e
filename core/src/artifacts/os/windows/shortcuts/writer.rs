use super::{
    error::LnkError,
    header::{LnkHeader, TargetInfo},
    location::LnkLocation,
    shellitems::create_id_list,
    shortname::get_resolver,
    strings::write_string,
};
use crate::{
    filesystem::{
        directory::is_directory,
        files::{get_file_size, is_file, write_file},
    },
    structs::toml::WriteOptions,
    utils::buffer::ByteBuffer,
};
use common::windows::LinkRecord;
use log::{debug, error};

/// Build the complete `Shortcut` for `record` in memory
pub(crate) fn create_lnk_data(
    record: &LinkRecord,
    options: &WriteOptions,
) -> Result<ByteBuffer, LnkError> {
    // Trailing separators would only survive in the location base path
    let target_path = record.target.trim_end_matches(['\\', '/']);
    let target = if options.probe_target {
        probe_target(target_path)
    } else {
        TargetInfo::default()
    };

    let resolver = get_resolver(&options.short_names);
    let id_list = create_id_list(target_path, resolver.as_ref())?;
    let header = LnkHeader::create(record, &target, options.show_command);

    let mut buffer = ByteBuffer::new();
    header.write(&mut buffer);
    buffer.append_bytes(id_list.as_slice());
    LnkLocation::write_local(&mut buffer, target_path)?;

    let flags = header.flags;
    if flags.has_name() {
        write_string(&mut buffer, &record.description)?;
    }
    if flags.has_relative_path() {
        write_string(&mut buffer, &record.relative_path)?;
    }
    if flags.has_working_directory() {
        write_string(&mut buffer, &record.working_directory)?;
    }
    if flags.has_arguments() {
        write_string(&mut buffer, &record.arguments)?;
    }
    if flags.has_icon_location() {
        write_string(&mut buffer, &record.icon.filename)?;
    }

    let terminal = 0;
    buffer.append_u32(terminal);
    debug!("[shortcuts] Created shortcut of {} bytes", buffer.len());
    Ok(buffer)
}

/// Build the `Shortcut` then write it to `path` in a single call
pub(crate) fn write_lnk_file(
    path: &str,
    record: &LinkRecord,
    options: &WriteOptions,
) -> Result<bool, LnkError> {
    let data = create_lnk_data(record, options)?;

    let result = write_file(path, data.as_slice());
    match result {
        Ok(_) => Ok(true),
        Err(err) => {
            error!("[shortcuts] Could not write shortcut {path}: {err:?}");
            Err(LnkError::IoFailure)
        }
    }
}

/// Look at the target on disk. Missing targets are treated as files of size 0
pub(crate) fn probe_target(path: &str) -> TargetInfo {
    if is_directory(path) {
        return TargetInfo {
            is_directory: true,
            file_size: 0,
        };
    }
    if is_file(path) {
        let size = get_file_size(path);
        return TargetInfo {
            is_directory: false,
            file_size: u32::try_from(size).unwrap_or(u32::MAX),
        };
    }
    TargetInfo::default()
}
