/**
 * Windows `Shortcut` files point to another file or directory.
 * They have the extension `lnk` and can be found in any directory.
 *
 * References:
 * `https://github.com/libyal/liblnk/blob/main/documentation/Windows%20Shortcut%20File%20(LNK)%20format.asciidoc`
 * `https://winprotocoldoc.blob.core.windows.net/productionwindowsarchives/MS-SHLLINK/%5bMS-SHLLINK%5d.pdf`
 */
use super::{
    error::LnkError,
    header::{LnkHeader, HEADER_SIZE},
    shortcut::LnkData,
};
use crate::utils::buffer::ByteBuffer;
use log::error;

/// Parse a single `shortcut` file
pub(crate) fn grab_lnk_file(path: &str) -> Result<LnkData, LnkError> {
    let result = ByteBuffer::load_file(path);
    let lnk_data = match result {
        Ok(data) => data,
        Err(err) => {
            error!("[shortcuts] Could not read lnk file {path}: {err:?}");
            return Err(LnkError::IoFailure);
        }
    };
    parse_lnk_data(lnk_data.as_slice())
}

/// Check for the `Shortcut` signature size and format GUID
pub(crate) fn is_lnk_data(data: &[u8]) -> bool {
    data.len() >= HEADER_SIZE as usize && LnkHeader::check_header(data)
}

/// Check if the file at `path` is a `Shortcut`. Unreadable files are not
pub(crate) fn is_lnk_file(path: &str) -> bool {
    match ByteBuffer::load_file(path) {
        Ok(data) => is_lnk_data(data.as_slice()),
        Err(_err) => false,
    }
}

/// Parse the raw bytes of `shortcut` data
pub(crate) fn parse_lnk_data(data: &[u8]) -> Result<LnkData, LnkError> {
    if !is_lnk_data(data) {
        error!("[shortcuts] Data is not a shortcut");
        return Err(LnkError::NotALink);
    }

    let shortcut_result = LnkData::get_shortcut_data(data);
    match shortcut_result {
        Ok((_, result)) => Ok(result),
        Err(_err) => {
            error!("[shortcuts] Could not parse shortcut data");
            Err(LnkError::TruncatedInput)
        }
    }
}
