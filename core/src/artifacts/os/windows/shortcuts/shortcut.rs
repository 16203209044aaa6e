use super::{
    header::LnkHeader,
    items::LnkItem,
    location::LnkLocation,
    shellitems::{items_to_path, parse_id_list},
    strings::extract_string,
};
use crate::utils::nom_helper::{nom_data, nom_unsigned_four_bytes, Endian};
use common::windows::{LinkIcon, LinkRecord};
use log::warn;
use nom::Needed;

/// Everything decoded from one `Shortcut`
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LnkData {
    pub(crate) header: LnkHeader,
    pub(crate) items: Vec<LnkItem>,
    pub(crate) location: Option<LnkLocation>,
    pub(crate) description: String,
    pub(crate) relative_path: String,
    pub(crate) working_directory: String,
    pub(crate) arguments: String,
    pub(crate) icon_location: String,
    pub(crate) extra_blocks: Vec<LnkExtraBlock>,
}

/// Extra data block after the strings. Walked but not interpreted
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LnkExtraBlock {
    pub(crate) size: u32,
    pub(crate) signature: u32,
}

impl LnkData {
    /// Parse and grab `shortcut` data from provided bytes. Sections are read in file order based on the header flags
    pub(crate) fn get_shortcut_data(data: &[u8]) -> nom::IResult<&[u8], LnkData> {
        let (mut input, header) = LnkHeader::parse_header(data)?;
        let flags = header.flags;

        let mut shortcut = LnkData {
            header,
            items: Vec::new(),
            location: None,
            description: String::new(),
            relative_path: String::new(),
            working_directory: String::new(),
            arguments: String::new(),
            icon_location: String::new(),
            extra_blocks: Vec::new(),
        };

        // Two (2) structures may follow the header
        //  TargetIDList - List of items that make up the target path
        //  LocationInfo - Where the target exists. Either on a local volume or a network share
        if flags.has_target_id_list() {
            let (remaining_input, items) = parse_id_list(input)?;
            shortcut.items = items;
            input = remaining_input;
        }
        if flags.has_link_info() {
            let (remaining_input, location) = LnkLocation::parse_location(input)?;
            shortcut.location = Some(location);
            input = remaining_input;
        }

        // After TargetIDList and LocationInfo five (5) strings may exist depending on the flags set in the header
        let is_unicode = flags.is_unicode();
        if flags.has_name() {
            let (remaining_input, value) = extract_string(input, is_unicode)?;
            shortcut.description = value;
            input = remaining_input;
        }
        if flags.has_relative_path() {
            let (remaining_input, value) = extract_string(input, is_unicode)?;
            shortcut.relative_path = value;
            input = remaining_input;
        }
        if flags.has_working_directory() {
            let (remaining_input, value) = extract_string(input, is_unicode)?;
            shortcut.working_directory = value;
            input = remaining_input;
        }
        if flags.has_arguments() {
            let (remaining_input, value) = extract_string(input, is_unicode)?;
            shortcut.arguments = value;
            input = remaining_input;
        }
        if flags.has_icon_location() {
            let (remaining_input, value) = extract_string(input, is_unicode)?;
            shortcut.icon_location = value;
            input = remaining_input;
        }

        loop {
            match LnkData::parse_extra_block(input) {
                Ok((remaining_input, Some(block))) => {
                    shortcut.extra_blocks.push(block);
                    input = remaining_input;
                }
                Ok((remaining_input, None)) => {
                    input = remaining_input;
                    break;
                }
                Err(_err) => {
                    if !input.is_empty() {
                        warn!(
                            "[shortcuts] Malformed extra data block. Ignoring last {} bytes",
                            input.len()
                        );
                    }
                    break;
                }
            }
        }

        Ok((input, shortcut))
    }

    /// Parse one extra data block. The terminal block (size 0) returns `None`
    fn parse_extra_block(data: &[u8]) -> nom::IResult<&[u8], Option<LnkExtraBlock>> {
        let (input, size) = nom_unsigned_four_bytes(data, Endian::Le)?;
        let terminal = 0;
        if size == terminal {
            return Ok((input, None));
        }

        // Size and signature
        let min_size = 8;
        if size < min_size {
            return Err(nom::Err::Incomplete(Needed::Unknown));
        }
        let (remaining_input, block_data) = nom_data(data, size as u64)?;
        let (block_input, _) = nom_unsigned_four_bytes(block_data, Endian::Le)?;
        let (_, signature) = nom_unsigned_four_bytes(block_input, Endian::Le)?;

        Ok((remaining_input, Some(LnkExtraBlock { size, signature })))
    }

    /// Target path. Taken from the target ID list, otherwise from the location info
    pub(crate) fn target(&self) -> String {
        let target = items_to_path(&self.items);
        if !target.is_empty() {
            return target;
        }
        match &self.location {
            Some(location) => location.target_path(),
            None => String::new(),
        }
    }

    pub(crate) fn network_path(&self) -> String {
        match &self.location {
            Some(location) => location.network_path(),
            None => String::new(),
        }
    }

    /// Where the `Shortcut` points. Network share name, then the local base path, then the target ID list path
    pub(crate) fn link_target(&self) -> String {
        if let Some(location) = &self.location {
            if let Some(network) = &location.network {
                return network.share_name.clone();
            }
            if !location.base_path.is_empty() {
                return location.base_path.clone();
            }
        }
        items_to_path(&self.items)
    }

    pub(crate) fn to_record(&self) -> LinkRecord {
        LinkRecord {
            target: self.target(),
            network_path: self.network_path(),
            arguments: self.arguments.clone(),
            description: self.description.clone(),
            relative_path: self.relative_path.clone(),
            working_directory: self.working_directory.clone(),
            icon: LinkIcon {
                filename: self.icon_location.clone(),
                index: self.header.icon_index,
            },
            hotkey: self.header.hotkey,
        }
    }
}
