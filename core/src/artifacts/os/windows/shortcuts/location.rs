use super::{
    error::LnkError,
    network::LnkNetwork,
    volume::{LnkVolume, LOCAL_VOLUME_SIZE},
};
use crate::utils::{
    buffer::ByteBuffer,
    nom_helper::{nom_unsigned_four_bytes, Endian},
    strings::extract_utf8_string,
};
use common::windows::LocationFlag;
use log::error;
use nom::{
    bytes::complete::{take, take_while},
    Needed,
};

/// Size of the fixed location header. Also the value of the end offset field
pub(crate) const LOCATION_HEADER_SIZE: u32 = 0x1c;
const LOCATION_LOCAL: u32 = 1;
const LOCATION_NETWORK: u32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LnkLocation {
    pub(crate) size: u32,
    pub(crate) end_offset: u32,
    pub(crate) location: u32,
    pub(crate) volume_offset: u32,
    pub(crate) base_path_offset: u32,
    pub(crate) network_offset: u32,
    pub(crate) final_path_offset: u32,
    pub(crate) base_path: String,
    pub(crate) final_path: String,
    pub(crate) volume: Option<LnkVolume>,
    pub(crate) network: Option<LnkNetwork>,
}

impl LnkLocation {
    /// Parse the Location information from `shortcut` data. All offsets are relative to the start of the section
    pub(crate) fn parse_location(data: &[u8]) -> nom::IResult<&[u8], LnkLocation> {
        let (_, size) = nom_unsigned_four_bytes(data, Endian::Le)?;
        if size < LOCATION_HEADER_SIZE {
            return Err(nom::Err::Incomplete(Needed::Unknown));
        }
        let (remaining_input, section) = take(size)(data)?;

        let (input, _) = nom_unsigned_four_bytes(section, Endian::Le)?;
        let (input, end_offset) = nom_unsigned_four_bytes(input, Endian::Le)?;
        let (input, location) = nom_unsigned_four_bytes(input, Endian::Le)?;
        let (input, volume_offset) = nom_unsigned_four_bytes(input, Endian::Le)?;
        let (input, base_path_offset) = nom_unsigned_four_bytes(input, Endian::Le)?;
        let (input, network_offset) = nom_unsigned_four_bytes(input, Endian::Le)?;
        let (_, final_path_offset) = nom_unsigned_four_bytes(input, Endian::Le)?;

        let (_, base_path) = LnkLocation::read_path(section, base_path_offset)?;
        let (_, final_path) = LnkLocation::read_path(section, final_path_offset)?;

        let mut lnk_location = LnkLocation {
            size,
            end_offset,
            location,
            volume_offset,
            base_path_offset,
            network_offset,
            final_path_offset,
            base_path,
            final_path,
            volume: None,
            network: None,
        };

        let no_table = 0;
        // Only the table matching the location kind is read
        if location == LOCATION_LOCAL && volume_offset != no_table {
            let (volume_start, _) = take(volume_offset)(section)?;
            let (_, volume) = LnkVolume::parse_volume(volume_start)?;
            lnk_location.volume = Some(volume);
        } else if location == LOCATION_NETWORK && network_offset != no_table {
            let (network_start, _) = take(network_offset)(section)?;
            let (_, network) = LnkNetwork::parse_network(network_start)?;
            lnk_location.network = Some(network);
        }

        Ok((remaining_input, lnk_location))
    }

    /// Read a NUL terminated path at `offset`. An offset of zero means no path
    fn read_path(section: &[u8], offset: u32) -> nom::IResult<&[u8], String> {
        let no_path = 0;
        if offset == no_path {
            return Ok((section, String::new()));
        }
        if offset as usize > section.len() {
            return Err(nom::Err::Incomplete(Needed::Unknown));
        }

        let (path_start, _) = take(offset)(section)?;
        let end_of_string = 0;
        let (input, path_data) = take_while(|b| b != end_of_string)(path_start)?;
        Ok((input, extract_utf8_string(path_data)))
    }

    pub(crate) fn location_flag(&self) -> LocationFlag {
        match self.location {
            LOCATION_LOCAL => LocationFlag::VolumeIDAndLocalBasePath,
            LOCATION_NETWORK => LocationFlag::CommonNetworkRelativeLinkAndPathSuffix,
            _ => LocationFlag::None,
        }
    }

    /// Share name and final path. Empty unless the target is on a network share
    pub(crate) fn network_path(&self) -> String {
        match &self.network {
            Some(network) if self.location == LOCATION_NETWORK => {
                format!("{}\\{}", network.share_name, self.final_path)
            }
            _ => String::new(),
        }
    }

    /// Base path joined with the final path
    pub(crate) fn target_path(&self) -> String {
        let mut target = self.base_path.clone();
        if !self.final_path.is_empty() {
            if !target.is_empty() {
                target.push('\\');
            }
            target.push_str(&self.final_path);
        }
        target
    }

    /// Append a local location section for `target`. The final path is always empty
    pub(crate) fn write_local(buffer: &mut ByteBuffer, target: &str) -> Result<(), LnkError> {
        // Base path NUL and final path NUL
        let terminators = 2;
        let total = LOCATION_HEADER_SIZE as usize
            + LOCAL_VOLUME_SIZE as usize
            + target.len()
            + terminators;

        let size = match u32::try_from(total) {
            Ok(result) => result,
            Err(_err) => {
                error!("[shortcuts] Target path too large for location info: {total} bytes");
                return Err(LnkError::UnsupportedPath);
            }
        };

        let base_path_offset = LOCATION_HEADER_SIZE + LOCAL_VOLUME_SIZE;
        let no_network = 0;

        buffer.append_u32(size);
        buffer.append_u32(LOCATION_HEADER_SIZE);
        buffer.append_u32(LOCATION_LOCAL);
        buffer.append_u32(LOCATION_HEADER_SIZE);
        buffer.append_u32(base_path_offset);
        buffer.append_u32(no_network);
        // Points at the last byte of the section, the empty final path
        buffer.append_u32(size - 1);

        LnkVolume::write_local(buffer);
        buffer.append_bytes(target.as_bytes());
        buffer.append_u8(0);
        buffer.append_u8(0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::LnkLocation;
    use crate::utils::buffer::ByteBuffer;
    use common::windows::{DriveType, LocationFlag};

    #[test]
    fn test_parse_location() {
        let test = [
            101, 0, 0, 0, 28, 0, 0, 0, 1, 0, 0, 0, 28, 0, 0, 0, 45, 0, 0, 0, 0, 0, 0, 0, 100, 0, 0,
            0, 17, 0, 0, 0, 3, 0, 0, 0, 62, 147, 144, 66, 16, 0, 0, 0, 0, 67, 58, 92, 85, 115, 101,
            114, 115, 92, 98, 111, 98, 92, 80, 114, 111, 106, 101, 99, 116, 115, 92, 97, 114, 116,
            101, 109, 105, 115, 45, 99, 111, 114, 101, 92, 115, 114, 99, 92, 102, 105, 108, 101,
            115, 121, 115, 116, 101, 109, 92, 110, 116, 102, 115, 0, 0,
        ];

        let (input, results) = LnkLocation::parse_location(&test).unwrap();
        assert!(input.is_empty());
        assert_eq!(results.size, 101);
        assert_eq!(results.end_offset, 28);
        assert_eq!(results.location_flag(), LocationFlag::VolumeIDAndLocalBasePath);
        assert_eq!(results.volume_offset, 28);
        assert_eq!(results.base_path_offset, 45);
        assert_eq!(results.network_offset, 0);
        assert_eq!(results.final_path_offset, 100);
        assert_eq!(
            results.base_path,
            "C:\\Users\\bob\\Projects\\artemis-core\\src\\filesystem\\ntfs"
        );
        assert_eq!(results.final_path, "");
        assert_eq!(results.target_path(), results.base_path);
        assert_eq!(results.network_path(), "");

        let volume = results.volume.unwrap();
        assert_eq!(volume.drive_type, DriveType::DriveFixed);
        assert_eq!(volume.drive_serial, "4290933E");
        assert!(results.network.is_none());
    }

    #[test]
    fn test_parse_network_location() {
        let test = [
            64, 0, 0, 0, 28, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 28, 0, 0, 0, 59, 0, 0, 0,
            31, 0, 0, 0, 2, 0, 0, 0, 20, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 92, 92, 115, 101, 114,
            118, 101, 114, 92, 115, 104, 97, 46, 116, 0, 0,
        ];

        let (_, results) = LnkLocation::parse_location(&test).unwrap();
        assert_eq!(
            results.location_flag(),
            LocationFlag::CommonNetworkRelativeLinkAndPathSuffix
        );
        assert!(results.volume.is_none());
        assert_eq!(results.network.as_ref().unwrap().share_name, "\\\\server\\sh");
        assert_eq!(results.final_path, "a.t");
        assert_eq!(results.network_path(), "\\\\server\\sh\\a.t");
        assert_eq!(results.target_path(), "a.t");
    }

    #[test]
    fn test_parse_location_bad_offset() {
        let mut test = vec![
            30, 0, 0, 0, 28, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 28, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            65, 0,
        ];
        let (_, results) = LnkLocation::parse_location(&test).unwrap();
        assert_eq!(results.base_path, "A");
        assert_eq!(results.location_flag(), LocationFlag::None);

        // Offset equal to the length is an empty path
        test[16] = 30;
        let (_, results) = LnkLocation::parse_location(&test).unwrap();
        assert_eq!(results.base_path, "");

        // Offset past the length
        test[16] = 31;
        assert!(LnkLocation::parse_location(&test).is_err());

        // Declared length shorter than the header
        assert!(LnkLocation::parse_location(&[20, 0, 0, 0, 28, 0, 0, 0]).is_err());
    }

    #[test]
    fn test_write_local() {
        let mut buffer = ByteBuffer::new();
        let target = "C:\\Windows\\notepad.exe";
        LnkLocation::write_local(&mut buffer, target).unwrap();
        assert_eq!(buffer.len(), 28 + 17 + target.len() + 2);

        let (_, results) = LnkLocation::parse_location(buffer.as_slice()).unwrap();
        assert_eq!(results.size as usize, buffer.len());
        assert_eq!(results.end_offset, 28);
        assert_eq!(results.volume_offset, 28);
        assert_eq!(results.base_path_offset, 45);
        assert_eq!(results.network_offset, 0);
        // Final path points at the last byte and is always empty
        assert_eq!(results.final_path_offset, results.size - 1);
        assert_eq!(results.final_path, "");
        assert_eq!(results.base_path, target);
        assert_eq!(
            results.volume.unwrap().drive_type,
            DriveType::DriveFixed
        );
    }
}
