use crate::utils::{
    buffer::ByteBuffer,
    nom_helper::{nom_unsigned_four_bytes, Endian},
    strings::extract_utf8_string,
};
use common::windows::DriveType;
use nom::{
    bytes::complete::{take, take_while},
    Needed,
};

/// Size of the local volume table the writer emits. Label is a single NUL
pub(crate) const LOCAL_VOLUME_SIZE: u32 = 17;
const DRIVE_FIXED: u32 = 3;
const LABEL_OFFSET: u32 = 16;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LnkVolume {
    pub(crate) size: u32,
    pub(crate) drive_type: DriveType,
    pub(crate) drive_serial: String,
    pub(crate) label_offset: u32,
    pub(crate) volume_label: String,
}

impl LnkVolume {
    /// Parse the local volume table from `shortcut` data
    pub(crate) fn parse_volume(data: &[u8]) -> nom::IResult<&[u8], LnkVolume> {
        let (_, size) = nom_unsigned_four_bytes(data, Endian::Le)?;

        // Size, type, serial and label offset
        let min_size = 16;
        if size < min_size {
            return Err(nom::Err::Incomplete(Needed::Unknown));
        }
        let (remaining_input, volume_data) = take(size)(data)?;

        let (input, _) = nom_unsigned_four_bytes(volume_data, Endian::Le)?;
        let (input, drive_type) = nom_unsigned_four_bytes(input, Endian::Le)?;
        let (input, drive_serial) = nom_unsigned_four_bytes(input, Endian::Le)?;
        let (_, label_offset) = nom_unsigned_four_bytes(input, Endian::Le)?;

        let mut volume_info = LnkVolume {
            size,
            drive_type: LnkVolume::get_drive_type(drive_type),
            drive_serial: format!("{drive_serial:X}"),
            label_offset,
            volume_label: String::new(),
        };

        // The label offset should never be greater than the size
        if label_offset > volume_info.size {
            return Ok((remaining_input, volume_info));
        }

        let (volume_label_start, _) = take(label_offset)(volume_data)?;
        let (_, label_data) = take_while(|b| b != 0)(volume_label_start)?;
        volume_info.volume_label = extract_utf8_string(label_data);

        Ok((remaining_input, volume_info))
    }

    /// Append a fixed drive table with an empty label and serial number
    pub(crate) fn write_local(buffer: &mut ByteBuffer) {
        let no_serial = 0;
        buffer.append_u32(LOCAL_VOLUME_SIZE);
        buffer.append_u32(DRIVE_FIXED);
        buffer.append_u32(no_serial);
        buffer.append_u32(LABEL_OFFSET);
        buffer.append_u8(0);
    }

    /// Get drive types from `shortcut` data
    fn get_drive_type(drive_type: u32) -> DriveType {
        match drive_type {
            0 => DriveType::DriveUnknown,
            1 => DriveType::DriveNotRootDir,
            2 => DriveType::DriveRemovable,
            3 => DriveType::DriveFixed,
            4 => DriveType::DriveRemote,
            5 => DriveType::DriveCdrom,
            6 => DriveType::DriveRamdisk,
            _ => DriveType::None,
        }
    }
}
