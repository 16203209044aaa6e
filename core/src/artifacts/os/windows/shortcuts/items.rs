use super::{error::LnkError, strings::decode_wide_units};
use crate::utils::{
    buffer::ByteBuffer,
    nom_helper::{nom_unsigned_one_byte, nom_unsigned_two_bytes, Endian},
    strings::extract_utf8_string,
};
use byteorder::{ByteOrder, LittleEndian};
use common::windows::ItemType;
use log::error;
use nom::{
    bytes::complete::{take, take_while},
    Needed,
};

pub(crate) const COMPUTER_TYPE: u8 = 0x1f;
pub(crate) const DRIVE_TYPE: u8 = 0x2f;
pub(crate) const FOLDER_TYPE: u8 = 0x31;
pub(crate) const FILE_TYPE: u8 = 0x32;

/// "My Computer" root item. Always the first item written
pub(crate) const COMPUTER_ITEM: [u8; 20] = [
    0x14, 0x00, 0x1f, 0x50, 0xe0, 0x4f, 0xd0, 0x20, 0xea, 0x3a, 0x69, 0x10, 0xa2, 0xd8, 0x08, 0x00,
    0x2b, 0x30, 0x30, 0x9d,
];

/// Drive item. Byte 3 holds the drive letter
const DRIVE_ITEM: [u8; 25] = [
    0x19, 0x00, 0x2f, b'C', b':', b'\\', 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Drive item for network paths
const UNC_ITEM: [u8; 25] = [
    0x19, 0x00, 0x2f, b'\\', b'\\', 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// A decoded target ID item
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LnkItem {
    pub(crate) size: u16,
    pub(crate) type_id: u8,
    pub(crate) item_type: ItemType,
    /**Drive root for drive items, 8.3 name for folders and files */
    pub(crate) short_name: String,
    pub(crate) long_name: String,
}

pub(crate) fn drive_item(letter: u8) -> [u8; 25] {
    let mut item = DRIVE_ITEM;
    item[3] = letter.to_ascii_uppercase();
    item
}

pub(crate) fn unc_item() -> [u8; 25] {
    UNC_ITEM
}

/// Build a folder or file item. Both size fields are patched after the names are written
pub(crate) fn create_file_item(
    short_name: &str,
    long_name: &str,
    is_directory: bool,
) -> Result<ByteBuffer, LnkError> {
    let (type_id, marker, attributes) = if is_directory {
        (FOLDER_TYPE, 0x0e, 0x10)
    } else {
        (FILE_TYPE, 0x13, 0x20)
    };

    let mut item = ByteBuffer::new();
    item.append_u16(0);
    item.append_u8(type_id);
    item.append_bytes(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x3a, 0x3e, marker, 0x6b]);
    item.append_u16(attributes);
    item.append_bytes(short_name.as_bytes());
    item.append_u8(0);
    // Padding
    item.append_u8(0);

    let extension = create_extension_block(long_name, marker)?;
    item.append_bytes(extension.as_slice());

    patch_size(&mut item)?;
    Ok(item)
}

/// The extension sub-record carries the long name as UTF-16
fn create_extension_block(long_name: &str, marker: u8) -> Result<ByteBuffer, LnkError> {
    let mut block = ByteBuffer::new();
    block.append_u16(0);
    block.append_bytes(&[
        0x03, 0x00, 0x04, 0x00, 0xef, 0xbe, 0x3a, 0x3e, marker, 0x6b, 0x3a, 0x3e, marker, 0x6b,
        0x14, 0x00, 0x00, 0x00,
    ]);
    for unit in long_name.encode_utf16() {
        block.append_u16(unit);
    }
    block.append_u16(0);
    block.append_bytes(&[0x18, 0x00]);

    patch_size(&mut block)?;
    Ok(block)
}

/// Overwrite the leading u16 with the final length
fn patch_size(data: &mut ByteBuffer) -> Result<(), LnkError> {
    let size = match u16::try_from(data.len()) {
        Ok(result) => result,
        Err(_err) => {
            error!("[shortcuts] Item too large: {} bytes", data.len());
            return Err(LnkError::UnsupportedPath);
        }
    };
    if !data.patch_u16(0, size) {
        return Err(LnkError::UnsupportedPath);
    }
    Ok(())
}

/// Parse one item. `data` must start at the item size and contain only this item
pub(crate) fn parse_item(data: &[u8]) -> nom::IResult<&[u8], LnkItem> {
    let (input, size) = nom_unsigned_two_bytes(data, Endian::Le)?;
    let (input, type_id) = nom_unsigned_one_byte(input, Endian::Le)?;

    let mut item = LnkItem {
        size,
        type_id,
        item_type: ItemType::Unknown,
        short_name: String::new(),
        long_name: String::new(),
    };

    match type_id {
        COMPUTER_TYPE => item.item_type = ItemType::Computer,
        DRIVE_TYPE => {
            item.item_type = ItemType::Drive;
            let (_, root) = take_while(|b| b != 0)(input)?;
            item.short_name = extract_utf8_string(root);
        }
        FOLDER_TYPE | FILE_TYPE => {
            item.item_type = if type_id == FOLDER_TYPE {
                ItemType::Folder
            } else {
                ItemType::File
            };
            let (_, (short_name, long_name)) = parse_names(data)?;
            item.short_name = short_name;
            item.long_name = long_name;
        }
        _ => {}
    }

    Ok((input, item))
}

/// Get the 8.3 name and the long name of a folder or file item
fn parse_names(item: &[u8]) -> nom::IResult<&[u8], (String, String)> {
    let header_size: u8 = 14;
    let (name_start, _) = take(header_size)(item)?;
    let (remaining, short_data) = take_while(|b| b != 0)(name_start)?;
    // The NUL has to be inside the item too
    let (_, _) = take(1u8)(remaining)?;

    let short_end = item.len() - remaining.len() + 1;
    let (input, long_name) = scan_long_name(item, short_end)?;

    Ok((input, (extract_utf8_string(short_data), long_name)))
}

/// Find the long name by walking backward from the end of the item to the preceding zero unit.
/// The walk never goes below `lower_bound`, the first byte after the 8.3 name
fn scan_long_name(item: &[u8], lower_bound: usize) -> nom::IResult<&[u8], String> {
    // Last character, NUL character and the 2 byte tail
    let tail_size = 6;
    if item.len() < lower_bound + tail_size {
        return Err(nom::Err::Incomplete(Needed::Unknown));
    }

    let wide_size = 2;
    let mut position = item.len() - tail_size;
    loop {
        let unit = LittleEndian::read_u16(&item[position..position + wide_size]);
        if unit == 0 {
            break;
        }
        if position < lower_bound + wide_size {
            return Err(nom::Err::Incomplete(Needed::Unknown));
        }
        position -= wide_size;
    }

    let name_start = position + wide_size;
    let name_end = item.len() - wide_size;
    let name_data = &item[name_start..name_end];

    let mut units = Vec::new();
    for chunk in name_data.chunks_exact(wide_size) {
        let unit = LittleEndian::read_u16(chunk);
        if unit == 0 {
            break;
        }
        units.push(unit);
    }

    Ok((&item[name_end..], decode_wide_units(&units)))
}

#[cfg(test)]
mod tests {
    use super::{
        create_file_item, drive_item, parse_item, unc_item, COMPUTER_ITEM, FILE_TYPE, FOLDER_TYPE,
    };
    use common::windows::ItemType;

    #[test]
    fn test_drive_items() {
        let item = drive_item(b'd');
        assert_eq!(&item[..6], &[0x19, 0x00, 0x2f, b'D', b':', b'\\']);
        assert!(item[6..].iter().all(|b| *b == 0));

        let (_, result) = parse_item(&item).unwrap();
        assert_eq!(result.item_type, ItemType::Drive);
        assert_eq!(result.short_name, "D:\\");

        let (_, result) = parse_item(&unc_item()).unwrap();
        assert_eq!(result.short_name, "\\\\");
    }

    #[test]
    fn test_computer_item() {
        let (_, result) = parse_item(&COMPUTER_ITEM).unwrap();
        assert_eq!(result.item_type, ItemType::Computer);
        assert_eq!(result.size, 20);
        assert!(result.short_name.is_empty());
    }

    #[test]
    fn test_create_file_item() {
        let item = create_file_item("HISTORY.TXT", "History.txt", false).unwrap();
        let data = item.as_slice();

        // 14 + 11 + 1 + 1 + 20 + 11 * 2 + 2 + 2
        assert_eq!(data.len(), 73);
        assert_eq!(&data[..2], &[73, 0]);
        assert_eq!(data[2], FILE_TYPE);
        assert_eq!(&data[12..14], &[0x20, 0x00]);
        // Extension block starts after the 8.3 name, NUL and padding
        assert_eq!(&data[27..29], &[46, 0]);
        assert_eq!(&data[29..35], &[0x03, 0x00, 0x04, 0x00, 0xef, 0xbe]);
        assert_eq!(&data[71..], &[0x18, 0x00]);

        let (_, result) = parse_item(data).unwrap();
        assert_eq!(result.item_type, ItemType::File);
        assert_eq!(result.short_name, "HISTORY.TXT");
        assert_eq!(result.long_name, "History.txt");
    }

    #[test]
    fn test_create_folder_item() {
        let item = create_file_item("PROGRA~1", "Program Files", true).unwrap();
        let (_, result) = parse_item(item.as_slice()).unwrap();
        assert_eq!(result.type_id, FOLDER_TYPE);
        assert_eq!(result.item_type, ItemType::Folder);
        assert_eq!(result.short_name, "PROGRA~1");
        assert_eq!(result.long_name, "Program Files");
        assert_eq!(&item.as_slice()[12..14], &[0x10, 0x00]);
    }

    #[test]
    fn test_parse_item_wide_long_name() {
        let item = create_file_item("7D8C~1", "日本語のファイル", true).unwrap();
        let (_, result) = parse_item(item.as_slice()).unwrap();
        assert_eq!(result.long_name, "日本語のファイル");
    }

    #[test]
    fn test_parse_item_corrupted_scan() {
        let item = create_file_item("DATA", "data", false).unwrap();
        let mut data = item.as_slice().to_vec();

        // Remove every zero unit between the 8.3 name and the long name
        let short_end = 14 + 4 + 1;
        let long_start = data.len() - 2 - 2 - 8;
        for value in data.iter_mut().take(long_start).skip(short_end) {
            *value = 0x41;
        }
        assert!(parse_item(&data).is_err());
    }

    #[test]
    fn test_parse_item_truncated() {
        let item = create_file_item("DATA", "data", false).unwrap();
        assert!(parse_item(&item.as_slice()[..16]).is_err());
        assert!(parse_item(&[0x05, 0x00]).is_err());
    }

    #[test]
    fn test_parse_unknown_item() {
        let test = [0x06, 0x00, 0x74, 0x01, 0x02, 0x03];
        let (_, result) = parse_item(&test).unwrap();
        assert_eq!(result.item_type, ItemType::Unknown);
        assert_eq!(result.type_id, 0x74);
    }
}
