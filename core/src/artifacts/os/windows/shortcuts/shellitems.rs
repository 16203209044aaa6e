use super::{
    error::LnkError,
    items::{create_file_item, drive_item, parse_item, unc_item, LnkItem, COMPUTER_ITEM},
    shortname::ShortPathResolver,
};
use crate::utils::{
    buffer::ByteBuffer,
    nom_helper::{nom_unsigned_two_bytes, Endian},
};
use common::windows::ItemType;
use log::error;
use nom::{bytes::complete::take, Needed};

/// Root of an absolute target path
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PathRoot {
    /**Drive letter, ex: `C` */
    Drive(u8),
    /**Network path starting with two separators */
    Unc,
    None,
}

/// Split a path into its root and the remaining elements. Both `\` and `/` are separators
pub(crate) fn split_path(path: &str) -> (PathRoot, Vec<String>) {
    let separators = ['\\', '/'];
    let mut elements: Vec<String> = path
        .split(separators)
        .filter(|element| !element.is_empty())
        .map(str::to_string)
        .collect();

    if path.starts_with("\\\\") || path.starts_with("//") {
        return (PathRoot::Unc, elements);
    }
    if path.starts_with(separators) {
        return (PathRoot::None, elements);
    }

    let drive = match elements.first() {
        Some(first) => {
            let value = first.as_bytes();
            value.len() == 2 && value[0].is_ascii_alphabetic() && value[1] == b':'
        }
        None => false,
    };
    if drive {
        let root = elements.remove(0);
        return (PathRoot::Drive(root.as_bytes()[0]), elements);
    }

    (PathRoot::None, elements)
}

/// Build the target ID list for an absolute path. Every element but the last is written as a folder
pub(crate) fn create_id_list(
    target: &str,
    resolver: &dyn ShortPathResolver,
) -> Result<ByteBuffer, LnkError> {
    let (root, long_elements) = split_path(target);
    let short_path = resolver.short_path(target);
    let (_, short_elements) = split_path(&short_path);

    let root_item = match root {
        PathRoot::Drive(letter) => drive_item(letter),
        PathRoot::Unc => unc_item(),
        PathRoot::None => {
            error!("[shortcuts] Target {target} has no drive or network root");
            return Err(LnkError::UnsupportedPath);
        }
    };

    if long_elements.is_empty() {
        error!("[shortcuts] Target {target} has nothing after the root");
        return Err(LnkError::UnsupportedPath);
    }
    if long_elements.len() != short_elements.len() {
        error!(
            "[shortcuts] Short path {short_path} does not match target {target}: {} vs {} elements",
            short_elements.len(),
            long_elements.len()
        );
        return Err(LnkError::UnsupportedPath);
    }
    if target.contains('\0') {
        error!("[shortcuts] Target contains a NUL character");
        return Err(LnkError::UnsupportedPath);
    }

    let mut list = ByteBuffer::new();
    // List size is patched at the end
    list.append_u16(0);
    list.append_bytes(&COMPUTER_ITEM);
    list.append_bytes(&root_item);

    let last = long_elements.len() - 1;
    for (index, (long_name, short_name)) in long_elements.iter().zip(short_elements.iter()).enumerate() {
        let item = create_file_item(short_name, long_name, index != last)?;
        list.append_bytes(item.as_slice());
    }

    let terminal = 0;
    list.append_u16(terminal);

    let size_field = 2;
    let list_size = match u16::try_from(list.len() - size_field) {
        Ok(result) => result,
        Err(_err) => {
            error!("[shortcuts] Target ID list for {target} is too large");
            return Err(LnkError::UnsupportedPath);
        }
    };
    if !list.patch_u16(0, list_size) {
        return Err(LnkError::UnsupportedPath);
    }

    Ok(list)
}

/// Parse the target ID list. Items are walked until the zero size terminal
pub(crate) fn parse_id_list(data: &[u8]) -> nom::IResult<&[u8], Vec<LnkItem>> {
    let (input, list_size) = nom_unsigned_two_bytes(data, Endian::Le)?;
    let (remaining_input, mut input) = take(list_size)(input)?;

    let mut items = Vec::new();
    let terminal = 0;
    // Size and type
    let min_size = 3;
    loop {
        let (_, item_size) = nom_unsigned_two_bytes(input, Endian::Le)?;
        if item_size == terminal {
            break;
        }
        if item_size < min_size {
            return Err(nom::Err::Incomplete(Needed::Unknown));
        }

        let (next_input, item_data) = take(item_size)(input)?;
        let (_, item) = parse_item(item_data)?;
        items.push(item);
        input = next_input;
    }

    Ok((remaining_input, items))
}

/// Rebuild the target path from decoded items
pub(crate) fn items_to_path(items: &[LnkItem]) -> String {
    let mut path = String::new();
    for item in items {
        match item.item_type {
            ItemType::Drive => path = item.short_name.clone(),
            ItemType::Folder | ItemType::File => {
                if path.is_empty() {
                    path.push_str(".\\");
                } else if !path.ends_with('\\') {
                    path.push('\\');
                }
                path.push_str(&item.long_name);
            }
            ItemType::Computer | ItemType::Unknown => {}
        }
    }
    path
}
