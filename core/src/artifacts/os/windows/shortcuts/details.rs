use super::{
    items::LnkItem,
    location::LnkLocation,
    shortcut::{LnkData, LnkExtraBlock},
};
use common::windows::{
    ExtraBlock, HeaderDetails, ItemDetails, LinkDetails, LocationDetails, NetworkDetails,
    VolumeDetails,
};

/// Structured dump of every decoded field
pub(crate) fn get_details(shortcut: &LnkData) -> LinkDetails {
    let header = &shortcut.header;
    LinkDetails {
        header: HeaderDetails {
            header_size: header.size,
            class_id: header.class_id_string(),
            data_flags: header.flags.data_flags(),
            attribute_flags: header.attributes.attribute_flags(),
            created_filetime: header.created,
            accessed_filetime: header.accessed,
            modified_filetime: header.modified,
            created: header.created_unixepoch(),
            accessed: header.accessed_unixepoch(),
            modified: header.modified_unixepoch(),
            file_size: header.file_size,
            icon_index: header.icon_index,
            show_command: header.show_command,
            hotkey: header.hotkey,
        },
        items: shortcut.items.iter().map(item_details).collect(),
        location: shortcut.location.as_ref().map(location_details),
        description: shortcut.description.clone(),
        relative_path: shortcut.relative_path.clone(),
        working_directory: shortcut.working_directory.clone(),
        arguments: shortcut.arguments.clone(),
        icon_location: shortcut.icon_location.clone(),
        extra_blocks: shortcut.extra_blocks.iter().map(extra_details).collect(),
    }
}

fn item_details(item: &LnkItem) -> ItemDetails {
    ItemDetails {
        size: item.size,
        type_id: item.type_id,
        item_type: item.item_type.clone(),
        short_name: item.short_name.clone(),
        long_name: item.long_name.clone(),
    }
}

fn location_details(location: &LnkLocation) -> LocationDetails {
    LocationDetails {
        length: location.size,
        end_offset: location.end_offset,
        location_flag: location.location_flag(),
        volume_offset: location.volume_offset,
        base_path_offset: location.base_path_offset,
        network_offset: location.network_offset,
        final_path_offset: location.final_path_offset,
        base_path: location.base_path.clone(),
        final_path: location.final_path.clone(),
        volume: location.volume.as_ref().map(|volume| VolumeDetails {
            length: volume.size,
            drive_type: volume.drive_type.clone(),
            drive_serial: volume.drive_serial.clone(),
            label_offset: volume.label_offset,
            volume_label: volume.volume_label.clone(),
        }),
        network: location.network.as_ref().map(|network| NetworkDetails {
            length: network.size,
            share_name_offset: network.share_name_offset,
            share_name: network.share_name.clone(),
        }),
    }
}

fn extra_details(block: &LnkExtraBlock) -> ExtraBlock {
    ExtraBlock {
        size: block.size,
        signature: format!("{:08X}", block.signature),
    }
}
