use crate::utils::{
    buffer::ByteBuffer,
    nom_helper::{
        nom_unsigned_eight_bytes, nom_unsigned_four_bytes, nom_unsigned_one_byte,
        nom_unsigned_two_bytes, Endian,
    },
    time::filetime_to_unixepoch,
    uuid::format_guid_le_bytes,
};
use common::windows::{AttributeFlags, DataFlags, HotKey, LinkRecord};
use nom::bytes::complete::take;
use std::mem::size_of;

/// Size of the fixed `Shortcut` header. Also the first four bytes of every `Shortcut`
pub(crate) const HEADER_SIZE: u32 = 0x4c;
/// 00021401-0000-0000-c000-000000000046 in on-disk byte order
pub(crate) const LINK_CLSID: [u8; 16] = [
    0x01, 0x14, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0xc0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x46,
];

/// Link flags as stored in the header
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct LinkFlags {
    pub(crate) bits: u32,
}

impl LinkFlags {
    pub(crate) const HAS_TARGET_ID_LIST: u32 = 0x1;
    pub(crate) const HAS_LINK_INFO: u32 = 0x2;
    pub(crate) const HAS_NAME: u32 = 0x4;
    pub(crate) const HAS_RELATIVE_PATH: u32 = 0x8;
    pub(crate) const HAS_WORKING_DIRECTORY: u32 = 0x10;
    pub(crate) const HAS_ARGUMENTS: u32 = 0x20;
    pub(crate) const HAS_ICON_LOCATION: u32 = 0x40;
    pub(crate) const IS_UNICODE: u32 = 0x80;

    pub(crate) fn contains(&self, flag: u32) -> bool {
        (self.bits & flag) == flag
    }

    pub(crate) fn set(&mut self, flag: u32, enabled: bool) {
        if enabled {
            self.bits |= flag;
        } else {
            self.bits &= !flag;
        }
    }

    pub(crate) fn has_target_id_list(&self) -> bool {
        self.contains(LinkFlags::HAS_TARGET_ID_LIST)
    }

    pub(crate) fn has_link_info(&self) -> bool {
        self.contains(LinkFlags::HAS_LINK_INFO)
    }

    pub(crate) fn has_name(&self) -> bool {
        self.contains(LinkFlags::HAS_NAME)
    }

    pub(crate) fn has_relative_path(&self) -> bool {
        self.contains(LinkFlags::HAS_RELATIVE_PATH)
    }

    pub(crate) fn has_working_directory(&self) -> bool {
        self.contains(LinkFlags::HAS_WORKING_DIRECTORY)
    }

    pub(crate) fn has_arguments(&self) -> bool {
        self.contains(LinkFlags::HAS_ARGUMENTS)
    }

    pub(crate) fn has_icon_location(&self) -> bool {
        self.contains(LinkFlags::HAS_ICON_LOCATION)
    }

    pub(crate) fn is_unicode(&self) -> bool {
        self.contains(LinkFlags::IS_UNICODE)
    }

    /// Expand the raw bits into every flag that is set. A `Shortcut` may have multiple flags
    pub(crate) fn data_flags(&self) -> Vec<DataFlags> {
        let known = [
            (0x1, DataFlags::HasTargetIdList),
            (0x2, DataFlags::HasLinkInfo),
            (0x4, DataFlags::HasName),
            (0x8, DataFlags::HasRelativePath),
            (0x10, DataFlags::HasWorkingDirectory),
            (0x20, DataFlags::HasArguments),
            (0x40, DataFlags::HasIconLocation),
            (0x80, DataFlags::IsUnicode),
            (0x100, DataFlags::ForceNoLinkInfo),
            (0x200, DataFlags::HasExpString),
            (0x400, DataFlags::RunInSeparateProcess),
            (0x1000, DataFlags::HasDarwinId),
            (0x2000, DataFlags::RunAsUser),
            (0x4000, DataFlags::HasExpIcon),
            (0x8000, DataFlags::NoPidAlias),
            (0x20000, DataFlags::RunWithShimLayer),
            (0x40000, DataFlags::ForceNoLinkTrack),
            (0x80000, DataFlags::EnableTargetMetadata),
            (0x100000, DataFlags::DisableLinkPathTracking),
            (0x200000, DataFlags::DisableKnownFolderTracking),
            (0x400000, DataFlags::DisableKnownFolderAlias),
            (0x800000, DataFlags::AllowLinkToLink),
            (0x1000000, DataFlags::UnaliasOnSave),
            (0x2000000, DataFlags::PreferEnvironmentPath),
            (0x4000000, DataFlags::KeepLocalDListForUncTarget),
        ];

        known
            .into_iter()
            .filter(|(bit, _)| self.contains(*bit))
            .map(|(_, flag)| flag)
            .collect()
    }
}

/// File attributes of the target as stored in the header
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct FileAttributes {
    pub(crate) bits: u32,
}

impl FileAttributes {
    pub(crate) const DIRECTORY: u32 = 0x10;
    pub(crate) const ARCHIVE: u32 = 0x20;

    pub(crate) fn contains(&self, flag: u32) -> bool {
        (self.bits & flag) == flag
    }

    pub(crate) fn set(&mut self, flag: u32, enabled: bool) {
        if enabled {
            self.bits |= flag;
        } else {
            self.bits &= !flag;
        }
    }

    pub(crate) fn attribute_flags(&self) -> Vec<AttributeFlags> {
        let known = [
            (0x1, AttributeFlags::ReadOnly),
            (0x2, AttributeFlags::Hidden),
            (0x4, AttributeFlags::System),
            (0x10, AttributeFlags::Directory),
            (0x20, AttributeFlags::Archive),
            (0x40, AttributeFlags::Device),
            (0x80, AttributeFlags::Normal),
            (0x100, AttributeFlags::Temporary),
            (0x200, AttributeFlags::SparseFile),
            (0x400, AttributeFlags::ReparsePoint),
            (0x800, AttributeFlags::Compressed),
            (0x1000, AttributeFlags::Offline),
            (0x2000, AttributeFlags::NotConentIndexed),
            (0x4000, AttributeFlags::Encrypted),
            (0x10000, AttributeFlags::Virtual),
        ];

        known
            .into_iter()
            .filter(|(bit, _)| self.contains(*bit))
            .map(|(_, flag)| flag)
            .collect()
    }
}

/// What the writer knows about the target on disk
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct TargetInfo {
    pub(crate) is_directory: bool,
    pub(crate) file_size: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LnkHeader {
    /**Should always be 0x4c (76) */
    pub(crate) size: u32,
    pub(crate) class_id: [u8; 16],
    pub(crate) flags: LinkFlags,
    pub(crate) attributes: FileAttributes,
    pub(crate) created: u64,
    pub(crate) accessed: u64,
    pub(crate) modified: u64,
    pub(crate) file_size: u32,
    pub(crate) icon_index: u32,
    pub(crate) show_command: u32,
    pub(crate) hotkey: HotKey,
    reserved: u16,
    reserved2: u32,
    reserved3: u32,
}

impl LnkHeader {
    /// Parse the `Shortcut` file header. Contains the section flags and target metadata
    pub(crate) fn parse_header(data: &[u8]) -> nom::IResult<&[u8], LnkHeader> {
        let (input, size) = nom_unsigned_four_bytes(data, Endian::Le)?;
        let (input, guid_data) = take(size_of::<u128>())(input)?;
        let (input, flags) = nom_unsigned_four_bytes(input, Endian::Le)?;
        let (input, attributes) = nom_unsigned_four_bytes(input, Endian::Le)?;

        let (input, created) = nom_unsigned_eight_bytes(input, Endian::Le)?;
        let (input, accessed) = nom_unsigned_eight_bytes(input, Endian::Le)?;
        let (input, modified) = nom_unsigned_eight_bytes(input, Endian::Le)?;

        let (input, file_size) = nom_unsigned_four_bytes(input, Endian::Le)?;
        let (input, icon_index) = nom_unsigned_four_bytes(input, Endian::Le)?;
        let (input, show_command) = nom_unsigned_four_bytes(input, Endian::Le)?;
        let (input, key_code) = nom_unsigned_one_byte(input, Endian::Le)?;
        let (input, modifiers) = nom_unsigned_one_byte(input, Endian::Le)?;

        let (input, reserved) = nom_unsigned_two_bytes(input, Endian::Le)?;
        let (input, reserved2) = nom_unsigned_four_bytes(input, Endian::Le)?;
        let (input, reserved3) = nom_unsigned_four_bytes(input, Endian::Le)?;

        let mut class_id = [0; 16];
        class_id.copy_from_slice(guid_data);

        let header = LnkHeader {
            size,
            class_id,
            flags: LinkFlags { bits: flags },
            attributes: FileAttributes { bits: attributes },
            created,
            accessed,
            modified,
            file_size,
            icon_index,
            show_command,
            hotkey: HotKey {
                key_code,
                modifiers,
            },
            reserved,
            reserved2,
            reserved3,
        };

        Ok((input, header))
    }

    /// Check the signature size and format GUID
    pub(crate) fn check_header(data: &[u8]) -> bool {
        let result = LnkHeader::parse_header(data);
        match result {
            Ok((_, header)) => header.size == HEADER_SIZE && header.class_id == LINK_CLSID,
            Err(_) => false,
        }
    }

    /// Build the header for a new `Shortcut`. Flags follow the non-empty record fields
    pub(crate) fn create(record: &LinkRecord, target: &TargetInfo, show_command: u32) -> LnkHeader {
        let mut flags = LinkFlags::default();
        // Both sections are always written
        flags.set(LinkFlags::HAS_TARGET_ID_LIST, true);
        flags.set(LinkFlags::HAS_LINK_INFO, true);
        flags.set(LinkFlags::HAS_NAME, !record.description.is_empty());
        flags.set(LinkFlags::HAS_RELATIVE_PATH, !record.relative_path.is_empty());
        flags.set(
            LinkFlags::HAS_WORKING_DIRECTORY,
            !record.working_directory.is_empty(),
        );
        flags.set(LinkFlags::HAS_ARGUMENTS, !record.arguments.is_empty());
        flags.set(
            LinkFlags::HAS_ICON_LOCATION,
            !record.icon.filename.is_empty(),
        );
        flags.set(LinkFlags::IS_UNICODE, true);

        let mut attributes = FileAttributes::default();
        attributes.set(FileAttributes::DIRECTORY, target.is_directory);
        attributes.set(FileAttributes::ARCHIVE, true);

        let icon_index = if record.icon.filename.is_empty() {
            0
        } else {
            record.icon.index
        };

        let no_time = 0;
        LnkHeader {
            size: HEADER_SIZE,
            class_id: LINK_CLSID,
            flags,
            attributes,
            created: no_time,
            accessed: no_time,
            modified: no_time,
            file_size: target.file_size,
            icon_index,
            show_command,
            hotkey: record.hotkey,
            reserved: 0,
            reserved2: 0,
            reserved3: 0,
        }
    }

    /// Append the 76 byte header
    pub(crate) fn write(&self, buffer: &mut ByteBuffer) {
        buffer.append_u32(self.size);
        buffer.append_bytes(&self.class_id);
        buffer.append_u32(self.flags.bits);
        buffer.append_u32(self.attributes.bits);
        buffer.append_u64(self.created);
        buffer.append_u64(self.accessed);
        buffer.append_u64(self.modified);
        buffer.append_u32(self.file_size);
        buffer.append_u32(self.icon_index);
        buffer.append_u32(self.show_command);
        buffer.append_u8(self.hotkey.key_code);
        buffer.append_u8(self.hotkey.modifiers);
        buffer.append_u16(self.reserved);
        buffer.append_u32(self.reserved2);
        buffer.append_u32(self.reserved3);
    }

    pub(crate) fn class_id_string(&self) -> String {
        format_guid_le_bytes(&self.class_id)
    }

    pub(crate) fn created_unixepoch(&self) -> i64 {
        filetime_to_unixepoch(&self.created)
    }

    pub(crate) fn accessed_unixepoch(&self) -> i64 {
        filetime_to_unixepoch(&self.accessed)
    }

    pub(crate) fn modified_unixepoch(&self) -> i64 {
        filetime_to_unixepoch(&self.modified)
    }
}

#[cfg(test)]
mod tests {
    use super::{FileAttributes, LinkFlags, LnkHeader, TargetInfo, HEADER_SIZE, LINK_CLSID};
    use crate::utils::buffer::ByteBuffer;
    use common::windows::{AttributeFlags, DataFlags, HotKey, LinkIcon, LinkRecord};

    const TEST_HEADER: [u8; 76] = [
        76, 0, 0, 0, 1, 20, 2, 0, 0, 0, 0, 0, 192, 0, 0, 0, 0, 0, 0, 70, 139, 0, 32, 0, 16, 0, 0,
        0, 230, 35, 108, 77, 41, 239, 216, 1, 66, 63, 211, 253, 148, 11, 217, 1, 159, 47, 36, 163,
        148, 11, 217, 1, 0, 16, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    ];

    #[test]
    fn test_parse_header() {
        let (input, result) = LnkHeader::parse_header(&TEST_HEADER).unwrap();
        assert!(input.is_empty());
        assert_eq!(result.size, 76);
        assert_eq!(result.class_id_string(), "00021401-0000-0000-c000-000000000046");
        assert_eq!(result.created_unixepoch(), 1667441367);
        assert_eq!(result.accessed_unixepoch(), 1670566252);
        assert_eq!(result.modified_unixepoch(), 1670566100);
        assert_eq!(result.file_size, 4096);
        assert_eq!(result.show_command, 1);
        assert_eq!(
            result.flags.data_flags(),
            vec![
                DataFlags::HasTargetIdList,
                DataFlags::HasLinkInfo,
                DataFlags::HasRelativePath,
                DataFlags::IsUnicode,
                DataFlags::DisableKnownFolderTracking
            ]
        );
        assert_eq!(
            result.attributes.attribute_flags(),
            vec![AttributeFlags::Directory]
        );
    }

    #[test]
    fn test_check_header() {
        assert!(LnkHeader::check_header(&TEST_HEADER));

        let mut bad_size = TEST_HEADER;
        bad_size[0] = 75;
        assert!(!LnkHeader::check_header(&bad_size));

        let mut bad_guid = TEST_HEADER;
        bad_guid[19] = 0x47;
        assert!(!LnkHeader::check_header(&bad_guid));

        assert!(!LnkHeader::check_header(&TEST_HEADER[..75]));
        assert!(!LnkHeader::check_header(&[0; 10]));
    }

    #[test]
    fn test_link_flags() {
        let mut flags = LinkFlags::default();
        flags.set(LinkFlags::HAS_ARGUMENTS, true);
        flags.set(LinkFlags::IS_UNICODE, true);
        assert!(flags.has_arguments());
        assert!(flags.is_unicode());
        assert!(!flags.has_name());
        assert_eq!(flags.bits, 0xa0);

        flags.set(LinkFlags::HAS_ARGUMENTS, false);
        assert_eq!(flags.bits, 0x80);
        assert_eq!(flags.data_flags(), vec![DataFlags::IsUnicode]);
    }

    #[test]
    fn test_create_header() {
        let record = LinkRecord {
            target: String::from("C:\\Windows\\notepad.exe"),
            arguments: String::from("test.txt"),
            icon: LinkIcon {
                filename: String::from("C:\\Windows\\notepad.exe"),
                index: 2,
            },
            hotkey: HotKey {
                key_code: 0x74,
                modifiers: 0x6,
            },
            ..Default::default()
        };
        let target = TargetInfo {
            is_directory: false,
            file_size: 1024,
        };

        let header = LnkHeader::create(&record, &target, 1);
        assert!(header.flags.has_target_id_list());
        assert!(header.flags.has_link_info());
        assert!(header.flags.has_arguments());
        assert!(header.flags.has_icon_location());
        assert!(header.flags.is_unicode());
        assert!(!header.flags.has_name());
        assert!(!header.flags.has_working_directory());
        assert!(!header.flags.has_relative_path());
        assert_eq!(header.attributes.bits, FileAttributes::ARCHIVE);
        assert!(!header.attributes.contains(FileAttributes::DIRECTORY));

        let mut buffer = ByteBuffer::new();
        header.write(&mut buffer);
        assert_eq!(buffer.len(), HEADER_SIZE as usize);
        assert_eq!(&buffer.as_slice()[4..20], &LINK_CLSID);

        let (_, result) = LnkHeader::parse_header(buffer.as_slice()).unwrap();
        assert_eq!(result, header);
        assert_eq!(result.icon_index, 2);
        assert_eq!(result.file_size, 1024);
        assert_eq!(result.hotkey.description(), "CTRL + ALT + F5");
    }

    #[test]
    fn test_create_header_icon_index_without_filename() {
        let record = LinkRecord {
            icon: LinkIcon {
                filename: String::new(),
                index: 7,
            },
            ..Default::default()
        };
        let target = TargetInfo {
            is_directory: true,
            file_size: 0,
        };
        let header = LnkHeader::create(&record, &target, 3);
        assert_eq!(header.icon_index, 0);
        assert_eq!(header.show_command, 3);
        assert!(header.attributes.contains(FileAttributes::DIRECTORY));
        assert_eq!(
            header.attributes.attribute_flags(),
            vec![AttributeFlags::Directory, AttributeFlags::Archive]
        );
    }
}
