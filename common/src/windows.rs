use serde::{Deserialize, Serialize};

/**
 * Description of a `Shortcut` (lnk) file. Returned when parsing `Shortcut` data and
 * provided by callers when creating a new `Shortcut` file
 */
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    /**Full path the `Shortcut` points to */
    pub target: String,
    /**Network share path. Only populated from network `Shortcut` data */
    pub network_path: String,
    pub arguments: String,
    pub description: String,
    pub relative_path: String,
    pub working_directory: String,
    pub icon: LinkIcon,
    pub hotkey: HotKey,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkIcon {
    pub filename: String,
    pub index: u32,
}

/**
 * Keyboard shortcut stored in the `Shortcut` header
 * `key_code`: virtual key code (0-9, A-Z, F1-F12, NumLock, ScrollLock)
 * `modifiers`: combination of `HOTKEY_SHIFT`, `HOTKEY_CONTROL`, `HOTKEY_ALT`
 */
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HotKey {
    pub key_code: u8,
    pub modifiers: u8,
}

pub const HOTKEY_SHIFT: u8 = 0x1;
pub const HOTKEY_CONTROL: u8 = 0x2;
pub const HOTKEY_ALT: u8 = 0x4;

impl HotKey {
    /// Describe the hotkey, ex: `CTRL + ALT + F5`
    pub fn description(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if (self.modifiers & HOTKEY_CONTROL) == HOTKEY_CONTROL {
            parts.push(String::from("CTRL +"));
        }
        if (self.modifiers & HOTKEY_ALT) == HOTKEY_ALT {
            parts.push(String::from("ALT +"));
        }
        if (self.modifiers & HOTKEY_SHIFT) == HOTKEY_SHIFT {
            parts.push(String::from("SHIFT +"));
        }

        let f1 = 0x70;
        let f12 = 0x7b;
        let num_lock = 0x90;
        let scroll_lock = 0x91;

        let key = match self.key_code {
            0x30..=0x39 | 0x41..=0x5a => (self.key_code as char).to_string(),
            code if (f1..=f12).contains(&code) => format!("F{}", code - f1 + 1),
            code if code == num_lock => String::from("NumLock"),
            code if code == scroll_lock => String::from("ScrollLock"),
            _ => String::new(),
        };
        if !key.is_empty() {
            parts.push(key);
        }

        parts.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DataFlags {
    HasTargetIdList,
    HasLinkInfo,
    HasName,
    HasRelativePath,
    HasWorkingDirectory,
    HasArguments,
    HasIconLocation,
    IsUnicode,
    ForceNoLinkInfo,
    HasExpString,
    RunInSeparateProcess,
    HasDarwinId,
    RunAsUser,
    HasExpIcon,
    NoPidAlias,
    RunWithShimLayer,
    ForceNoLinkTrack,
    EnableTargetMetadata,
    DisableLinkPathTracking,
    DisableKnownFolderTracking,
    DisableKnownFolderAlias,
    AllowLinkToLink,
    UnaliasOnSave,
    PreferEnvironmentPath,
    KeepLocalDListForUncTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AttributeFlags {
    ReadOnly,
    Hidden,
    System,
    Directory,
    Archive,
    Device,
    Normal,
    Temporary,
    SparseFile,
    ReparsePoint,
    Compressed,
    Offline,
    NotConentIndexed,
    Encrypted,
    Virtual,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LocationFlag {
    VolumeIDAndLocalBasePath,
    CommonNetworkRelativeLinkAndPathSuffix,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DriveType {
    DriveUnknown,
    DriveNotRootDir,
    DriveRemovable,
    DriveFixed,
    DriveRemote,
    DriveCdrom,
    DriveRamdisk,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ItemType {
    Computer,
    Drive,
    Folder,
    File,
    Unknown,
}

/// Structured view of every section found in `Shortcut` data
#[derive(Debug, PartialEq, Serialize)]
pub struct LinkDetails {
    pub header: HeaderDetails,
    pub items: Vec<ItemDetails>,
    pub location: Option<LocationDetails>,
    pub description: String,
    pub relative_path: String,
    pub working_directory: String,
    pub arguments: String,
    pub icon_location: String,
    pub extra_blocks: Vec<ExtraBlock>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct HeaderDetails {
    pub header_size: u32,
    pub class_id: String,
    pub data_flags: Vec<DataFlags>,
    pub attribute_flags: Vec<AttributeFlags>,
    /**Raw FILETIME values */
    pub created_filetime: u64,
    pub accessed_filetime: u64,
    pub modified_filetime: u64,
    /**Unixepoch seconds */
    pub created: i64,
    pub accessed: i64,
    pub modified: i64,
    pub file_size: u32,
    pub icon_index: u32,
    pub show_command: u32,
    pub hotkey: HotKey,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct ItemDetails {
    pub size: u16,
    pub type_id: u8,
    pub item_type: ItemType,
    /**Drive root for drive items, 8.3 name for folder and file items */
    pub short_name: String,
    pub long_name: String,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct LocationDetails {
    pub length: u32,
    pub end_offset: u32,
    pub location_flag: LocationFlag,
    pub volume_offset: u32,
    pub base_path_offset: u32,
    pub network_offset: u32,
    pub final_path_offset: u32,
    pub base_path: String,
    pub final_path: String,
    pub volume: Option<VolumeDetails>,
    pub network: Option<NetworkDetails>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct VolumeDetails {
    pub length: u32,
    pub drive_type: DriveType,
    pub drive_serial: String,
    pub label_offset: u32,
    pub volume_label: String,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct NetworkDetails {
    pub length: u32,
    pub share_name_offset: u32,
    pub share_name: String,
}

/// Extra data block that follows the `Shortcut` strings. Not interpreted
#[derive(Debug, PartialEq, Serialize)]
pub struct ExtraBlock {
    pub size: u32,
    /**Block signature as hex, ex: `A0000003` */
    pub signature: String,
}
