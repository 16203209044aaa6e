use crate::filesystem::{error::FileSystemError, files::read_file};
use byteorder::{ByteOrder, LittleEndian};
use std::mem::size_of;

/// Owned, growable byte sequence. All `Shortcut` data is assembled here before anything touches disk
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct ByteBuffer {
    data: Vec<u8>,
}

impl ByteBuffer {
    pub(crate) fn new() -> ByteBuffer {
        ByteBuffer { data: Vec::new() }
    }

    /// Load a whole file into a new buffer
    pub(crate) fn load_file(path: &str) -> Result<ByteBuffer, FileSystemError> {
        let data = read_file(path)?;
        Ok(ByteBuffer { data })
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub(crate) fn append_u8(&mut self, value: u8) {
        self.data.push(value);
    }

    pub(crate) fn append_u16(&mut self, value: u16) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    pub(crate) fn append_u32(&mut self, value: u32) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    pub(crate) fn append_u64(&mut self, value: u64) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    pub(crate) fn append_bytes(&mut self, value: &[u8]) {
        self.data.extend_from_slice(value);
    }

    /// Overwrite a u16 that was already appended at `offset`. Returns false if `offset` is past the end
    pub(crate) fn patch_u16(&mut self, offset: usize, value: u16) -> bool {
        let end = offset + size_of::<u16>();
        if end > self.data.len() {
            return false;
        }
        LittleEndian::write_u16(&mut self.data[offset..end], value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::ByteBuffer;
    use std::path::PathBuf;

    #[test]
    fn test_append() {
        let mut buffer = ByteBuffer::new();
        buffer.append_u8(0x2f);
        buffer.append_u16(0x19);
        buffer.append_u32(76);
        buffer.append_u64(1);
        buffer.append_bytes(b"C:");
        assert_eq!(buffer.len(), 17);
        assert_eq!(
            buffer.as_slice(),
            [0x2f, 0x19, 0, 76, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, b'C', b':']
        );
    }

    #[test]
    fn test_patch_u16() {
        let mut buffer = ByteBuffer::new();
        buffer.append_u16(0);
        buffer.append_u8(0x31);
        assert!(buffer.patch_u16(0, 300));
        assert_eq!(buffer.into_bytes(), vec![44, 1, 0x31]);
    }

    #[test]
    fn test_patch_u16_out_of_bounds() {
        let mut buffer = ByteBuffer::new();
        buffer.append_u8(1);
        assert!(!buffer.patch_u16(0, 300));
        assert_eq!(buffer.as_slice(), [1]);
    }

    #[test]
    fn test_load_file() {
        let mut test_location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        test_location.push("tests/test_data/lnk.toml");

        let buffer = ByteBuffer::load_file(&test_location.display().to_string()).unwrap();
        assert!(buffer.len() > 10);
    }
}
