use super::error::LnkError;
use crate::utils::{
    buffer::ByteBuffer,
    nom_helper::{nom_unsigned_two_bytes, Endian},
    strings::extract_utf8_string,
};
use byteorder::{ByteOrder, LittleEndian};
use log::error;
use nom::bytes::complete::take;

/// Read one counted string from the string section. The count is in characters, not bytes
pub(crate) fn extract_string(data: &[u8], is_unicode: bool) -> nom::IResult<&[u8], String> {
    let (input, count) = nom_unsigned_two_bytes(data, Endian::Le)?;
    if !is_unicode {
        let (input, string_data) = take(count)(input)?;
        return Ok((input, extract_utf8_string(string_data)));
    }

    let wide_size = 2;
    let (input, string_data) = take(count as usize * wide_size)(input)?;
    let units: Vec<u16> = string_data
        .chunks_exact(wide_size)
        .map(LittleEndian::read_u16)
        .collect();

    Ok((input, decode_wide_units(&units)))
}

/// Decode UTF-16 units. Units below 256 are narrow characters. Anything that fails to decode keeps its low byte
pub(crate) fn decode_wide_units(units: &[u16]) -> String {
    let narrow_limit = 256;
    let mut value = String::new();
    let mut index = 0;

    while index < units.len() {
        let unit = units[index];
        if unit < narrow_limit {
            value.push(char::from(unit as u8));
            index += 1;
            continue;
        }

        // Include the next unit in case this is a surrogate pair
        let pair_end = (index + 2).min(units.len());
        let decoded = char::decode_utf16(units[index..pair_end].iter().copied()).next();
        match decoded {
            Some(Ok(character)) => {
                value.push(character);
                index += character.len_utf16();
            }
            _ => {
                value.push(char::from((unit & 0xff) as u8));
                index += 1;
            }
        }
    }
    value
}

/// Append a counted UTF-16 string
pub(crate) fn write_string(buffer: &mut ByteBuffer, value: &str) -> Result<(), LnkError> {
    let units: Vec<u16> = value.encode_utf16().collect();
    let count = match u16::try_from(units.len()) {
        Ok(result) => result,
        Err(_err) => {
            error!(
                "[shortcuts] String has {} characters, max is 65535",
                units.len()
            );
            return Err(LnkError::StringTooLarge);
        }
    };

    buffer.append_u16(count);
    for unit in units {
        buffer.append_u16(unit);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{decode_wide_units, extract_string, write_string};
    use crate::{artifacts::os::windows::shortcuts::error::LnkError, utils::buffer::ByteBuffer};

    #[test]
    fn test_extract_string() {
        let test = [
            41, 0, 46, 0, 46, 0, 92, 0, 46, 0, 46, 0, 92, 0, 46, 0, 46, 0, 92, 0, 46, 0, 46, 0, 92,
            0, 46, 0, 46, 0, 92, 0, 80, 0, 114, 0, 111, 0, 106, 0, 101, 0, 99, 0, 116, 0, 115, 0,
            92, 0, 82, 0, 117, 0, 115, 0, 116, 0, 92, 0, 97, 0, 114, 0, 116, 0, 101, 0, 109, 0,
            105, 0, 115, 0, 45, 0, 99, 0, 111, 0, 114, 0, 101, 0, 96, 0, 0, 0,
        ];
        let (input, result) = extract_string(&test, true).unwrap();
        assert_eq!(result, "..\\..\\..\\..\\..\\Projects\\Rust\\artemis-core");
        assert_eq!(input, [96, 0, 0, 0]);
    }

    #[test]
    fn test_extract_narrow_string() {
        let test = [8, 0, 116, 101, 115, 116, 46, 116, 120, 116, 1, 2];
        let (input, result) = extract_string(&test, false).unwrap();
        assert_eq!(result, "test.txt");
        assert_eq!(input, [1, 2]);
    }

    #[test]
    fn test_extract_string_truncated() {
        let test = [10, 0, 65, 0, 66, 0];
        assert!(extract_string(&test, true).is_err());
    }

    #[test]
    fn test_decode_wide_units() {
        assert_eq!(decode_wide_units(&[0x43, 0x3a, 0xe9]), "C:é");
        assert_eq!(decode_wide_units(&[0x65e5, 0x672c]), "日本");
        assert_eq!(decode_wide_units(&[0xd83d, 0xde00, 0x41]), "😀A");
        // Unpaired surrogate keeps its low byte
        assert_eq!(decode_wide_units(&[0xd8ab, 0x41]), "«A");
    }

    #[test]
    fn test_write_string() {
        let mut buffer = ByteBuffer::new();
        write_string(&mut buffer, "C:\\日").unwrap();
        assert_eq!(
            buffer.as_slice(),
            [4, 0, 0x43, 0, 0x3a, 0, 0x5c, 0, 0xe5, 0x65]
        );

        let (_, result) = extract_string(buffer.as_slice(), true).unwrap();
        assert_eq!(result, "C:\\日");
    }

    #[test]
    fn test_write_string_too_large() {
        let mut buffer = ByteBuffer::new();
        let value = "a".repeat(65536);
        assert_eq!(
            write_string(&mut buffer, &value),
            Err(LnkError::StringTooLarge)
        );
        assert_eq!(buffer.len(), 0);

        let value = "a".repeat(65535);
        write_string(&mut buffer, &value).unwrap();
        assert_eq!(buffer.len(), 2 + 65535 * 2);
    }
}
