/**
 * Binary `Shortcut` data is parsed by taking X bytes and converting them to a number
 * With nom we can do that in two steps, ex:
 *   `take X bytes`
 *   `le_uX` to number
 *
 * These functions help reduce the repetitiveness of converting bytes to a number
 */
use nom::{
    bytes::complete::take,
    number::complete::{le_u16, le_u32, le_u64, le_u8},
};
use std::mem::size_of;

pub(crate) enum Endian {
    /**Little Endian. Every `Shortcut` number is stored this way */
    Le,
}

/**
 * Nom four (4) bytes to u32
 * Need to specify Endianess
 */
pub(crate) fn nom_unsigned_four_bytes(data: &[u8], endian: Endian) -> nom::IResult<&[u8], u32> {
    let (input, value_data) = take(size_of::<u32>())(data)?;

    let (_, value) = match endian {
        Endian::Le => le_u32(value_data)?,
    };

    Ok((input, value))
}

/**
 * Nom eight (8) bytes to u64
 * Need to specify Endianess
 */
pub(crate) fn nom_unsigned_eight_bytes(data: &[u8], endian: Endian) -> nom::IResult<&[u8], u64> {
    let (input, value_data) = take(size_of::<u64>())(data)?;

    let (_, value) = match endian {
        Endian::Le => le_u64(value_data)?,
    };
    Ok((input, value))
}

/**
 * Nom two (2) bytes to u16
 * Need to specify Endianess
 */
pub(crate) fn nom_unsigned_two_bytes(data: &[u8], endian: Endian) -> nom::IResult<&[u8], u16> {
    let (input, value_data) = take(size_of::<u16>())(data)?;

    let (_, value) = match endian {
        Endian::Le => le_u16(value_data)?,
    };
    Ok((input, value))
}

/**
 * Nom one (1) bytes to u8
 * Need to specify Endianess
 */
pub(crate) fn nom_unsigned_one_byte(data: &[u8], endian: Endian) -> nom::IResult<&[u8], u8> {
    let (input, value_data) = take(size_of::<u8>())(data)?;

    let (_, value) = match endian {
        Endian::Le => le_u8(value_data)?,
    };
    Ok((input, value))
}

/**
 * Nom an arbitrary amount of data and return the bytes remaining and bytes nom'd
 */
pub(crate) fn nom_data(data: &[u8], count: u64) -> nom::IResult<&[u8], &[u8]> {
    let (input, value) = take(count)(data)?;

    Ok((input, value))
}

#[cfg(test)]
mod tests {
    use super::{
        nom_data, nom_unsigned_eight_bytes, nom_unsigned_four_bytes, nom_unsigned_one_byte,
        nom_unsigned_two_bytes, Endian,
    };

    #[test]
    fn test_nom_unsigned_four_bytes() {
        let test = [76, 0, 0, 0, 1, 20];
        let (remaining, results) = nom_unsigned_four_bytes(&test, Endian::Le).unwrap();
        assert_eq!(results, 76);
        assert_eq!(remaining, [1, 20]);
    }

    #[test]
    fn test_nom_unsigned_eight_bytes() {
        let test = [230, 35, 108, 77, 41, 239, 216, 1];
        let (_, results) = nom_unsigned_eight_bytes(&test, Endian::Le).unwrap();
        assert_eq!(results, 133119149679059942);
    }

    #[test]
    fn test_nom_unsigned_two_bytes() {
        let test = [0x19, 0x00];
        let (_, results) = nom_unsigned_two_bytes(&test, Endian::Le).unwrap();
        assert_eq!(results, 25);
    }

    #[test]
    fn test_nom_unsigned_one_byte() {
        let test = [0x2f];
        let (_, results) = nom_unsigned_one_byte(&test, Endian::Le).unwrap();
        assert_eq!(results, 0x2f);
    }

    #[test]
    fn test_nom_data() {
        let test = [1, 2, 3, 4];
        let (remaining, results) = nom_data(&test, 3).unwrap();
        assert_eq!(results, [1, 2, 3]);
        assert_eq!(remaining, [4]);
    }

    #[test]
    fn test_nom_short_input() {
        let test = [1, 2, 3];
        let results = nom_unsigned_four_bytes(&test, Endian::Le);
        assert!(results.is_err());
    }
}
