use crate::utils::encoding::base64_encode_standard;
use log::warn;

/// Get a UTF8 string from provided bytes data
pub(crate) fn extract_utf8_string(data: &[u8]) -> String {
    let utf8_result = String::from_utf8(data.to_vec());
    match utf8_result {
        Ok(result) => result.trim_end_matches('\0').to_string(),
        Err(err) => {
            warn!("[strings] Failed to get UTF8 string: {err:?}");

            let max_size = 2097152;
            let issue = if data.len() < max_size {
                base64_encode_standard(data)
            } else {
                format!("Binary data size larger than 2MB, size: {}", data.len())
            };
            format!("Failed to get UTF8 string: {issue}")
        }
    }
}

/// Replace every occurrence of `find` in `value`. An empty `find` leaves the value untouched
pub(crate) fn replace_all(value: &str, find: &str, replace: &str) -> String {
    if find.is_empty() {
        return value.to_string();
    }
    value.replace(find, replace)
}

#[cfg(test)]
mod tests {
    use super::{extract_utf8_string, replace_all};

    #[test]
    fn test_extract_utf8_string() {
        let test_data = vec![67, 58, 92, 85, 115, 101, 114, 115, 0];
        assert_eq!(extract_utf8_string(&test_data), "C:\\Users")
    }

    #[test]
    fn test_extract_bad_utf8_string() {
        let test_data = vec![0xff, 0xfe, 0x41];
        assert_eq!(
            extract_utf8_string(&test_data),
            "Failed to get UTF8 string: //5B"
        )
    }

    #[test]
    fn test_replace_all() {
        assert_eq!(
            replace_all("C:\\old\\old.txt", "old", "new"),
            "C:\\new\\new.txt"
        );
        assert_eq!(replace_all("aaaa", "aa", "a"), "aa");
        assert_eq!(replace_all("C:\\data", "", "x"), "C:\\data");
    }
}
