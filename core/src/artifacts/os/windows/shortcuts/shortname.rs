use super::shellitems::{split_path, PathRoot};
use crate::structs::toml::ShortNames;
#[cfg(target_os = "windows")]
use crate::filesystem::{directory::is_directory, files::is_file};
#[cfg(target_os = "windows")]
use log::warn;

/// Turns a long path into its 8.3 form
pub(crate) trait ShortPathResolver {
    fn short_path(&self, path: &str) -> String;
}

/// Heuristic short names. Works without the target existing
pub(crate) struct EstimatedShortPaths;

impl ShortPathResolver for EstimatedShortPaths {
    fn short_path(&self, path: &str) -> String {
        estimate_short_path(path)
    }
}

/// Ask the OS for the short path. Only possible on Windows and only when the target exists
pub(crate) struct SystemShortPaths;

impl ShortPathResolver for SystemShortPaths {
    fn short_path(&self, path: &str) -> String {
        #[cfg(target_os = "windows")]
        {
            if is_file(path) || is_directory(path) {
                if let Some(short) = system_short_path(path) {
                    return short;
                }
                warn!("[shortcuts] Could not get system short path for {path}. Estimating instead");
            }
        }
        estimate_short_path(path)
    }
}

/// Pick the resolver for the configured short name source
pub(crate) fn get_resolver(short_names: &ShortNames) -> Box<dyn ShortPathResolver> {
    match short_names {
        ShortNames::Estimate => Box::new(EstimatedShortPaths),
        ShortNames::System => Box::new(SystemShortPaths),
    }
}

/// Estimate the 8.3 name of one path element. Collisions are not tracked so the suffix is always `~1`
pub(crate) fn estimate_short_name(element: &str) -> String {
    let max_short = 12;
    if element.len() <= max_short && !element.contains(' ') {
        return element.to_string();
    }

    let extension = match element.rfind('.') {
        Some(index) => &element[index + 1..],
        None => "",
    };
    let base = element.replace(&format!(".{extension}"), "");

    let max_extension = 3;
    let max_base = 6;
    let extension: String = extension
        .chars()
        .filter(|c| *c != ' ')
        .take(max_extension)
        .collect();
    let mut short: String = base.chars().filter(|c| *c != ' ').take(max_base).collect();

    short.push_str("~1");
    if !extension.is_empty() {
        short.push('.');
        short.push_str(&extension);
    }
    short.to_ascii_uppercase()
}

/// Estimate the 8.3 form of every element in a path
pub(crate) fn estimate_short_path(path: &str) -> String {
    let (root, elements) = split_path(path);
    let short: Vec<String> = elements
        .iter()
        .map(|element| estimate_short_name(element))
        .collect();
    let joined = short.join("\\");

    match root {
        PathRoot::Drive(letter) => format!("{}:\\{joined}", char::from(letter)),
        PathRoot::Unc => format!("\\\\{joined}"),
        PathRoot::None => joined,
    }
}

#[cfg(target_os = "windows")]
/// Call `GetShortPathNameW` twice. Once for the size, once for the path
fn system_short_path(path: &str) -> Option<String> {
    use winapi::um::fileapi::GetShortPathNameW;

    let wide_path: Vec<u16> = path.encode_utf16().chain(std::iter::once(0)).collect();
    let failed = 0;

    #[allow(unsafe_code)]
    unsafe {
        let size = GetShortPathNameW(wide_path.as_ptr(), std::ptr::null_mut(), 0);
        if size == failed {
            return None;
        }

        let mut short_path: Vec<u16> = vec![0; size as usize];
        let written = GetShortPathNameW(wide_path.as_ptr(), short_path.as_mut_ptr(), size);
        if written == failed || written >= size {
            return None;
        }
        Some(String::from_utf16_lossy(&short_path[..written as usize]))
    }
}
