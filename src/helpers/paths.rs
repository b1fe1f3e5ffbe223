//! Path Normalization
//!
//! Pure string helpers for the forward-slash path form persisted in the
//! configuration record. Paths stay strings here because the record stores
//! whatever the user picked, including Windows paths on other hosts.

const SEPARATOR: char = '/';

/// Replace every backslash with a forward slash.
pub fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

/// Containing directory of a file path.
///
/// Returns everything before the last separator. A path without any
/// separator is returned unchanged rather than collapsing to an empty string.
pub fn directory_of(path: &str) -> String {
    let path = normalize(path);
    match path.rfind(SEPARATOR) {
        Some(index) => path[..index].to_string(),
        None => path,
    }
}

/// Final segment of a path, empty when the path ends with a separator.
pub fn file_name(path: &str) -> String {
    let path = normalize(path);
    match path.rsplit_once(SEPARATOR) {
        Some((_, name)) => name.to_string(),
        None => path,
    }
}

/// Join a directory and a file name with exactly one separator between them.
pub fn join(directory: &str, name: &str) -> String {
    let directory = normalize(directory);
    let directory = directory.trim_end_matches(SEPARATOR);
    format!("{directory}/{name}")
}

/// Whether a value is a remote `http://` or `https://` URL (case-insensitive).
pub fn is_url(value: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        value
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_windows_path() {
        assert_eq!(normalize("C:\\a\\b.exe"), "C:/a/b.exe");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for path in ["C:\\a\\b.exe", "/usr/bin/java", "mixed\\sep/arated\\", "", "\\\\server\\share"] {
            let once = normalize(path);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_directory_of() {
        assert_eq!(directory_of("C:\\gc\\grasscutter.jar"), "C:/gc");
        assert_eq!(directory_of("/opt/gc/grasscutter.jar"), "/opt/gc");
    }

    #[test]
    fn test_directory_of_without_separator_returns_input() {
        assert_eq!(directory_of("grasscutter.jar"), "grasscutter.jar");
        assert_eq!(directory_of(""), "");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("C:\\images\\sunset.png"), "sunset.png");
        assert_eq!(file_name("sunset.png"), "sunset.png");
        assert_eq!(file_name("C:/images/"), "");
    }

    #[test]
    fn test_join_collapses_trailing_separator() {
        assert_eq!(join("C:\\data\\", "bg"), "C:/data/bg");
        assert_eq!(join("/data", "bg"), "/data/bg");
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/x.png"));
        assert!(is_url("HTTP://example.com/x.png"));
        assert!(!is_url("C:/Users/me/bg.png"));
        assert!(!is_url("ftp://example.com/x.png"));
        assert!(!is_url("see https://example.com"));
        assert!(!is_url("http:/"));
        assert!(!is_url(""));
    }
}
