//! File upload validation functions

/// Checks if a filename has an allowed extension.
///
/// The filename must contain a '.' and its last extension, lower-cased,
/// must be in `allowed`. An empty allow-list accepts any file.
pub fn has_allowed_extension(filename: &str, allowed: &[String]) -> bool {
    if allowed.is_empty() {
        return true;
    }

    match filename.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_ascii_lowercase();
            allowed.iter().any(|a| *a == ext)
        }
        None => false,
    }
}
