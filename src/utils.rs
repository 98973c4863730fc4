//! Utility functions for path handling.

use std::path::Path;

/// Returns the last component of a path, the name a file is uploaded under.
///
/// Returns `None` when the path has no file name (`/`, `..`) or when the name
/// is not valid UTF-8.
///
/// # Examples
///
/// ```
/// # use std::path::Path;
/// # use wecom_notify::utils::file_name;
/// assert_eq!(file_name(Path::new("/tmp/photo.png")), Some("photo.png".to_string()));
/// ```
pub fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_owned)
}
