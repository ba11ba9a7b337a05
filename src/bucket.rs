//! Extension bucket naming.
//!
//! Every copied file lands in a destination subfolder named after its
//! lowercased extension. Files without a usable extension share the
//! [`UNKNOWN_BUCKET`] folder.

use std::path::Path;

/// Bucket name used for files with no extension.
pub const UNKNOWN_BUCKET: &str = "unknown";

/// Returns the extension bucket for a file path.
///
/// The bucket is the text after the last `.` of the file name, lowercased.
/// Names without a dot, names whose only dot is a leading one (`.gitignore`)
/// and names ending in a dot (`notes.`) all map to [`UNKNOWN_BUCKET`].
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use extsort::bucket::extension_bucket;
///
/// assert_eq!(extension_bucket(Path::new("/data/archive.TAR.GZ")), "gz");
/// assert_eq!(extension_bucket(Path::new("/data/.gitignore")), "unknown");
/// assert_eq!(extension_bucket(Path::new("/data/noext")), "unknown");
/// ```
pub fn extension_bucket(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| UNKNOWN_BUCKET.to_string())
}
