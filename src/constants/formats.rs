use std::path::Path;

/// File extensions (lower-case, without dot) that can be installed
pub const SUPPORTED_EXTENSIONS: &[&str] = &["deb", "rpm", "snap", "flatpak"];

/// Detached signature companions looked up next to a package, in order
pub const SIGNATURE_SUFFIXES: &[&str] = &["asc", "sig"];

/// Check whether a path carries one of the supported package extensions.
///
/// The comparison is case-insensitive and only looks at the final extension;
/// the file does not need to exist.
pub fn is_supported_package(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests;
