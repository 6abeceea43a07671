//! File system helpers shared by commands that write files.

/// Ensure parent directory exists for given path, creating if needed.
///
/// This function checks if the parent directory of the given path exists,
/// and creates it (including any missing intermediate directories) if needed.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
/// # use pokerstat_cli::io_utils::ensure_parent_dir;
///
/// let path = Path::new("output/runs/stats.csv");
/// ensure_parent_dir(path).unwrap();
/// // Now "output/runs/" directory exists
/// ```
pub fn ensure_parent_dir(path: &std::path::Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
