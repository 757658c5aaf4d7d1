use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Replace `path` with `content` via a uniquely named sibling temp file and
/// rename, so readers observe either the old or the new content, never a
/// prefix. Concurrent writers never share a temp file.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let dir = parent_dir(path);
    fs::create_dir_all(&dir)?;

    let mut temp = NamedTempFile::new_in(&dir)?;
    temp.write_all(content.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|error| error.error)?;
    Ok(())
}

/// Blocks until this process holds an exclusive advisory lock on
/// `<path>.lock`. The lock is released when the returned file is dropped.
///
/// The lock lives on a sibling because `write_atomic` swaps the inode of
/// `path` itself.
pub fn lock_exclusive(path: &Path) -> io::Result<File> {
    fs::create_dir_all(parent_dir(path))?;
    let file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(false)
        .open(lock_sibling(path))?;
    file.lock_exclusive()?;
    Ok(file)
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn lock_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    path.with_file_name(name)
}
