//! Payload source and sink: turning files into hidden records and back.

use crate::codec::HiddenFile;
use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Characters that would let a recovered name escape the output directory.
const FORBIDDEN_NAME_CHARS: [char; 4] = ['/', '\\', ':', '\0'];

/// The name a file is hidden under: the last path component, as raw bytes.
pub fn display_name(path: &Path) -> Result<Vec<u8>> {
    let name = path
        .file_name()
        .ok_or_else(|| Error::InvalidFileName(path.display().to_string()))?;
    Ok(os_str_bytes(name))
}

#[cfg(unix)]
fn os_str_bytes(name: &OsStr) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    name.as_bytes().to_vec()
}

#[cfg(not(unix))]
fn os_str_bytes(name: &OsStr) -> Vec<u8> {
    name.to_string_lossy().into_owned().into_bytes()
}

/// Read a file to hide, named after its last path component.
pub fn load_payload(path: &Path) -> Result<HiddenFile> {
    let name = display_name(path)?;
    let payload = std::fs::read(path)?;
    Ok(HiddenFile { name, payload })
}

/// Check that `name` is a single plain file name component.
///
/// The same rule applies to names about to be hidden and to names read back
/// from a carrier, so anything that can be hidden can also be revealed.
pub fn validate_name(name: &[u8]) -> Result<&str> {
    let name = std::str::from_utf8(name)
        .map_err(|_| Error::InvalidFileName(String::from_utf8_lossy(name).into_owned()))?;

    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(FORBIDDEN_NAME_CHARS.as_slice())
    {
        return Err(Error::InvalidFileName(name.escape_default().to_string()));
    }

    Ok(name)
}

/// Build the path a recovered file is written to.
///
/// Recovered names come straight from the carrier and are untrusted: anything
/// that is not a single plain component is rejected rather than rewritten.
pub fn safe_output_path(dir: &Path, name: &[u8]) -> Result<PathBuf> {
    Ok(dir.join(validate_name(name)?))
}

/// Open `path` for writing, refusing to replace an existing file unless
/// `overwrite` is set. The existence check and creation are one step.
pub(crate) fn open_output(path: &Path, overwrite: bool) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    options.open(path).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => Error::OutputExists(path.to_path_buf()),
        _ => Error::Io(e),
    })
}

/// Write a recovered file into `dir`.
///
/// Fails with [`Error::OutputExists`] if the target exists and `overwrite`
/// is not set.
pub fn write_recovered(dir: &Path, file: &HiddenFile, overwrite: bool) -> Result<PathBuf> {
    let path = safe_output_path(dir, &file.name)?;

    let mut out = open_output(&path, overwrite)?;
    out.write_all(&file.payload)?;
    out.sync_all()?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_display_name_strips_directories() {
        let name = display_name(Path::new("/tmp/some/dir/report.pdf")).unwrap();
        assert_eq!(name, b"report.pdf");
    }

    #[test]
    fn test_display_name_requires_file_name() {
        assert!(matches!(
            display_name(Path::new("/")),
            Err(Error::InvalidFileName(_))
        ));
        assert!(display_name(Path::new("..")).is_err());
    }

    #[test]
    fn test_load_payload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secret.bin");
        fs::write(&path, [0u8, 1, 2, 255]).unwrap();

        let file = load_payload(&path).unwrap();
        assert_eq!(file.name, b"secret.bin");
        assert_eq!(file.payload, vec![0, 1, 2, 255]);
    }

    #[test]
    fn test_safe_output_path_accepts_plain_names() {
        let dir = Path::new("/out");
        assert_eq!(
            safe_output_path(dir, b"A.TXT").unwrap(),
            PathBuf::from("/out/A.TXT")
        );
        assert_eq!(
            safe_output_path(dir, "日本語.txt".as_bytes()).unwrap(),
            dir.join("日本語.txt")
        );
        assert!(safe_output_path(dir, b"..hidden").is_ok());
    }

    #[test]
    fn test_safe_output_path_rejects_traversal() {
        let dir = Path::new("/out");
        let names: [&[u8]; 9] = [
            b"../x",
            b"a/b",
            b"..",
            b".",
            b"",
            b"C:x",
            b"..\\evil",
            b"nul\0byte",
            &[0xff, 0xfe],
        ];
        for name in names {
            assert!(
                matches!(safe_output_path(dir, name), Err(Error::InvalidFileName(_))),
                "accepted {:?}",
                name
            );
        }
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name(b"a.txt").unwrap(), "a.txt");
        assert!(matches!(validate_name(b"a/b"), Err(Error::InvalidFileName(_))));
        assert!(validate_name(b"C:x").is_err());
        assert!(validate_name(&[b'a', 0xff]).is_err());
    }

    #[test]
    fn test_open_output_is_exclusive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("taken.wav");
        fs::write(&path, b"keep").unwrap();

        assert!(matches!(
            open_output(&path, false),
            Err(Error::OutputExists(_))
        ));
        assert_eq!(fs::read(&path).unwrap(), b"keep");

        open_output(&path, true).unwrap();
        assert!(fs::read(&path).unwrap().is_empty());
    }

    #[test]
    fn test_write_recovered_no_clobber() {
        let dir = TempDir::new().unwrap();
        let file = HiddenFile::new(b"out.txt".to_vec(), b"first".to_vec());

        let path = write_recovered(dir.path(), &file, false).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"first");

        let second = HiddenFile::new(b"out.txt".to_vec(), b"second".to_vec());
        assert!(matches!(
            write_recovered(dir.path(), &second, false),
            Err(Error::OutputExists(_))
        ));
        assert_eq!(fs::read(&path).unwrap(), b"first");

        write_recovered(dir.path(), &second, true).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
    }
}
