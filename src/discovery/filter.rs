/// Binary and hidden-file heuristics for discovery
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Bytes inspected by the binary heuristic
const SNIFF_LEN: usize = 512;

/// Fraction of non-printable bytes above which content is binary
const NON_PRINTABLE_LIMIT: f64 = 0.30;

/// Classify a leading chunk of a file as binary.
///
/// A chunk is binary when it contains a NUL byte, is not valid UTF-8, or
/// more than 30% of its bytes are non-printable (tab, CR, and LF do not
/// count as non-printable).
pub fn is_binary_chunk(chunk: &[u8]) -> bool {
    if chunk.is_empty() {
        return false;
    }

    if chunk.contains(&0) {
        return true;
    }

    if std::str::from_utf8(chunk).is_err() {
        return true;
    }

    let non_printable = chunk
        .iter()
        .filter(|&&b| b < 0x20 && b != b'\t' && b != b'\r' && b != b'\n')
        .count();

    (non_printable as f64 / chunk.len() as f64) > NON_PRINTABLE_LIMIT
}

/// Read the first 512 bytes of a file and apply the binary heuristic
pub fn is_binary_file(path: &Path) -> std::io::Result<bool> {
    let mut file = File::open(path)?;
    let mut buffer = [0u8; SNIFF_LEN];
    let read = file.read(&mut buffer)?;
    Ok(is_binary_chunk(&buffer[..read]))
}

/// Whether the basename starts with '.'
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_text_is_not_binary() {
        assert!(!is_binary_chunk(b"plain text\nwith lines\tand tabs\r\n"));
    }

    #[test]
    fn test_nul_byte_is_binary() {
        assert!(is_binary_chunk(b"text with a \x00 nul"));
    }

    #[test]
    fn test_invalid_utf8_is_binary() {
        assert!(is_binary_chunk(&[0xff, 0xfe, 0x41, 0x42]));
    }

    #[test]
    fn test_control_character_ratio() {
        // Over 30% control characters
        let mut chunk = vec![0x01u8; 40];
        chunk.extend_from_slice(&[b'a'; 60]);
        assert!(is_binary_chunk(&chunk));

        // Under 30%
        let mut chunk = vec![0x01u8; 10];
        chunk.extend_from_slice(&[b'a'; 90]);
        assert!(!is_binary_chunk(&chunk));
    }

    #[test]
    fn test_empty_chunk_is_text() {
        assert!(!is_binary_chunk(&[]));
    }

    #[test]
    fn test_is_binary_file() {
        let tmp = TempDir::new().unwrap();

        let text_path = tmp.path().join("plain.txt");
        fs::write(&text_path, "hello world").unwrap();
        assert!(!is_binary_file(&text_path).unwrap());

        let bin_path = tmp.path().join("blob.bin");
        fs::write(&bin_path, [0u8, 1, 2, 3]).unwrap();
        assert!(is_binary_file(&bin_path).unwrap());
    }

    #[test]
    fn test_is_hidden() {
        assert!(is_hidden(Path::new("dir/.env")));
        assert!(!is_hidden(Path::new("dir/env")));
    }
}
