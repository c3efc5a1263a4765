//! SHA-256 content digests.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

/// Chunk size for streaming file hashes.
const HASH_CHUNK_SIZE: usize = 8192;

/// SHA-256 digest of a byte slice as a 64-character lowercase hex string.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// SHA-256 digest of a file's raw bytes, streamed in bounded chunks.
///
/// Byte-equivalent to hashing the whole file in one buffer; only the peak
/// memory differs.
pub fn file_sha256(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut chunk = [0u8; HASH_CHUNK_SIZE];
    loop {
        let n = file.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        hasher.update(&chunk[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sha256_hex_known_vector() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            sha256_hex(b"Hello World"),
            "a591a6d40bf420404a011733cfb7b190d62c65bf0bcda32b57b277d9ad9f146e"
        );
    }

    #[test]
    fn test_sha256_hex_format() {
        let digest = sha256_hex(b"anything");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(digest, digest.to_lowercase());
    }

    #[test]
    fn test_file_sha256_matches_whole_buffer() {
        // Larger than one chunk so the streaming path is actually exercised.
        let payload: Vec<u8> = (0..HASH_CHUNK_SIZE * 3 + 17)
            .map(|i| (i % 251) as u8)
            .collect();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.bin");
        let mut f = File::create(&path).unwrap();
        f.write_all(&payload).unwrap();
        drop(f);

        assert_eq!(file_sha256(&path).unwrap(), sha256_hex(&payload));
    }

    #[test]
    fn test_file_sha256_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = file_sha256(&dir.path().join("absent.bin"));
        assert!(err.is_err());
    }
}
