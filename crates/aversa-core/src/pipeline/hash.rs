//! Content hashing of the pristine source bytes.
//!
//! The hash is the opaque reference callers use to key a source image across
//! a session without the pipeline ever touching the original again.

/// BLAKE3 hash of a byte buffer as a lowercase hex string.
pub fn content_hash(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_stable() {
        assert_eq!(content_hash(b"ramen"), content_hash(b"ramen"));
        assert_ne!(content_hash(b"ramen"), content_hash(b"udon"));
    }

    #[test]
    fn test_hash_is_hex() {
        let hash = content_hash(b"anything");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
