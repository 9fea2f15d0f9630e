//! Content digest computation.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use md5::{Digest, Md5};

/// Compute the `Content-MD5` value for a request body: base64 of the
/// 16-byte MD5 digest of the exact bytes sent upstream.
#[must_use]
pub fn content_md5(body: &[u8]) -> String {
    BASE64.encode(Md5::digest(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_digest() {
        // MD5("") = d41d8cd98f00b204e9800998ecf8427e
        assert_eq!(content_md5(b""), "1B2M2Y8AsgTpgAmY7PhCfg==");
    }

    #[test]
    fn test_known_body_digest() {
        // MD5("hello world") = 5eb63bbbe01eeed093cb22bb8f5acdc3
        assert_eq!(content_md5(b"hello world"), "XrY7u+Ae7tCTyyK7j1rNww==");
    }

    #[test]
    fn test_digest_is_byte_sensitive() {
        assert_ne!(content_md5(b"{\"id\":1}"), content_md5(b"{\"id\":2}"));
    }
}
