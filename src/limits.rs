//! Size limit constants for input validation

/// Maximum length for a token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Maximum size for decoded header JSON (8KB)
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded payload JSON (64KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for decoded signature bytes
/// HS512 digests are 64 bytes
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 1024;

/// Maximum length for the `alg` header field (16 bytes)
pub(crate) const MAX_ALG_LENGTH: usize = 16;

/// Maximum expiration leeway (5 minutes, in milliseconds)
pub(crate) const MAX_LEEWAY_MILLIS: u64 = 5 * 60 * 1000;
