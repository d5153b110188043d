use std::fmt;

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

/// Content hash of a stored object.
///
/// Swift reports the lowercase hex MD5 digest of the object body as its ETag,
/// so the same bytes always produce the same tag regardless of where they
/// are stored.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Etag(String);

impl Etag {
    /// Compute the ETag of `content`.
    pub fn of(content: &[u8]) -> Self {
        let digest = Md5::digest(content);
        Self(hex::encode(digest))
    }

    /// Hex representation of the digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Etag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Etag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Etag({})", self.0)
    }
}
