use hoard_types::AssetId;
use sha1::{Digest, Sha1};

/// SHA-1 content hasher producing [`AssetId`]s.
pub struct ContentHasher;

impl ContentHasher {
    /// Hash raw bytes into their asset identifier.
    pub fn hash(data: &[u8]) -> AssetId {
        AssetId::from_digest(Sha1::digest(data).into())
    }

    /// Hash a sequence of chunks as if they were one contiguous buffer.
    pub fn hash_chunks<'a>(chunks: impl IntoIterator<Item = &'a [u8]>) -> AssetId {
        let mut hasher = Sha1::new();
        for chunk in chunks {
            hasher.update(chunk);
        }
        AssetId::from_digest(hasher.finalize().into())
    }
}

/// The claimed identifier does not name the uploaded bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("hash mismatch: claimed {claimed}, computed {computed}")]
pub struct HashMismatch {
    pub claimed: String,
    pub computed: AssetId,
}

/// Recomputes a payload's digest and compares it with a caller's claim.
///
/// Mismatches are reported, never corrected: the verifier does not hand back
/// the computed id as a substitute for the claimed one.
pub struct HashVerifier;

impl HashVerifier {
    /// Returns `true` if `claimed` (any hex case) names `data`.
    pub fn verify(data: &[u8], claimed: &str) -> bool {
        Self::check(data, claimed).is_ok()
    }

    /// Like [`Self::verify`] but reports both sides on mismatch.
    pub fn check(data: &[u8], claimed: &str) -> Result<AssetId, HashMismatch> {
        let computed = ContentHasher::hash(data);
        match AssetId::canonicalize(claimed) {
            Ok(id) if id == computed => Ok(id),
            _ => Err(HashMismatch {
                claimed: claimed.to_string(),
                computed,
            }),
        }
    }
}
