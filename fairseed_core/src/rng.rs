use sha2::{Digest, Sha512};
use tracing::trace;

use crate::{
    error::FairResult,
    range::IntRange,
    weighted::{self, WeightedOption},
};

// Provably-fair derivation
// client_seed ++ server_seed ++ decimal(nonce) -> SHA-512 -> first 32 bits -> reduced outcome

/// Length of a hex-encoded SHA-512 digest.
pub const DIGEST_HEX_LEN: usize = 128;
/// Hex characters of the digest consumed by one roll.
pub const ROLL_HEX_LEN: usize = 8;

/// Joins the inputs with no separator, so `("ab", "c", 1)` and `("a", "bc", 1)`
/// share a preimage. Existing verifiers rely on this exact layout.
pub fn combine(client_seed: &str, server_seed: &str, nonce: u64) -> String {
    format!("{client_seed}{server_seed}{nonce}")
}

/// Lowercase hex SHA-512 of `preimage`.
pub fn hash(preimage: &str) -> String {
    hex::encode(Sha512::digest(preimage.as_bytes()))
}

/// Parses the roll out of a hex digest: its first 8 characters as a base-16 `u32`.
/// Returns `None` when the digest is too short or not hex.
pub fn roll_from_digest(digest_hex: &str) -> Option<u32> {
    let prefix = digest_hex.get(..ROLL_HEX_LEN)?;
    u32::from_str_radix(prefix, 16).ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProvablyFair {
    pub client_seed: String,
    pub server_seed: String,
    pub nonce: u64,
}

impl ProvablyFair {
    pub fn new(client_seed: impl Into<String>, server_seed: impl Into<String>, nonce: u64) -> Self {
        Self {
            client_seed: client_seed.into(),
            server_seed: server_seed.into(),
            nonce,
        }
    }

    pub fn preimage(&self) -> String {
        combine(&self.client_seed, &self.server_seed, self.nonce)
    }

    pub fn digest_bytes(&self) -> [u8; 64] {
        let mut hasher = Sha512::new();
        hasher.update(self.client_seed.as_bytes());
        hasher.update(self.server_seed.as_bytes());
        hasher.update(self.nonce.to_string().as_bytes());
        let mut out = [0u8; 64];
        out.copy_from_slice(&hasher.finalize());
        out
    }

    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest_bytes())
    }

    /// The leading 32 bits of the digest, big-endian. Same value as parsing
    /// the first 8 hex characters of [`digest_hex`](Self::digest_hex).
    pub fn roll(&self) -> u32 {
        let digest = self.digest_bytes();
        u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
    }

    pub fn integer_in(&self, range: IntRange) -> i64 {
        let value = range.reduce(self.roll());
        trace!(
            nonce = self.nonce,
            min = range.min(),
            max = range.max(),
            value,
            "derived integer"
        );
        value
    }

    pub fn integer(&self, min: i64, max: i64) -> FairResult<i64> {
        let range = IntRange::new(min, max)?;
        Ok(self.integer_in(range))
    }

    pub fn boolean(&self) -> bool {
        self.integer_in(IntRange::BOOLEAN) == 1
    }

    /// Picks one option id by weight using a single roll over `[0, total - 1]`.
    ///
    /// An empty slice gives `Ok(None)`. Options whose weights sum to zero are
    /// a precondition violation.
    pub fn select<'o>(&self, options: &'o [WeightedOption]) -> FairResult<Option<&'o str>> {
        if options.is_empty() {
            return Ok(None);
        }
        let range = weighted::selection_range(options)?;
        let r = self.integer_in(range) as u64;
        Ok(weighted::select_by_value(options, r).map(|o| o.id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let a = ProvablyFair::new("client", "server", 1);
        let b = ProvablyFair::new("client", "server", 1);
        assert_eq!(a.digest_hex(), b.digest_hex());
        assert_eq!(a.roll(), b.roll());
        assert_eq!(a.integer(1, 100).unwrap(), b.integer(1, 100).unwrap());
    }

    #[test]
    fn pinned_digest() {
        assert_eq!(
            hash(&combine("a", "b", 1)),
            "91452a9e5ad8c642b454cbd0186a0ac9fac558938eafd16a667dec60b2f61981\
             acf440a858743b97b2bb033bd58f3e98e604b95d65eed32fdcc6b243790a03c5"
        );
    }

    #[test]
    fn streaming_digest_matches_hash_of_preimage() {
        let pf = ProvablyFair::new("clientX", "serverY", 1);
        assert_eq!(pf.preimage(), "clientXserverY1");
        assert_eq!(pf.digest_hex(), hash(&pf.preimage()));
        assert_eq!(pf.digest_hex().len(), DIGEST_HEX_LEN);
    }

    #[test]
    fn roll_equals_hex_prefix() {
        let pf = ProvablyFair::new("clientX", "serverY", 1);
        assert_eq!(pf.roll(), 0xa835_83af);
        assert_eq!(roll_from_digest(&pf.digest_hex()), Some(pf.roll()));
    }

    #[test]
    fn roll_from_bad_digest() {
        assert_eq!(roll_from_digest("abc"), None);
        assert_eq!(roll_from_digest("zzzzzzzz00"), None);
    }

    #[test]
    fn separator_free_preimage_collides() {
        let a = ProvablyFair::new("ab", "c", 7);
        let b = ProvablyFair::new("a", "bc", 7);
        assert_eq!(a.digest_hex(), b.digest_hex());
    }
}
