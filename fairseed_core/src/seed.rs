use rand::{rngs::OsRng, CryptoRng, RngCore};

use crate::error::FairResult;

/// Random bytes behind every generated seed; hex doubles this to 512 chars.
pub const SEED_BYTES: usize = 256;

/// Hex-encodes `SEED_BYTES` drawn from `rng`.
pub fn generate_seed_with<R: RngCore + CryptoRng>(rng: &mut R) -> FairResult<String> {
    let mut bytes = [0u8; SEED_BYTES];
    rng.try_fill_bytes(&mut bytes)?;
    Ok(hex::encode(bytes))
}

/// Fresh operator seed from the OS random source.
pub fn generate_server_seed() -> FairResult<String> {
    generate_seed_with(&mut OsRng)
}

/// Fresh player seed from the OS random source. Deployments that assign
/// client seeds at account creation call this once and store the result.
pub fn generate_client_seed() -> FairResult<String> {
    generate_seed_with(&mut OsRng)
}
