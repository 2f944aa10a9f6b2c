use crate::{
    error::FairResult,
    range::IntRange,
    rng::ProvablyFair,
    weighted::WeightedOption,
};

/// Integer in `[min, max]` for the given seeds and nonce.
///
/// # Errors
///
/// [`Precondition::InvertedRange`](crate::Precondition::InvertedRange) when `max < min`.
pub fn derive_integer(
    client_seed: &str,
    server_seed: &str,
    nonce: u64,
    min: i64,
    max: i64,
) -> FairResult<i64> {
    ProvablyFair::new(client_seed, server_seed, nonce).integer(min, max)
}

/// `true` iff `derive_integer(client_seed, server_seed, nonce, 0, 1)` is 1.
pub fn derive_boolean(client_seed: &str, server_seed: &str, nonce: u64) -> bool {
    ProvablyFair::new(client_seed, server_seed, nonce).boolean()
}

/// Weighted pick among `options`, in order. See [`ProvablyFair::select`].
pub fn select_weighted<'o>(
    client_seed: &str,
    server_seed: &str,
    nonce: u64,
    options: &'o [WeightedOption],
) -> FairResult<Option<&'o str>> {
    ProvablyFair::new(client_seed, server_seed, nonce).select(options)
}

/// Verify that `claimed` is what the seeds produce for `[min, max]`. An
/// inverted range never verifies.
pub fn verify_integer(
    client_seed: &str,
    server_seed: &str,
    nonce: u64,
    min: i64,
    max: i64,
    claimed: i64,
) -> bool {
    match IntRange::new(min, max) {
        Ok(range) => ProvablyFair::new(client_seed, server_seed, nonce).integer_in(range) == claimed,
        Err(_) => false,
    }
}

pub fn verify_boolean(client_seed: &str, server_seed: &str, nonce: u64, claimed: bool) -> bool {
    derive_boolean(client_seed, server_seed, nonce) == claimed
}

/// Verify a claimed selection, where `None` means no option was selected.
/// Inputs that make selection fail never verify.
pub fn verify_selection(
    client_seed: &str,
    server_seed: &str,
    nonce: u64,
    options: &[WeightedOption],
    claimed: Option<&str>,
) -> bool {
    match select_weighted(client_seed, server_seed, nonce, options) {
        Ok(actual) => actual == claimed,
        Err(_) => false,
    }
}
