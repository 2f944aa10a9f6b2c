//! Provably fair outcomes from a client seed, a server seed and a nonce.
//!
//! Every outcome starts from `SHA-512(client_seed ++ server_seed ++ nonce)`.
//! The first 32 bits of that digest are reduced onto the requested domain, so
//! anyone holding the three inputs can recompute and check a result.

pub mod engine;
pub mod error;
pub mod range;
pub mod rng;
pub mod seed;
pub mod weighted;

pub use crate::engine::{
    derive_boolean, derive_integer, select_weighted, verify_boolean, verify_integer,
    verify_selection,
};
pub use crate::error::{FairError, FairResult, Precondition};
pub use crate::range::IntRange;
pub use crate::rng::{combine, hash, roll_from_digest, ProvablyFair, DIGEST_HEX_LEN};
pub use crate::seed::{generate_client_seed, generate_seed_with, generate_server_seed, SEED_BYTES};
pub use crate::weighted::{select_by_value, total_weight, WeightedOption};
