use fairseed_core::{generate_server_seed, ProvablyFair, WeightedOption};

fn main() -> Result<(), fairseed_core::FairError> {
    // Example round: fresh server seed, fixed client seed
    let server_seed = generate_server_seed()?;
    let client_seed = "example-client-seed";
    let prizes = [
        WeightedOption::new("jackpot", 1),
        WeightedOption::new("small", 24),
        WeightedOption::new("nothing", 75),
    ];
    for nonce in 1..=3u64 {
        let round = ProvablyFair::new(client_seed, server_seed.as_str(), nonce);
        println!(
            "nonce={} digest={} dice={} coin={} prize={:?}",
            nonce,
            &round.digest_hex()[..16],
            round.integer(1, 6)?,
            round.boolean(),
            round.select(&prizes)?
        );
    }
    Ok(())
}
