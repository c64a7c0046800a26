use rand::Rng;

use crate::FixtureError;

const ALPHA: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const NUMERIC: &str = "0123456789";
const DEFAULT_LENGTH: usize = 12;
const MAX_LENGTH: usize = 50;

/// `{random[-type[-length]]}` with type `alphanum` (default), `alpha` or `numeric`.
pub fn random(args: &[&str]) -> Result<String, FixtureError> {
    let kind = args.first().copied().filter(|s| !s.is_empty()).unwrap_or("alphanum");

    let length = match args.get(1).copied().filter(|s| !s.is_empty()) {
        Some(raw) => raw.parse::<usize>().map_err(|_| {
            FixtureError::macro_failed("random", format!("invalid length: {}", raw))
        })?,
        None => DEFAULT_LENGTH,
    };
    let length = length.min(MAX_LENGTH);

    let charset: Vec<char> = match kind {
        "alpha" => ALPHA.chars().collect(),
        "numeric" => NUMERIC.chars().collect(),
        "alphanum" => ALPHA.chars().chain(NUMERIC.chars()).collect(),
        other => {
            return Err(FixtureError::macro_failed(
                "random",
                format!("unknown random type: {}", other),
            ));
        }
    };

    let mut rng = rand::thread_rng();
    Ok((0..length)
        .map(|_| charset[rng.gen_range(0..charset.len())])
        .collect())
}
