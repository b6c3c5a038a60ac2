//! Draw 20 outcomes without replacement from each of 5 random 20-way distributions.
//!
//! Usage: `cargo run --example multinomial_demo [seed]`
//! Set `RUST_LOG=trace` to see each draw.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tirage::{MultinomialError, MultinomialSampler, Replacement};

const HEIGHT: usize = 5;
const PROB_WIDTH: usize = 20;
const NUM_SAMPLES: usize = 20;

/// Random weights, then draws. A seed pins both.
fn run(seed: Option<u64>) -> Result<Array2<usize>, MultinomialError> {
    let (mut weight_rng, mut sampler) = match seed {
        Some(s) => (
            StdRng::seed_from_u64(s),
            MultinomialSampler::with_seed(s.wrapping_add(1)),
        ),
        None => (StdRng::from_os_rng(), MultinomialSampler::new()),
    };

    let probs = Array2::from_shape_simple_fn((HEIGHT, PROB_WIDTH), || {
        weight_rng.random::<f64>()
    });
    sampler.sample(probs.view(), NUM_SAMPLES, Replacement::Without)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let seed = std::env::args().nth(1).map(|s| s.parse::<u64>()).transpose()?;
    let samples = run(seed)?;

    println!("==final sample==");
    for row in samples.rows() {
        let line: Vec<String> = row.iter().map(|s| s.to_string()).collect();
        println!("{}", line.join(", "));
    }

    Ok(())
}
