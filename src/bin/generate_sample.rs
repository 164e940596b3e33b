//! Generates a sample `nrdc_missing_anchors.csv` so the dashboard can be
//! exercised without real NRDC data. A few Distance cells are deliberately
//! unparseable to exercise the coercion path.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::File;

const OUTPUT: &str = "nrdc_missing_anchors.csv";
const ROWS: usize = 240;

const MARKETS: [&str; 6] = ["Dallas", "Las Vegas", "Phoenix", "Reno", "Tucson", "El Paso"];
const STATUSES: [&str; 3] = ["open", "investigating", "resolved"];

/// Small deterministic PRNG so the sample file is reproducible.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        (self.next() >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = XorShift(0x5eed_cafe);

    let mut anchor_ids = Vec::with_capacity(ROWS);
    let mut markets = Vec::with_capacity(ROWS);
    let mut distances = Vec::with_capacity(ROWS);
    let mut statuses = Vec::with_capacity(ROWS);

    for i in 0..ROWS {
        anchor_ids.push(format!("ANC-{:05}", 10_000 + i));
        markets.push(MARKETS[(rng.next() % MARKETS.len() as u64) as usize]);
        statuses.push(STATUSES[(rng.next() % STATUSES.len() as u64) as usize]);

        // Roughly log-normal spread between 0 and ~50, with a handful of
        // malformed cells the loader must coerce to null.
        if i % 97 == 0 {
            distances.push("N/A".to_string());
        } else {
            let d = (rng.next_f64() * rng.next_f64() * 50.0).max(0.05);
            distances.push(format!("{d:.2}"));
        }
    }

    let mut df = df!(
        "AnchorId" => anchor_ids,
        "Market" => markets,
        "Distance" => distances,
        "Status" => statuses,
    )
    .context("building sample frame")?;

    let file = File::create(OUTPUT).with_context(|| format!("creating {OUTPUT}"))?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(&mut df)
        .context("writing sample CSV")?;

    println!("Wrote {ROWS} rows to {OUTPUT}");
    Ok(())
}
