//! quickstart — smallest runnable example for the tablog metric logger.
//!
//! Runs a fake training loop: per-batch losses are summarized into a
//! tabular record each epoch and fanned out to a CSV file, a text log,
//! and stdout.  Evaluation metrics only appear from epoch 4 on, so the
//! run also demonstrates a schema migration (watch for the warning and
//! the backfilled empty cells in early CSV rows).

use anyhow::Result;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use tablog_core::{StatPlacement, TabularRecord};
use tablog_output::{CsvOutput, Logger, StdOutput, TextOutput};

// ── Constants ─────────────────────────────────────────────────────────────────

const EPOCHS:            usize = 6;
const BATCHES_PER_EPOCH: usize = 32;
const FIRST_EVAL_EPOCH:  usize = 4;
const SEED:              u64   = 42;
const OUT_DIR:           &str  = "output/quickstart";

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("=== quickstart — tablog metric logger ===");
    println!("Epochs: {EPOCHS}  |  Batches/epoch: {BATCHES_PER_EPOCH}  |  Seed: {SEED}");
    println!();

    let csv_path = format!("{OUT_DIR}/progress.csv");
    let text_path = format!("{OUT_DIR}/debug.log");

    // 1. Attach outputs.
    let mut logger = Logger::new();
    logger.add_output(CsvOutput::new(&csv_path));
    logger.add_output(TextOutput::new(&text_path)?);
    logger.add_output(StdOutput::new());

    // 2. Fake training loop.
    let mut rng = SmallRng::seed_from_u64(SEED);
    let mut table = TabularRecord::new();

    for epoch in 1..=EPOCHS {
        logger.push_prefix(&format!("epoch {epoch} | "));
        logger.log("training")?;

        // Per-batch losses decay with some noise.
        let losses: Vec<f64> = (0..BATCHES_PER_EPOCH)
            .map(|_| 1.0 / epoch as f64 + rng.gen_range(-0.05..0.05))
            .collect();

        table.record("Epoch", epoch);
        table.push_prefix("Train/");
        table.record_stats("Loss", &losses, StatPlacement::Back);
        table.pop_prefix();

        // Evaluation only runs once the model has warmed up — the CSV
        // columns grow here and the file is rewritten once.
        if epoch >= FIRST_EVAL_EPOCH {
            let accuracy = 0.6 + 0.05 * epoch as f64 + rng.gen_range(0.0..0.02);
            table.record("Eval/Accuracy", accuracy);
        }

        logger.log(&table)?;
        table.clear();
        logger.dump_all()?;
        logger.pop_prefix();
    }

    logger.log(&format!("finished {EPOCHS} epochs"))?;

    // 3. Flush and detach everything.
    logger.remove_all()?;

    // 4. Summary: read the CSV back and report its final shape.
    let mut rdr = csv::Reader::from_path(&csv_path)?;
    let columns = rdr.headers()?.len();
    let rows = rdr.records().count();
    println!();
    println!("{csv_path} : {rows} rows x {columns} columns");
    println!("{text_path} : message + table log");

    Ok(())
}
