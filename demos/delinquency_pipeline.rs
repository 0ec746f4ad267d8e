//! Delinquency-scoring pipeline demo, offline and deterministic.
//!
//! Models the full loop for a credit-delinquency score:
//! - Stage A (offline): sweep thresholds over a labeled validation batch and
//!   pick the operating point (minimize FNR, precision floor 0.30),
//! - Stage B (online): route new unlabeled cases through the uncertainty band
//!   into decision packets,
//! - Stage C (feedback): once outcomes arrive, reevaluate and propose the
//!   next threshold revision.
//!
//! Run:
//! `cargo run --example delinquency_pipeline`

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use riskband::{
    build_packets, plan_thresholds, Route, ScoredCase, ThresholdConfig, ThresholdRecord,
};

/// Synthetic scored batch: delinquent accounts skew toward high scores.
fn scored_batch(rng: &mut StdRng, n: usize, prefix: &str) -> Vec<ScoredCase> {
    (0..n)
        .map(|i| {
            let delinquent = rng.random::<f64>() < 0.25;
            let u = rng.random::<f64>();
            let score = if delinquent { u.powf(0.35) } else { u.powf(2.0) };
            ScoredCase::labeled(format!("{prefix}-{i:04}"), score, delinquent)
        })
        .collect()
}

fn split(cases: &[ScoredCase]) -> (Vec<bool>, Vec<f64>) {
    cases
        .iter()
        .map(|c| (c.label.unwrap_or(false), c.score))
        .unzip()
}

fn main() {
    let mut rng = StdRng::seed_from_u64(1234);
    let cfg = ThresholdConfig::default();

    // ----- Stage A: offline calibration on labeled history ------------------
    let history = scored_batch(&mut rng, 800, "hist");
    let (labels, scores) = split(&history);
    let plan = plan_thresholds(&labels, &scores, &cfg).expect("calibration");

    println!("sweep table ({} rows):", plan.sweep.len());
    println!("     t     tp    fp    tn    fn   prec  recall   fnr");
    for r in &plan.sweep {
        println!(
            "  {:>4.2}  {:>5} {:>5} {:>5} {:>5}  {:>5.3}  {:>5.3}  {:>5.3}",
            r.t,
            r.true_positives,
            r.false_positives,
            r.true_negatives,
            r.false_negatives,
            r.precision,
            r.recall,
            r.fnr
        );
    }

    let summary = plan.summary();
    println!(
        "\nchosen t*={} (constraint: {:?}), band=[{:.3}, {:.3}]",
        summary.chosen_threshold, plan.operating.constraint, summary.t1, summary.t2
    );
    if plan.operating.floor_relaxed() {
        println!("warning: precision floor was unsatisfiable; fell back to global minimum FNR");
    }

    let mut record = ThresholdRecord::propose("logreg", plan.operating);
    let band = record.activate(cfg.band_width).expect("activate");
    let version = record.version_tag();

    // ----- Stage B: route an online batch -----------------------------------
    let online: Vec<ScoredCase> = scored_batch(&mut rng, 300, "live")
        .into_iter()
        .map(|c| ScoredCase::new(c.id, c.score)) // labels unknown online
        .collect();
    let packets = build_packets(&online, band, &record.model_name, &version).expect("routing");

    let mut counts = [0usize; 3];
    for p in &packets {
        counts[match p.route {
            Route::LowRisk => 0,
            Route::Review => 1,
            Route::HighRisk => 2,
        }] += 1;
    }
    println!(
        "\nrouted {} cases under {version}: low_risk={} review={} high_risk={}",
        packets.len(),
        counts[0],
        counts[1],
        counts[2]
    );

    // ----- Stage C: outcomes arrive, reevaluate -----------------------------
    let feedback = scored_batch(&mut rng, 800, "fb");
    let (fb_labels, fb_scores) = split(&feedback);
    let candidate = record.reevaluate(&fb_labels, &fb_scores, &cfg).expect("feedback");
    println!(
        "\nfeedback proposes {} (fnr {:.3} vs active {:.3}); promotion is a caller decision",
        candidate.version_tag(),
        candidate.operating.metrics.fnr,
        record.operating.metrics.fnr
    );
}
