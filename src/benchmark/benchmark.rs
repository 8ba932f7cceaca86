//! Broad-phase benchmark: brute force against sweep and prune.
//!
//! Detection only; circles are sampled, tested and thrown away, no body is
//! ever resolved. Timings vary between runs, the check/collision counts don't
//! for a fixed seed.

use std::fmt;
use std::time::Instant;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{SimError, SimResult};
use crate::simulation::broad_phase::{BroadPhase, BruteForce, DetectionStats, SweepAndPrune};
use crate::simulation::states::{CandidatePair, Circle};

#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    pub width: f64,       // sampling area
    pub height: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    pub counts: Vec<usize>, // body counts to run
    pub trials: usize,      // fresh circle sets per count
    pub seed: u64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
            radius_min: 2.0,
            radius_max: 8.0,
            counts: vec![200, 500, 1000],
            trials: 3,
            seed: 42,
        }
    }
}

impl BenchmarkConfig {
    pub fn validate(&self) -> SimResult<()> {
        let area_ok = self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite();
        if !area_ok {
            return Err(SimError::parameter(
                "width/height",
                format!("sampling area must be finite and positive, got {} x {}", self.width, self.height),
            ));
        }
        if !(self.radius_min > 0.0 && self.radius_min <= self.radius_max && self.radius_max.is_finite()) {
            return Err(SimError::parameter(
                "radius_min",
                format!("need 0 < radius_min <= radius_max < inf, got [{}, {}]", self.radius_min, self.radius_max),
            ));
        }
        if self.trials == 0 {
            return Err(SimError::parameter("trials", "must be at least 1"));
        }
        Ok(())
    }
}

/// Result for one body count, averaged over the trials
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRow {
    pub n: usize,
    pub mean_brute_force_ms: f64,
    pub mean_sweep_and_prune_ms: f64,
    pub speedup: f64,                  // brute / sap, infinite if sap took no time
    pub brute_force_checks: usize,     // summed over trials
    pub sweep_and_prune_checks: usize, // summed over trials
    pub collisions: usize,             // summed over trials, same for both
}

impl BenchmarkRow {
    pub fn csv_header() -> &'static str {
        "n,mean_brute_force_ms,mean_sweep_and_prune_ms,speedup_ratio"
    }

    pub fn to_csv(&self) -> String {
        format!(
            "{},{:.6},{:.6},{:.3}",
            self.n, self.mean_brute_force_ms, self.mean_sweep_and_prune_ms, self.speedup
        )
    }
}

impl fmt::Display for BenchmarkRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={:5} | Brute Force: {:8.3} ms | Sweep & Prune: {:8.3} ms | Speedup: {:5.2}x | checks {} vs {} | collisions {}",
            self.n,
            self.mean_brute_force_ms,
            self.mean_sweep_and_prune_ms,
            self.speedup,
            self.brute_force_checks,
            self.sweep_and_prune_checks,
            self.collisions
        )
    }
}

/// `n` circles, uniform position in `[0, width) x [0, height)`, uniform radius
pub fn random_circles<R: Rng>(rng: &mut R, n: usize, cfg: &BenchmarkConfig) -> Vec<Circle> {
    (0..n)
        .map(|_| {
            let x = rng.gen_range(0.0..cfg.width);
            let y = rng.gen_range(0.0..cfg.height);
            let r = rng.gen_range(cfg.radius_min..=cfg.radius_max);
            Circle::new(x, y, r)
        })
        .collect()
}

/// Time one detection pass, in milliseconds
fn timed<B: BroadPhase>(phase: &mut B, circles: &[Circle], pairs: &mut Vec<CandidatePair>) -> (DetectionStats, f64) {
    let t0 = Instant::now();
    let stats = phase.find_pairs(circles, pairs);
    (stats, t0.elapsed().as_secs_f64() * 1000.0)
}

/// Run the whole benchmark, one row per configured count
pub fn bench_detection(cfg: &BenchmarkConfig) -> SimResult<Vec<BenchmarkRow>> {
    cfg.validate()?;
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let mut brute_force = BruteForce;
    let mut sweep_and_prune = SweepAndPrune::new();
    let mut pairs = Vec::new();

    info!(
        "benchmark: area={}x{}, r in [{}, {}], {} trials per count",
        cfg.width, cfg.height, cfg.radius_min, cfg.radius_max, cfg.trials
    );

    let mut rows = Vec::with_capacity(cfg.counts.len());
    for &n in &cfg.counts {
        let mut ms_bf = 0.0;
        let mut ms_sap = 0.0;
        let mut row = BenchmarkRow {
            n,
            mean_brute_force_ms: 0.0,
            mean_sweep_and_prune_ms: 0.0,
            speedup: 0.0,
            brute_force_checks: 0,
            sweep_and_prune_checks: 0,
            collisions: 0,
        };

        for _ in 0..cfg.trials {
            let circles = random_circles(&mut rng, n, cfg);

            let (bf, t_bf) = timed(&mut brute_force, &circles, &mut pairs);
            let (sap, t_sap) = timed(&mut sweep_and_prune, &circles, &mut pairs);
            debug_assert_eq!(bf.collisions, sap.collisions);

            ms_bf += t_bf;
            ms_sap += t_sap;
            row.brute_force_checks += bf.checks;
            row.sweep_and_prune_checks += sap.checks;
            row.collisions += bf.collisions;
        }

        row.mean_brute_force_ms = ms_bf / cfg.trials as f64;
        row.mean_sweep_and_prune_ms = ms_sap / cfg.trials as f64;
        row.speedup = if row.mean_sweep_and_prune_ms > 0.0 {
            row.mean_brute_force_ms / row.mean_sweep_and_prune_ms
        } else {
            f64::INFINITY
        };
        info!("{row}");
        rows.push(row);
    }
    Ok(rows)
}

/// Render the rows as CSV, header first; paste into a spreadsheet to graph
pub fn report_csv(rows: &[BenchmarkRow]) -> String {
    let mut out = String::from(BenchmarkRow::csv_header());
    out.push('\n');
    for row in rows {
        out.push_str(&row.to_csv());
        out.push('\n');
    }
    out
}
