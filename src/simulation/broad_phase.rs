//! Broad-phase collision detection over circles
//!
//! Two interchangeable strategies behind the [`BroadPhase`] trait:
//!
//! - [`BruteForce`] tests every unordered pair, `n(n-1)/2` checks.
//! - [`SweepAndPrune`] sorts the circles by the left edge of their x-interval
//!   and sweeps left to right, keeping an active list of intervals that may
//!   still overlap what comes next. Only pairs whose x-intervals overlap get an
//!   exact test, so sparse scenes cost far less than `O(n^2)`. When every
//!   interval overlaps on x it degrades to brute force.
//!
//! Both report exactly the same set of overlapping pairs; only the number of
//! checks differs, and sweep-and-prune never does more than brute force.

use super::states::{overlaps, CandidatePair, Collidable};

/// Work done by one detection pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectionStats {
    pub checks: usize,     // pairs considered by the strategy
    pub collisions: usize, // pairs passing the exact overlap test
}

pub trait BroadPhase {
    /// Push every overlapping pair of `shapes` into `pairs` (cleared first) and
    /// return how many checks it took. Output order is deterministic for a
    /// given input order
    fn find_pairs<T: Collidable>(&mut self, shapes: &[T], pairs: &mut Vec<CandidatePair>) -> DetectionStats;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForce;

impl BroadPhase for BruteForce {
    fn find_pairs<T: Collidable>(&mut self, shapes: &[T], pairs: &mut Vec<CandidatePair>) -> DetectionStats {
        pairs.clear();
        let mut stats = DetectionStats::default();
        for i in 0..shapes.len() {
            for j in (i + 1)..shapes.len() {
                stats.checks += 1;
                if overlaps(&shapes[i], &shapes[j]) {
                    stats.collisions += 1;
                    pairs.push(CandidatePair::new(i, j));
                }
            }
        }
        stats
    }

    fn name(&self) -> &'static str {
        "brute_force"
    }
}

/// x-extent of one shape, tagged with its index
#[derive(Debug, Clone, Copy)]
struct Interval {
    min: f64,
    max: f64,
    index: usize,
}

/// Single-axis sweep and prune.
///
/// The sort and active buffers are kept between calls so a running scene
/// doesn't reallocate them every tick.
#[derive(Debug, Clone, Default)]
pub struct SweepAndPrune {
    vertical_filter: bool,
    intervals: Vec<Interval>,
    active: Vec<Interval>,
}

impl SweepAndPrune {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip the exact test for x-overlapping pairs whose centers are already
    /// `r1 + r2` or more apart vertically. Such a pair still counts as a check
    pub fn with_vertical_filter(mut self, enabled: bool) -> Self {
        self.vertical_filter = enabled;
        self
    }

    pub fn vertical_filter(&self) -> bool {
        self.vertical_filter
    }
}

impl BroadPhase for SweepAndPrune {
    fn find_pairs<T: Collidable>(&mut self, shapes: &[T], pairs: &mut Vec<CandidatePair>) -> DetectionStats {
        pairs.clear();
        self.intervals.clear();
        self.intervals.extend(shapes.iter().enumerate().map(|(index, s)| Interval {
            min: s.left(),
            max: s.right(),
            index,
        }));
        // stable: equal left edges keep their original index order
        self.intervals.sort_by(|a, b| a.min.total_cmp(&b.min));

        let mut stats = DetectionStats::default();
        self.active.clear();
        for current in &self.intervals {
            // nothing later in sort order can reach an interval ending here
            self.active.retain(|a| a.max > current.min);

            let shape = &shapes[current.index];
            for other in &self.active {
                stats.checks += 1;
                let candidate = &shapes[other.index];
                if self.vertical_filter {
                    let dy = (shape.center().y - candidate.center().y).abs();
                    if dy >= shape.radius() + candidate.radius() {
                        continue;
                    }
                }
                if overlaps(shape, candidate) {
                    stats.collisions += 1;
                    pairs.push(CandidatePair::new(other.index, current.index));
                }
            }
            self.active.push(*current);
        }
        stats
    }

    fn name(&self) -> &'static str {
        "sweep_and_prune"
    }
}

/// Runtime-selectable strategy, toggled by input events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BroadPhaseKind {
    BruteForce,
    #[default]
    SweepAndPrune,
}

impl BroadPhaseKind {
    pub fn toggled(self) -> Self {
        match self {
            BroadPhaseKind::BruteForce => BroadPhaseKind::SweepAndPrune,
            BroadPhaseKind::SweepAndPrune => BroadPhaseKind::BruteForce,
        }
    }
}

/// Holds both strategies and dispatches to the selected one
#[derive(Debug, Clone, Default)]
pub struct Detector {
    pub kind: BroadPhaseKind,
    brute_force: BruteForce,
    sweep_and_prune: SweepAndPrune,
}

impl Detector {
    pub fn new(kind: BroadPhaseKind, vertical_filter: bool) -> Self {
        Self {
            kind,
            brute_force: BruteForce,
            sweep_and_prune: SweepAndPrune::new().with_vertical_filter(vertical_filter),
        }
    }

    pub fn toggle(&mut self) {
        self.kind = self.kind.toggled();
    }
}

impl BroadPhase for Detector {
    fn find_pairs<T: Collidable>(&mut self, shapes: &[T], pairs: &mut Vec<CandidatePair>) -> DetectionStats {
        match self.kind {
            BroadPhaseKind::BruteForce => self.brute_force.find_pairs(shapes, pairs),
            BroadPhaseKind::SweepAndPrune => self.sweep_and_prune.find_pairs(shapes, pairs),
        }
    }

    fn name(&self) -> &'static str {
        match self.kind {
            BroadPhaseKind::BruteForce => self.brute_force.name(),
            BroadPhaseKind::SweepAndPrune => self.sweep_and_prune.name(),
        }
    }
}
