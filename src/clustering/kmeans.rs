//! Lloyd's k-means over `(latitude, longitude)` pairs.
//!
//! # Algorithm
//!
//! Each restart seeds centers with k-means++ from a deterministic RNG, then
//! alternates assign-to-nearest-center and recompute-center-as-mean until
//! no center moves more than `tolerance` or `max_iterations` is reached.
//! The restart with the lowest inertia wins.
//!
//! Coordinates are treated as planar and unweighted.
//!
//! # Complexity
//!
//! O(restarts · iterations · n · k).
//!
//! # Reference
//!
//! Lloyd, S. (1982). "Least squares quantization in PCM", *IEEE Trans.
//! Information Theory* 28(2), 129-137. Arthur, D. & Vassilvitskii, S. (2007).
//! "k-means++: The Advantages of Careful Seeding", *SODA '07*.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{BatchError, Result};

/// Tuning knobs for k-means.
///
/// # Examples
///
/// ```
/// use order_batcher::clustering::KMeansOptions;
///
/// let opts = KMeansOptions::default();
/// assert_eq!(opts.seed, 42);
/// assert_eq!(opts.restarts, 10);
/// assert!(opts.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KMeansOptions {
    /// RNG seed for center initialization.
    pub seed: u64,
    /// Number of independently seeded runs; the best is kept.
    pub restarts: usize,
    /// Iteration cap per run.
    pub max_iterations: usize,
    /// Largest center shift (degrees) still counted as converged.
    pub tolerance: f64,
}

impl Default for KMeansOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            restarts: 10,
            max_iterations: 300,
            tolerance: 1e-9,
        }
    }
}

impl KMeansOptions {
    /// Checks that every run terminates and at least one run happens.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Configuration`] for a zero restart count, a zero
    /// iteration cap or a negative / non-finite tolerance.
    pub fn validate(&self) -> Result<()> {
        if self.restarts == 0 {
            return Err(BatchError::configuration(
                "kmeans.restarts",
                self.restarts,
                "must be at least 1",
            ));
        }
        if self.max_iterations == 0 {
            return Err(BatchError::configuration(
                "kmeans.max_iterations",
                self.max_iterations,
                "must be at least 1",
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(BatchError::configuration(
                "kmeans.tolerance",
                self.tolerance,
                "must be a finite non-negative number",
            ));
        }
        Ok(())
    }
}

/// Outcome of a k-means fit.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansResult {
    /// Cluster label per input point, in `0..k`.
    pub labels: Vec<usize>,
    /// Final centers, indexed by label.
    pub centers: Vec<[f64; 2]>,
    /// Sum of squared distances from each point to its center.
    pub inertia: f64,
    /// Iterations used by the winning run.
    pub iterations: usize,
    /// Whether the winning run converged before the cap.
    pub converged: bool,
}

/// K-means clusterer with a fixed number of clusters.
///
/// # Examples
///
/// ```
/// use order_batcher::clustering::KMeans;
///
/// let points = vec![[0.0, 0.0], [0.1, 0.1], [10.0, 10.0], [10.1, 10.1]];
/// let result = KMeans::new(2).fit(&points);
/// assert_eq!(result.labels[0], result.labels[1]);
/// assert_ne!(result.labels[0], result.labels[2]);
/// ```
#[derive(Debug, Clone)]
pub struct KMeans {
    k: usize,
    options: KMeansOptions,
}

impl KMeans {
    /// Creates a clusterer for `k` clusters with default options.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            options: KMeansOptions::default(),
        }
    }

    /// Replaces the tuning options.
    pub fn with_options(mut self, options: KMeansOptions) -> Self {
        self.options = options;
        self
    }

    /// Number of clusters requested.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Clusters `points`.
    ///
    /// `k` is clamped to `[1, points.len()]`. Labels that attract no point
    /// (possible with duplicate coordinates) simply do not appear in
    /// `labels`. Not converging within the cap is not an error; the best
    /// labeling found is returned.
    pub fn fit(&self, points: &[[f64; 2]]) -> KMeansResult {
        let n = points.len();
        if n == 0 {
            return KMeansResult {
                labels: Vec::new(),
                centers: Vec::new(),
                inertia: 0.0,
                iterations: 0,
                converged: true,
            };
        }

        let k = self.k.clamp(1, n);
        let mut rng = StdRng::seed_from_u64(self.options.seed);
        let mut best = self.lloyd(points, init_plus_plus(points, k, &mut rng));

        for _ in 1..self.options.restarts {
            let run = self.lloyd(points, init_plus_plus(points, k, &mut rng));
            if run.inertia < best.inertia {
                best = run;
            }
        }

        best
    }

    fn lloyd(&self, points: &[[f64; 2]], mut centers: Vec<[f64; 2]>) -> KMeansResult {
        let k = centers.len();
        let mut labels = vec![0; points.len()];
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.options.max_iterations.max(1) {
            iterations += 1;
            assign(points, &centers, &mut labels);

            let mut sums = vec![[0.0, 0.0]; k];
            let mut counts = vec![0usize; k];
            for (p, &label) in points.iter().zip(&labels) {
                sums[label][0] += p[0];
                sums[label][1] += p[1];
                counts[label] += 1;
            }

            let mut max_shift: f64 = 0.0;
            for c in 0..k {
                // empty cluster keeps its previous center
                if counts[c] == 0 {
                    continue;
                }
                let next = [
                    sums[c][0] / counts[c] as f64,
                    sums[c][1] / counts[c] as f64,
                ];
                max_shift = max_shift.max(squared_distance(&centers[c], &next).sqrt());
                centers[c] = next;
            }

            if max_shift <= self.options.tolerance {
                converged = true;
                break;
            }
        }

        let inertia = assign(points, &centers, &mut labels);
        KMeansResult {
            labels,
            centers,
            inertia,
            iterations,
            converged,
        }
    }
}

/// Writes the nearest center index for every point and returns the inertia.
/// Ties go to the lower center index.
fn assign(points: &[[f64; 2]], centers: &[[f64; 2]], labels: &mut [usize]) -> f64 {
    let mut inertia = 0.0;
    for (p, label) in points.iter().zip(labels.iter_mut()) {
        let mut best = 0;
        let mut best_d = f64::INFINITY;
        for (c, center) in centers.iter().enumerate() {
            let d = squared_distance(p, center);
            if d < best_d {
                best = c;
                best_d = d;
            }
        }
        *label = best;
        inertia += best_d;
    }
    inertia
}

/// k-means++ seeding: each new center is drawn with probability
/// proportional to its squared distance from the nearest chosen center.
fn init_plus_plus(points: &[[f64; 2]], k: usize, rng: &mut StdRng) -> Vec<[f64; 2]> {
    let n = points.len();
    let mut centers = Vec::with_capacity(k);
    centers.push(points[rng.random_range(0..n)]);

    let mut nearest: Vec<f64> = points
        .iter()
        .map(|p| squared_distance(p, &centers[0]))
        .collect();

    while centers.len() < k {
        let total: f64 = nearest.iter().sum();
        let chosen = if total > 0.0 {
            let mut target = rng.random::<f64>() * total;
            let mut pick = n - 1;
            for (i, &d) in nearest.iter().enumerate() {
                if d <= 0.0 {
                    continue;
                }
                if target < d {
                    pick = i;
                    break;
                }
                target -= d;
            }
            pick
        } else {
            // every point already sits on a center
            rng.random_range(0..n)
        };

        let center = points[chosen];
        for (p, d) in points.iter().zip(nearest.iter_mut()) {
            *d = d.min(squared_distance(p, &center));
        }
        centers.push(center);
    }

    centers
}

fn squared_distance(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}
