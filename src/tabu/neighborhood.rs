//! Swap neighborhoods of a tour.
//!
//! Three families of candidate swaps, each reduced to its single best
//! non-tabu candidate:
//!
//! 1. **Adjacent sweep** — swap positions `i` and `i + 1` for every `i`.
//! 2. **Random swaps** — `fraction × n` random position pairs.
//! 3. **Longest-edge swaps** — for the longest edges, swap the edge's end
//!    point with a few random partners.
//!
//! Families 2 and 3 run as independent tasks on a worker pool while the
//! adjacent sweep runs on the calling thread. Every task returns an owned
//! result into its own slot; slots are merged in task order after the join,
//! so the outcome depends only on the seed.

use std::panic::{self, AssertUnwindSafe};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::ThreadPool;
use tracing::warn;

use super::config::SearchConfig;
use super::tabu_list::TabuList;
use super::types::{Candidate, NeighborhoodFamily, TabuEntry};
use crate::distance::DistanceIndex;
use crate::models::Tour;

/// Best swap seen so far within one family.
#[derive(Debug, Clone, Copy)]
struct BestSwap {
    i: usize,
    j: usize,
    delta: f64,
}

impl BestSwap {
    fn offer(best: &mut Option<BestSwap>, i: usize, j: usize, delta: f64) {
        match *best {
            Some(b) if delta >= b.delta => {}
            _ => *best = Some(BestSwap { i, j, delta }),
        }
    }

    fn into_candidate(
        self,
        tour: &Tour,
        index: &DistanceIndex,
        family: NeighborhoodFamily,
    ) -> Candidate {
        let order = tour.order();
        Candidate {
            pair: TabuEntry::new(order[self.i], order[self.j]),
            tour: tour.swapped(self.i, self.j, index),
            family,
        }
    }
}

/// Generates candidate neighbors of a tour.
#[derive(Debug, Clone)]
pub struct NeighborhoodGenerator<'a> {
    index: &'a DistanceIndex,
    random_fraction: f64,
    longest_edge_fraction: f64,
    partner_trials: usize,
    random_tasks: usize,
}

impl<'a> NeighborhoodGenerator<'a> {
    /// Creates a generator over `index` using the neighborhood settings of
    /// `config`.
    pub fn new(index: &'a DistanceIndex, config: &SearchConfig) -> Self {
        Self {
            index,
            random_fraction: config.random_neighbor_fraction,
            longest_edge_fraction: config.longest_edge_fraction,
            partner_trials: config.partner_trials,
            random_tasks: config.worker_count.saturating_sub(1).max(1),
        }
    }

    /// Number of pool tasks dispatched per call to [`best_neighbor`](Self::best_neighbor):
    /// one longest-edge task plus the random-swap tasks.
    pub fn task_count(&self) -> usize {
        1 + self.random_tasks
    }

    /// Best non-tabu swap of two adjacent positions.
    pub fn adjacent_sweep(&self, tour: &Tour, tabu: &TabuList) -> Option<Candidate> {
        let n = tour.len();
        if n < 2 {
            return None;
        }
        let order = tour.order();
        let mut best = None;
        for i in 0..n - 1 {
            if tabu.is_tabu(order[i], order[i + 1]) {
                continue;
            }
            BestSwap::offer(&mut best, i, i + 1, tour.swap_delta(i, i + 1, self.index));
        }
        best.map(|b| b.into_candidate(tour, self.index, NeighborhoodFamily::Adjacent))
    }

    /// Best non-tabu swap among `fraction × n` random position pairs.
    pub fn random_swaps<R: Rng>(
        &self,
        tour: &Tour,
        tabu: &TabuList,
        rng: &mut R,
    ) -> Option<Candidate> {
        let n = tour.len();
        if n < 2 {
            return None;
        }
        let order = tour.order();
        let trials = ((n as f64 * self.random_fraction).round() as usize).max(1);
        let mut best = None;
        for _ in 0..trials {
            let (i, j) = distinct_pair(n, rng);
            if tabu.is_tabu(order[i], order[j]) {
                continue;
            }
            BestSwap::offer(&mut best, i, j, tour.swap_delta(i, j, self.index));
        }
        best.map(|b| b.into_candidate(tour, self.index, NeighborhoodFamily::Random))
    }

    /// Best non-tabu swap moving the end point of one of the longest edges.
    ///
    /// Edges are ranked by length (descending, ties by position); for the
    /// top `fraction × n` of them, the point closing the edge is swapped
    /// with `partner_trials` random partner positions.
    pub fn longest_edge_swaps<R: Rng>(
        &self,
        tour: &Tour,
        tabu: &TabuList,
        rng: &mut R,
    ) -> Option<Candidate> {
        let n = tour.len();
        if n < 2 {
            return None;
        }
        let order = tour.order();
        let edges = tour.edge_lengths(self.index);
        let mut ranked: Vec<usize> = (0..n).collect();
        ranked.sort_by(|&a, &b| edges[b].total_cmp(&edges[a]).then(a.cmp(&b)));
        let top = ((n as f64 * self.longest_edge_fraction).ceil() as usize).clamp(1, n);

        let mut best = None;
        for &k in &ranked[..top] {
            let i = (k + 1) % n;
            for _ in 0..self.partner_trials {
                let mut j = rng.random_range(0..n - 1);
                if j >= i {
                    j += 1;
                }
                if tabu.is_tabu(order[i], order[j]) {
                    continue;
                }
                BestSwap::offer(&mut best, i, j, tour.swap_delta(i, j, self.index));
            }
        }
        best.map(|b| b.into_candidate(tour, self.index, NeighborhoodFamily::LongestEdge))
    }

    /// Runs all families and returns the shortest admissible neighbor.
    ///
    /// Pool tasks are seeded from `seed` and their task number. Candidates
    /// are merged in a fixed order (adjacent sweep, longest-edge task,
    /// random tasks); on equal length the earlier one wins. A task that
    /// panics contributes no candidate.
    pub fn best_neighbor(
        &self,
        tour: &Tour,
        tabu: &TabuList,
        pool: &ThreadPool,
        seed: u64,
    ) -> Option<Candidate> {
        self.best_neighbor_with(tour, tabu, pool, seed, |task, seed| {
            self.family_task(task, tour, tabu, seed)
        })
    }

    /// [`best_neighbor`](Self::best_neighbor) with the pool task body
    /// supplied by the caller. `body` receives the task number and its seed.
    pub(crate) fn best_neighbor_with<F>(
        &self,
        tour: &Tour,
        tabu: &TabuList,
        pool: &ThreadPool,
        seed: u64,
        body: F,
    ) -> Option<Candidate>
    where
        F: Fn(usize, u64) -> Option<Candidate> + Sync,
    {
        let mut slots: Vec<Option<Candidate>> = (0..self.task_count()).map(|_| None).collect();
        let body = &body;

        let adjacent = pool.in_place_scope(|scope| {
            for (task, slot) in slots.iter_mut().enumerate() {
                scope.spawn(move |_| {
                    *slot = run_task(task, || body(task, task_seed(seed, task)));
                });
            }
            self.adjacent_sweep(tour, tabu)
        });

        merge(std::iter::once(adjacent).chain(slots))
    }

    /// Task 0 targets the longest edges; the others sample random swaps.
    fn family_task(&self, task: usize, tour: &Tour, tabu: &TabuList, seed: u64) -> Option<Candidate> {
        let mut rng = StdRng::seed_from_u64(seed);
        if task == 0 {
            self.longest_edge_swaps(tour, tabu, &mut rng)
        } else {
            self.random_swaps(tour, tabu, &mut rng)
        }
    }
}

/// Runs one pool task; a panicking task yields no candidate.
fn run_task<F>(task: usize, body: F) -> Option<Candidate>
where
    F: FnOnce() -> Option<Candidate>,
{
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(candidate) => candidate,
        Err(_) => {
            warn!(event = "worker_failed", task = task);
            None
        }
    }
}

/// Shortest candidate; the first one seen wins ties.
pub fn merge<I>(candidates: I) -> Option<Candidate>
where
    I: IntoIterator<Item = Option<Candidate>>,
{
    let mut best: Option<Candidate> = None;
    for candidate in candidates.into_iter().flatten() {
        let shorter = best
            .as_ref()
            .map_or(true, |b| candidate.length() < b.length());
        if shorter {
            best = Some(candidate);
        }
    }
    best
}

fn distinct_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    (i, j)
}

/// Derives an independent seed for one task (SplitMix64 finalizer).
pub(crate) fn task_seed(seed: u64, task: usize) -> u64 {
    let mut z = seed.wrapping_add((task as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
