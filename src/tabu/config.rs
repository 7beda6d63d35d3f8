//! Tabu Search configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TspError};

/// Smallest tabu list capacity ever used.
pub const MIN_TABU_LIST_SIZE: usize = 20;

/// Configuration parameters for the tour search.
///
/// # Examples
///
/// ```
/// use u_tsp::tabu::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_max_bad_routes(500)
///     .with_worker_count(4)
///     .with_seed(42);
/// assert_eq!(config.max_bad_routes, 500);
/// assert_eq!(config.tabu_capacity(1000), 150);
/// assert_eq!(config.tabu_capacity(50), 20);
/// ```
///
/// Load from TOML:
///
/// ```
/// use u_tsp::tabu::SearchConfig;
///
/// let config = SearchConfig::from_toml_str(r#"
///     max_bad_routes = 3000
///     random_neighbor_fraction = 0.3
/// "#).unwrap();
/// assert_eq!(config.max_bad_routes, 3000);
/// assert_eq!(config.worker_count, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SearchConfig {
    /// Tabu list capacity. `None` derives `floor(0.15 × n)`; any value is
    /// raised to [`MIN_TABU_LIST_SIZE`].
    pub tabu_list_max_size: Option<usize>,
    /// Consecutive non-improving iterations before the search stops.
    pub max_bad_routes: usize,
    /// Hard cap on the total number of iterations.
    pub max_iterations: Option<usize>,
    /// Random swap trials per worker, as a fraction of the tour length.
    pub random_neighbor_fraction: f64,
    /// Fraction of the longest edges targeted by the edge worker.
    pub longest_edge_fraction: f64,
    /// Random partner positions tried per targeted edge.
    pub partner_trials: usize,
    /// Number of parallel neighborhood workers.
    pub worker_count: usize,
    /// Edges compared against each edge by the crossing optimizer.
    pub look_ahead: usize,
    /// Window size below which the crossing scan stops.
    pub min_window: usize,
    /// Run the crossing optimizer on every accepted neighbor.
    pub optimize_neighbors: bool,
    /// Construct from every start point and keep the shortest tour.
    pub multi_start: bool,
    /// Limit on the number of construction starts.
    pub max_starts: Option<usize>,
    /// Random seed (None for a fresh seed per run).
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tabu_list_max_size: None,
            max_bad_routes: 2000,
            max_iterations: None,
            random_neighbor_fraction: 0.2,
            longest_edge_fraction: 0.05,
            partner_trials: 8,
            worker_count: 8,
            look_ahead: 30,
            min_window: 4,
            optimize_neighbors: false,
            multi_start: true,
            max_starts: None,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Parses configuration from a TOML string; missing keys keep defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::ConfigParse`] on malformed TOML and
    /// [`TspError::InvalidConfig`] if a value is out of range.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is in range.
    pub fn validate(&self) -> Result<()> {
        if self.max_bad_routes == 0 {
            return Err(TspError::invalid_config("max_bad_routes must be >= 1"));
        }
        if self.worker_count == 0 {
            return Err(TspError::invalid_config("worker_count must be >= 1"));
        }
        for (name, value) in [
            ("random_neighbor_fraction", self.random_neighbor_fraction),
            ("longest_edge_fraction", self.longest_edge_fraction),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(TspError::invalid_config(format!(
                    "{name} must be in (0, 1], got {value}"
                )));
            }
        }
        if self.min_window == 0 || self.look_ahead < self.min_window {
            return Err(TspError::invalid_config(
                "look_ahead must be >= min_window >= 1",
            ));
        }
        Ok(())
    }

    /// Tabu list capacity for an instance of `n` points.
    pub fn tabu_capacity(&self, n: usize) -> usize {
        let size = self
            .tabu_list_max_size
            .unwrap_or_else(|| (n as f64 * 0.15).floor() as usize);
        size.max(MIN_TABU_LIST_SIZE)
    }

    /// Sets the tabu list capacity.
    pub fn with_tabu_list_max_size(mut self, size: usize) -> Self {
        self.tabu_list_max_size = Some(size);
        self
    }

    /// Sets the plateau length that stops the search.
    pub fn with_max_bad_routes(mut self, n: usize) -> Self {
        self.max_bad_routes = n;
        self
    }

    /// Sets a hard iteration cap.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }

    /// Sets the random swap fraction.
    pub fn with_random_neighbor_fraction(mut self, fraction: f64) -> Self {
        self.random_neighbor_fraction = fraction;
        self
    }

    /// Sets the longest-edge fraction.
    pub fn with_longest_edge_fraction(mut self, fraction: f64) -> Self {
        self.longest_edge_fraction = fraction;
        self
    }

    /// Sets the partner trials per targeted edge.
    pub fn with_partner_trials(mut self, n: usize) -> Self {
        self.partner_trials = n;
        self
    }

    /// Sets the number of parallel workers.
    pub fn with_worker_count(mut self, n: usize) -> Self {
        self.worker_count = n;
        self
    }

    /// Sets the crossing optimizer window.
    pub fn with_crossing_window(mut self, look_ahead: usize, min_window: usize) -> Self {
        self.look_ahead = look_ahead;
        self.min_window = min_window;
        self
    }

    /// Enables or disables crossing removal on accepted neighbors.
    pub fn with_optimize_neighbors(mut self, enabled: bool) -> Self {
        self.optimize_neighbors = enabled;
        self
    }

    /// Enables or disables multi-start construction.
    pub fn with_multi_start(mut self, enabled: bool) -> Self {
        self.multi_start = enabled;
        self
    }

    /// Limits the number of construction starts.
    pub fn with_max_starts(mut self, n: usize) -> Self {
        self.max_starts = Some(n);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
