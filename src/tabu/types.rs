//! Move, candidate, and notification types for the tour search.

use serde::{Deserialize, Serialize};

use crate::models::Tour;

/// An unordered pair of points whose swap is forbidden.
///
/// Holds index positions of points (not tour positions), normalized so the
/// smaller one comes first; `TabuEntry::new(3, 7) == TabuEntry::new(7, 3)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabuEntry {
    a: usize,
    b: usize,
}

impl TabuEntry {
    /// Creates an entry for the pair `{a, b}`.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            a: a.min(b),
            b: a.max(b),
        }
    }

    /// The pair as `(smaller, larger)`.
    pub fn pair(&self) -> (usize, usize) {
        (self.a, self.b)
    }

    /// Returns `true` if this entry names the pair `{x, y}` in either order.
    pub fn matches(&self, x: usize, y: usize) -> bool {
        *self == Self::new(x, y)
    }
}

/// The neighborhood family that produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeighborhoodFamily {
    /// Swap of two adjacent positions.
    Adjacent,
    /// Swap of two random positions.
    Random,
    /// Swap of a long-edge endpoint with a random partner.
    LongestEdge,
    /// Release of the oldest tabu pair when nothing else is admissible.
    Fallback,
}

/// A neighbor tour together with the swapped pair that defines it.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// The neighbor tour.
    pub tour: Tour,
    /// The swapped points, recorded in the tabu list on acceptance.
    pub pair: TabuEntry,
    /// Family that produced the candidate.
    pub family: NeighborhoodFamily,
}

impl Candidate {
    /// Length of the candidate tour.
    pub fn length(&self) -> f64 {
        self.tour.length()
    }
}

/// Kind of change reported to a [`SearchObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourEvent {
    /// The accepted tour is a new best.
    Improved,
    /// The accepted tour did not beat the best.
    Explored,
}

/// Receives the current tour after every search iteration.
///
/// Implemented for any `FnMut(&Tour, TourEvent)`, so a closure works:
///
/// ```
/// use u_tsp::models::Tour;
/// use u_tsp::tabu::{SearchObserver, TourEvent};
///
/// let mut improved = 0;
/// let mut observer = |_: &Tour, event: TourEvent| {
///     if event == TourEvent::Improved {
///         improved += 1;
///     }
/// };
/// # fn takes<O: SearchObserver>(_: &mut O) {}
/// # takes(&mut observer);
/// ```
pub trait SearchObserver {
    /// Called with the tour the search just moved to.
    fn on_tour(&mut self, tour: &Tour, event: TourEvent);
}

impl<F> SearchObserver for F
where
    F: FnMut(&Tour, TourEvent),
{
    fn on_tour(&mut self, tour: &Tour, event: TourEvent) {
        self(tour, event)
    }
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_tour(&mut self, _tour: &Tour, _event: TourEvent) {}
}
