//! Per-worker route assignment.

use super::client::ClientId;
use serde::{Deserialize, Serialize};

/// Ordered visits of one worker. May be empty.
pub type Route = Vec<ClientId>;

/// One route slot per worker.
///
/// A genome is *valid* when every client of the instance appears in exactly
/// one route exactly once; operators preserve that, the evaluator and the
/// feasibility checks do not assume it.
///
/// Crossover works on the flattened sequence (routes concatenated in worker
/// order) and rebuilds routes from a length profile:
///
/// ```
/// use care_routing::models::Genome;
///
/// let g = Genome::new(vec![vec![3, 1], vec![], vec![2, 4, 5]]);
/// assert_eq!(g.flatten(), vec![3, 1, 2, 4, 5]);
/// assert_eq!(g.route_lengths(), vec![2, 0, 3]);
///
/// let back = Genome::from_flat(&g.flatten(), &g.route_lengths()).unwrap();
/// assert_eq!(back, g);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genome {
    routes: Vec<Route>,
}

impl Genome {
    /// Wraps explicit routes.
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// A genome with `num_workers` empty routes.
    pub fn empty(num_workers: usize) -> Self {
        Self {
            routes: vec![Vec::new(); num_workers],
        }
    }

    /// Rebuilds routes by cutting `flat` into consecutive runs of `lengths`.
    ///
    /// Returns `None` if the lengths don't sum to `flat.len()`.
    pub fn from_flat(flat: &[ClientId], lengths: &[usize]) -> Option<Self> {
        if lengths.iter().sum::<usize>() != flat.len() {
            return None;
        }
        let mut routes = Vec::with_capacity(lengths.len());
        let mut offset = 0;
        for &len in lengths {
            routes.push(flat[offset..offset + len].to_vec());
            offset += len;
        }
        Some(Self { routes })
    }

    /// All routes, indexed by worker.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Mutable access to the routes. The number of workers cannot change.
    pub fn routes_mut(&mut self) -> &mut [Route] {
        &mut self.routes
    }

    /// Route of worker `index`.
    pub fn route(&self, index: usize) -> &Route {
        &self.routes[index]
    }

    /// Number of route slots.
    pub fn num_workers(&self) -> usize {
        self.routes.len()
    }

    /// Total number of visits across all routes.
    pub fn num_visits(&self) -> usize {
        self.routes.iter().map(Vec::len).sum()
    }

    /// Routes concatenated in worker order.
    pub fn flatten(&self) -> Vec<ClientId> {
        self.routes.iter().flatten().copied().collect()
    }

    /// Length of every route, in worker order.
    pub fn route_lengths(&self) -> Vec<usize> {
        self.routes.iter().map(Vec::len).collect()
    }

    /// Indices of routes satisfying `pred`.
    pub(crate) fn route_indices_where(&self, pred: impl Fn(&Route) -> bool) -> Vec<usize> {
        self.routes
            .iter()
            .enumerate()
            .filter(|(_, r)| pred(r))
            .map(|(i, _)| i)
            .collect()
    }
}
