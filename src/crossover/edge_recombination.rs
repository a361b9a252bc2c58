//! Edge recombination crossover (ERX).
//!
//! # Algorithm
//!
//! 1. For every client, collect its left and right neighbours in both
//!    parents. Each flattened parent is read as a ring, so the last client of
//!    the last route neighbours the first client of the first route.
//! 2. Start from a random client. After visiting a client, strike it from
//!    every neighbour list, then move to
//!    - a remaining neighbour adjacent to it in *both* parents, else
//!    - the remaining neighbour with the fewest remaining neighbours (first
//!      found on ties), else
//!    - a uniformly random unvisited client.
//!
//! # Reference
//!
//! Whitley, Starkweather & Fuquay (1989), "Scheduling Problems and Traveling
//! Salesmen: The Genetic Edge Recombination Operator".

use crate::models::ClientId;
use crate::random::RandomSource;

/// Per-client neighbour lists, insertion-ordered and free of duplicates.
struct AdjacencyTable {
    union: Vec<Vec<ClientId>>,
    first: Vec<Vec<ClientId>>,
    second: Vec<Vec<ClientId>>,
}

impl AdjacencyTable {
    fn build(p1: &[ClientId], p2: &[ClientId]) -> Self {
        let bound = super::id_bound(p1, p2);
        let first = ring_neighbours(p1, bound);
        let second = ring_neighbours(p2, bound);
        let mut union = first.clone();
        for (id, extra) in second.iter().enumerate() {
            for &nb in extra {
                push_unique(&mut union[id], nb);
            }
        }
        Self {
            union,
            first,
            second,
        }
    }

    fn strike(&mut self, visited: ClientId) {
        for list in &mut self.union {
            list.retain(|&c| c != visited);
        }
    }

    fn next_after(&self, current: ClientId) -> Option<ClientId> {
        let remaining = &self.union[current];
        remaining
            .iter()
            .copied()
            .find(|nb| self.first[current].contains(nb) && self.second[current].contains(nb))
            .or_else(|| {
                remaining
                    .iter()
                    .copied()
                    .fold(None, |best: Option<ClientId>, nb| match best {
                        Some(b) if self.union[b].len() <= self.union[nb].len() => Some(b),
                        _ => Some(nb),
                    })
            })
    }
}

fn ring_neighbours(seq: &[ClientId], bound: usize) -> Vec<Vec<ClientId>> {
    let n = seq.len();
    let mut adj = vec![Vec::new(); bound];
    for (i, &id) in seq.iter().enumerate() {
        for nb in [seq[(i + n - 1) % n], seq[(i + 1) % n]] {
            if nb != id {
                push_unique(&mut adj[id], nb);
            }
        }
    }
    adj
}

fn push_unique(list: &mut Vec<ClientId>, id: ClientId) {
    if !list.contains(&id) {
        list.push(id);
    }
}

/// Builds the single ERX child of two flattened parents.
///
/// The result is a permutation of `p1`'s ids.
///
/// # Panics
///
/// Panics if `p2` contains an id that `p1` lacks.
pub fn edge_recombination<R: RandomSource + ?Sized>(
    p1: &[ClientId],
    p2: &[ClientId],
    rng: &mut R,
) -> Vec<ClientId> {
    let n = p1.len();
    if n == 0 {
        return Vec::new();
    }
    let mut table = AdjacencyTable::build(p1, p2);
    let mut visited = vec![false; table.union.len()];
    let mut child = Vec::with_capacity(n);
    let mut current = p1[rng.index(n)];

    loop {
        child.push(current);
        visited[current] = true;
        if child.len() == n {
            break;
        }
        table.strike(current);
        current = match table.next_after(current) {
            Some(next) => next,
            None => {
                let unvisited: Vec<ClientId> =
                    p1.iter().copied().filter(|&c| !visited[c]).collect();
                unvisited[rng.index(unvisited.len())]
            }
        };
    }
    child
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedSource, SeededSource};

    #[test]
    fn test_ring_neighbours_wrap() {
        let adj = ring_neighbours(&[1, 2, 3], 4);
        assert_eq!(adj[1], vec![3, 2]);
        assert_eq!(adj[2], vec![1, 3]);
        assert_eq!(adj[3], vec![2, 1]);
    }

    #[test]
    fn test_identical_parents_follow_ring() {
        let p = [1, 2, 3, 4, 5];
        // start at index 0 → client 1; 5 and 2 are common neighbours, 5 found first
        let mut rng = ScriptedSource::ints(&[0]);
        assert_eq!(edge_recombination(&p, &p, &mut rng), vec![1, 5, 4, 3, 2]);
        assert!(rng.is_exhausted());
    }

    #[test]
    fn test_fewest_neighbours_tie_break() {
        let p1 = [1, 2, 3, 4];
        let p2 = [1, 3, 2, 4];
        // 1: p1 {4, 2}, p2 {4, 3} → common 4
        // 4: p1 {3, 1}, p2 {2, 1}, remaining {3, 2}, no common; both have
        //    one remaining neighbour so the first found (3) wins
        // 3: remaining {2} → 2
        let mut rng = ScriptedSource::ints(&[0]);
        assert_eq!(edge_recombination(&p1, &p2, &mut rng), vec![1, 4, 3, 2]);
    }

    #[test]
    fn test_single_client() {
        let mut rng = ScriptedSource::ints(&[0]);
        assert_eq!(edge_recombination(&[7], &[7], &mut rng), vec![7]);
    }

    #[test]
    fn test_permutation_on_random_parents() {
        let mut rng = SeededSource::new(4);
        let mut p1: Vec<usize> = (1..=30).collect();
        let mut p2 = p1.clone();
        for _ in 0..20 {
            rng.shuffle(&mut p1);
            rng.shuffle(&mut p2);
            let mut child = edge_recombination(&p1, &p2, &mut rng);
            child.sort_unstable();
            assert_eq!(child, (1..=30).collect::<Vec<_>>());
        }
    }
}
