//! Order-1 crossover (OX).

use crate::models::ClientId;

/// Builds one OX child: keeps `template[start..=end]` in place and fills the
/// rest from `donor`, reading and writing forward from `end + 1` with
/// wraparound and skipping ids already placed.
///
/// # Panics
///
/// Panics if the parents differ in length, `end` is out of range, or
/// `start > end`.
///
/// # Examples
///
/// ```
/// use care_routing::crossover::order1_with_cuts;
///
/// let p1 = [1, 2, 3, 4, 5, 6, 7, 8, 9];
/// let p2 = [9, 3, 7, 8, 2, 6, 5, 1, 4];
/// assert_eq!(order1_with_cuts(&p1, &p2, 3, 6), vec![3, 8, 2, 4, 5, 6, 7, 1, 9]);
/// assert_eq!(order1_with_cuts(&p2, &p1, 3, 6), vec![3, 4, 7, 8, 2, 6, 5, 9, 1]);
/// ```
pub fn order1_with_cuts(
    template: &[ClientId],
    donor: &[ClientId],
    start: usize,
    end: usize,
) -> Vec<ClientId> {
    let n = template.len();
    assert_eq!(n, donor.len(), "parents must have equal length");
    assert!(start <= end && end < n, "cut points out of order or range");

    let mut child = vec![0; n];
    let mut used = vec![false; super::id_bound(template, donor)];

    for i in start..=end {
        child[i] = template[i];
        used[template[i]] = true;
    }

    let mut pos = (end + 1) % n;
    for offset in 0..n {
        let val = donor[(end + 1 + offset) % n];
        if !used[val] {
            used[val] = true;
            child[pos] = val;
            pos = (pos + 1) % n;
        }
    }
    child
}
