//! Partially mapped crossover (PMX).

use crate::models::ClientId;

/// Builds one PMX child from `template[start..=end]` and `donor`.
///
/// Donor ids from the slice that the child lacks are placed by following the
/// mapping chain `template[i] → its index in donor → …` until it leaves the
/// slice. Remaining holes take the next unused donor id, scanning forward
/// from the hole with wraparound.
///
/// # Panics
///
/// Panics if the parents differ in length, the cut points are invalid, or
/// the parents are not permutations of the same ids.
///
/// # Examples
///
/// ```
/// use care_routing::crossover::pmx_with_cuts;
///
/// let p1 = [1, 2, 3, 4, 5, 6, 7, 8, 9];
/// let p2 = [9, 3, 7, 8, 2, 6, 5, 1, 4];
/// assert_eq!(pmx_with_cuts(&p1, &p2, 3, 6), vec![9, 3, 2, 4, 5, 6, 7, 1, 8]);
/// assert_eq!(pmx_with_cuts(&p2, &p1, 3, 6), vec![1, 7, 3, 8, 2, 6, 5, 4, 9]);
/// ```
pub fn pmx_with_cuts(
    template: &[ClientId],
    donor: &[ClientId],
    start: usize,
    end: usize,
) -> Vec<ClientId> {
    let n = template.len();
    assert_eq!(n, donor.len(), "parents must have equal length");
    assert!(start <= end && end < n, "cut points out of order or range");

    let bound = super::id_bound(template, donor);
    let mut child: Vec<Option<ClientId>> = vec![None; n];
    let mut used = vec![false; bound];
    let mut donor_index = vec![usize::MAX; bound];
    for (i, &id) in donor.iter().enumerate() {
        donor_index[id] = i;
    }
    let in_slice = |i: usize| (start..=end).contains(&i);

    for i in start..=end {
        child[i] = Some(template[i]);
        used[template[i]] = true;
    }

    for i in start..=end {
        let value = donor[i];
        if used[value] {
            continue;
        }
        let mut index = i;
        // a chain over a permutation visits each slot at most once
        for _ in 0..n {
            index = donor_index[template[index]];
            if !in_slice(index) && child[index].is_none() {
                child[index] = Some(value);
                used[value] = true;
                break;
            }
        }
    }

    for step in 1..n {
        let index = (end + step) % n;
        if child[index].is_some() {
            continue;
        }
        let mut j = index;
        while used[donor[j]] {
            j = (j + 1) % n;
        }
        child[index] = Some(donor[j]);
        used[donor[j]] = true;
    }

    child.into_iter().flatten().collect()
}
