//! Pareto dominance over objective vectors.
//!
//! Every objective is **maximized**. Each function takes one objective
//! vector per candidate and returns indices, so callers keep candidates in
//! whatever container they like.
//!
//! # References
//!
//! Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"

use rand::seq::index;
use rand::Rng;

/// Returns `true` when `a` Pareto-dominates `b`: `a` is no worse in every
/// objective and strictly better in at least one.
///
/// ```
/// use metaheur::operators::pareto::pareto_dominates;
///
/// assert!(pareto_dominates(&[3.0, 2.0], &[3.0, 1.0]));
/// assert!(!pareto_dominates(&[3.0, 2.0], &[3.0, 2.0]));
/// assert!(!pareto_dominates(&[3.0, 0.0], &[1.0, 2.0]));
/// ```
pub fn pareto_dominates(a: &[f64], b: &[f64]) -> bool {
    debug_assert_eq!(a.len(), b.len(), "objective vectors differ in length");
    let mut strictly = false;
    for (&x, &y) in a.iter().zip(b) {
        if x < y {
            return false;
        }
        if x > y {
            strictly = true;
        }
    }
    strictly
}

/// Indices of the candidates no other candidate dominates, in input order.
///
/// Identical objective vectors do not dominate each other, so duplicates
/// all stay in the front.
pub fn non_dominated_front(objectives: &[Vec<f64>]) -> Vec<usize> {
    (0..objectives.len())
        .filter(|&i| {
            !objectives
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && pareto_dominates(other, &objectives[i]))
        })
        .collect()
}

/// Fronts produced by [`non_dominated_sort`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParetoFronts {
    /// Front index of each candidate; 0 is the non-dominated front.
    pub ranks: Vec<usize>,

    /// Candidate indices grouped by front, ascending within each front.
    pub fronts: Vec<Vec<usize>>,
}

/// Fast non-dominated sorting into successive fronts.
///
/// # Complexity
/// O(m * n^2) for `n` candidates and `m` objectives
pub fn non_dominated_sort(objectives: &[Vec<f64>]) -> ParetoFronts {
    let n = objectives.len();
    let mut dominated_count = vec![0usize; n];
    let mut dominates: Vec<Vec<usize>> = vec![Vec::new(); n];

    for i in 0..n {
        for j in (i + 1)..n {
            if pareto_dominates(&objectives[i], &objectives[j]) {
                dominates[i].push(j);
                dominated_count[j] += 1;
            } else if pareto_dominates(&objectives[j], &objectives[i]) {
                dominates[j].push(i);
                dominated_count[i] += 1;
            }
        }
    }

    let mut ranks = vec![0usize; n];
    let mut fronts = Vec::new();
    let mut current: Vec<usize> = (0..n).filter(|&i| dominated_count[i] == 0).collect();
    while !current.is_empty() {
        let mut next = Vec::new();
        for &i in &current {
            for &j in &dominates[i] {
                dominated_count[j] -= 1;
                if dominated_count[j] == 0 {
                    ranks[j] = fronts.len() + 1;
                    next.push(j);
                }
            }
        }
        next.sort_unstable();
        fronts.push(current);
        current = next;
    }

    ParetoFronts { ranks, fronts }
}

/// Binary tournament by Pareto dominance.
///
/// Draws two distinct candidates; a dominating one wins, otherwise the
/// winner is chosen uniformly. With a single candidate, returns it.
///
/// # Panics
/// Panics if `objectives` is empty.
pub fn pareto_binary_tournament<R: Rng>(objectives: &[Vec<f64>], rng: &mut R) -> usize {
    let n = objectives.len();
    assert!(n > 0, "cannot select from empty population");
    if n == 1 {
        return 0;
    }
    let pair = index::sample(rng, n, 2);
    let (a, b) = (pair.index(0), pair.index(1));
    if pareto_dominates(&objectives[a], &objectives[b]) {
        a
    } else if pareto_dominates(&objectives[b], &objectives[a]) {
        b
    } else if rng.random_bool(0.5) {
        a
    } else {
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_dominance_requires_strict_gain() {
        assert!(pareto_dominates(&[2.0, 2.0], &[1.0, 2.0]));
        assert!(!pareto_dominates(&[1.0, 2.0], &[2.0, 2.0]));
        assert!(!pareto_dominates(&[1.0, 1.0], &[1.0, 1.0]));
    }

    #[test]
    fn test_front_drops_dominated() {
        let objs = vec![
            vec![5.0, 1.0],
            vec![3.0, 3.0],
            vec![1.0, 5.0],
            vec![2.0, 2.0], // dominated by (3, 3)
        ];
        assert_eq!(non_dominated_front(&objs), vec![0, 1, 2]);
    }

    #[test]
    fn test_front_keeps_duplicates() {
        let objs = vec![vec![1.0, 1.0], vec![1.0, 1.0], vec![0.0, 0.0]];
        assert_eq!(non_dominated_front(&objs), vec![0, 1]);
    }

    #[test]
    fn test_sort_chain() {
        let objs = vec![vec![1.0, 1.0], vec![3.0, 3.0], vec![2.0, 2.0]];
        let sorted = non_dominated_sort(&objs);
        assert_eq!(sorted.ranks, vec![2, 0, 1]);
        assert_eq!(sorted.fronts, vec![vec![1], vec![2], vec![0]]);
    }

    #[test]
    fn test_sort_mixed_fronts() {
        let objs = vec![
            vec![5.0, 1.0],
            vec![3.0, 3.0],
            vec![1.0, 5.0],
            vec![2.0, 2.0],
            vec![0.0, 0.0],
        ];
        let sorted = non_dominated_sort(&objs);
        assert_eq!(sorted.ranks, vec![0, 0, 0, 1, 2]);
        assert_eq!(sorted.fronts[0], non_dominated_front(&objs));
    }

    #[test]
    fn test_sort_empty() {
        let sorted = non_dominated_sort(&[]);
        assert!(sorted.ranks.is_empty());
        assert!(sorted.fronts.is_empty());
    }

    #[test]
    fn test_binary_tournament_prefers_dominant() {
        let objs = vec![vec![1.0, 1.0], vec![2.0, 2.0]];
        let mut rng = create_rng(4);
        for _ in 0..100 {
            assert_eq!(pareto_binary_tournament(&objs, &mut rng), 1);
        }
    }

    #[test]
    fn test_binary_tournament_incomparable_is_fair() {
        let objs = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let mut rng = create_rng(4);
        let firsts = (0..2000)
            .filter(|_| pareto_binary_tournament(&objs, &mut rng) == 0)
            .count();
        assert!((850..1150).contains(&firsts), "got {firsts}");
    }
}
