/// Lexicographic iterator over all k-subsets of `0..n`.
///
/// Yields index vectors in increasing lexicographic order without
/// materializing the full C(n, k) collection. Deterministic ordering makes
/// "first valid combination" searches reproducible.
pub struct Combinations {
    n: usize,
    next: Option<Vec<usize>>,
}

impl Combinations {
    /// Total number of combinations C(n, k).
    pub fn count_of(n: usize, k: usize) -> usize {
        if k > n {
            0
        } else {
            (0..k).fold(1, |x, i| x * (n - i) / (i + 1))
        }
    }
    fn advance(&mut self) {
        let n = self.n;
        let Some(ref mut indices) = self.next else {
            return;
        };
        let k = indices.len();
        match (0..k).rev().find(|&i| indices[i] < n - k + i) {
            Some(i) => {
                indices[i] += 1;
                (i + 1..k).for_each(|j| indices[j] = indices[j - 1] + 1);
            }
            None => self.next = None,
        }
    }
}

/// (n, k) are immutable and must be decided at construction
impl From<(usize, usize)> for Combinations {
    fn from((n, k): (usize, usize)) -> Self {
        Self {
            n,
            next: (k > 0 && k <= n).then(|| (0..k).collect()),
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;
    fn next(&mut self) -> Option<Self::Item> {
        let last = self.next.clone()?;
        self.advance();
        Some(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn n_choose_0() {
        assert_eq!(Combinations::from((5, 0)).count(), 0);
    }
    #[test]
    fn n_choose_k() {
        assert_eq!(Combinations::from((12, 3)).count(), 220);
        assert_eq!(Combinations::count_of(12, 3), 220);
    }
    #[test]
    fn k_exceeds_n() {
        assert_eq!(Combinations::from((2, 3)).count(), 0);
    }
    #[test]
    fn lexicographic_order() {
        let all = Combinations::from((4, 2)).collect::<Vec<_>>();
        assert_eq!(
            all,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
    }
}
