use ndarray::Array1;

/// Performs an argsort on a 1D ndarray and returns an array of indices.
/// Equal values keep their original order.
pub fn argsort(array: &Array1<f64>) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..array.len()).collect();
    indices.sort_by(|&a, &b| array[a].total_cmp(&array[b]));
    indices
}

/// Sizes of every group of equal values that holds more than one element
pub fn tie_group_sizes(array: &Array1<f64>) -> Vec<usize> {
    let order = argsort(array);
    let mut sizes = Vec::new();
    let mut run = 1;
    for window in order.windows(2) {
        if array[window[0]] == array[window[1]] {
            run += 1;
        } else {
            if run > 1 {
                sizes.push(run);
            }
            run = 1;
        }
    }
    if run > 1 {
        sizes.push(run);
    }
    sizes
}

/// All unordered pairs `(a, b)` with `a < b` over `k` items, in lexicographic order
pub fn unordered_pairs(k: usize) -> Vec<(usize, usize)> {
    (0..k)
        .flat_map(|a| ((a + 1)..k).map(move |b| (a, b)))
        .collect()
}

#[cfg(test)]
mod testing {
    use super::{argsort, tie_group_sizes, unordered_pairs};
    use ndarray::array;

    #[test]
    fn test_argsort_forward() {
        let array = array![1.0, 2.0, 3.0, 4.0, 5.0];
        let sorted = argsort(&array);
        assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_argsort_reverse() {
        let array = array![5.0, 4.0, 3.0, 2.0, 1.0];
        let sorted = argsort(&array);
        assert_eq!(sorted, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_argsort_stable() {
        let array = array![2.0, 1.0, 2.0, 1.0];
        let sorted = argsort(&array);
        assert_eq!(sorted, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_tie_group_sizes() {
        assert!(tie_group_sizes(&array![1.0, 2.0, 3.0]).is_empty());
        assert_eq!(tie_group_sizes(&array![2.0, 1.0, 2.0, 3.0, 3.0, 3.0]), vec![2, 3]);
        assert_eq!(tie_group_sizes(&array![4.0, 4.0]), vec![2]);
    }

    #[test]
    fn test_unordered_pairs() {
        assert_eq!(unordered_pairs(3), vec![(0, 1), (0, 2), (1, 2)]);
        assert_eq!(unordered_pairs(6).len(), 15);
        assert!(unordered_pairs(1).is_empty());
    }
}
