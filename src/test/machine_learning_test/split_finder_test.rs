use super::*;

#[test]
fn test_find_split_single_feature() {
    let x = array![[1.0], [2.0], [3.0], [4.0]];
    let y = array![0, 0, 1, 1];

    let split = find_split(x.view(), y.view(), &[0]).unwrap();
    assert_eq!(split.feature_index, 0);
    assert_eq!(split.threshold, 2.5);
    assert_abs_diff_eq!(split.gain, 1.0, epsilon = 1e-12);
}

#[test]
fn test_find_split_unsorted_rows_and_duplicates() {
    // Duplicated values only produce one candidate per adjacent distinct pair
    let x = array![[4.0], [1.0], [3.0], [1.0], [4.0], [3.0]];
    let y = array![1, 0, 1, 0, 1, 1];

    let split = find_split(x.view(), y.view(), &[0]).unwrap();
    assert_eq!(split.threshold, 2.0);
    assert_abs_diff_eq!(split.gain, crate::math::entropy(&y), epsilon = 1e-12);
}

#[test]
fn test_find_split_picks_informative_feature() {
    let x = array![
        [7.0, 1.0, 0.5],
        [3.0, 2.0, 0.5],
        [5.0, 8.0, 0.5],
        [1.0, 9.0, 0.5],
    ];
    let y = array![0, 0, 1, 1];

    let split = find_split(x.view(), y.view(), &[0, 1, 2]).unwrap();
    assert_eq!(split.feature_index, 1);
    assert_eq!(split.threshold, 5.0);
}

#[test]
fn test_find_split_only_searches_given_features() {
    let x = array![[1.0, 0.0], [2.0, 0.0], [3.0, 1.0], [4.0, 1.0]];
    let y = array![0, 1, 0, 1];

    // Feature 1 alone cannot separate the classes, feature 0 is not allowed
    let split = find_split(x.view(), y.view(), &[1]).unwrap();
    assert_eq!(split.feature_index, 1);
    assert_eq!(split.gain, 0.0);
    assert_eq!(split.threshold, 0.0);
}

#[test]
fn test_find_split_tie_keeps_first_feature() {
    // Columns 0 and 2 are identical perfect separators
    let x = array![[1.0, 5.0, 1.0], [2.0, 5.0, 2.0], [3.0, 5.0, 3.0], [4.0, 5.0, 4.0]];
    let y = array![0, 0, 1, 1];

    let split = find_split(x.view(), y.view(), &[2, 0]).unwrap();
    assert_eq!(split.feature_index, 2);

    let split = find_split(x.view(), y.view(), &[1, 0, 2]).unwrap();
    assert_eq!(split.feature_index, 0);
}

#[test]
fn test_find_split_tie_keeps_smallest_threshold() {
    // Cutting off either end sample gives the same gain
    let x = array![[1.0], [2.0], [3.0], [4.0]];
    let y = array![0, 1, 1, 0];

    let split = find_split(x.view(), y.view(), &[0]).unwrap();
    assert_eq!(split.threshold, 1.5);
    assert!(split.gain > 0.0);
}

#[test]
fn test_find_split_constant_feature_returns_default() {
    let x = array![[3.0, 3.0], [3.0, 3.0], [3.0, 3.0]];
    let y = array![0, 1, 1];

    let split = find_split(x.view(), y.view(), &[1, 0]).unwrap();
    assert_eq!(split.feature_index, 1);
    assert_eq!(split.threshold, 0.0);
    assert_eq!(split.gain, 0.0);
}

#[test]
fn test_find_split_pure_labels_returns_default() {
    let x = array![[1.0], [2.0], [3.0]];
    let y = array![4, 4, 4];

    let split = find_split(x.view(), y.view(), &[0]).unwrap();
    assert_eq!(split.gain, 0.0);
    assert_eq!(split.threshold, 0.0);
}

#[test]
fn test_find_split_xor_returns_default_rule() {
    // Every midpoint leaves both sides with the parent's class ratio
    let x = array![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
    let y = array![0, 1, 1, 0];

    let split = find_split(x.view(), y.view(), &[0, 1]).unwrap();
    assert_eq!(
        split,
        Split {
            feature_index: 0,
            threshold: 0.0,
            gain: 0.0
        }
    );

    // The default rule still separates the rows
    let (_, y_true, _, y_false) =
        partition(x.view(), y.view(), split.feature_index, split.threshold).unwrap();
    assert_eq!(y_true, array![0, 1]);
    assert_eq!(y_false, array![1, 0]);
}

#[test]
fn test_find_split_parallel_matches_expected() {
    // Enough candidate features for the parallel scan
    let (x, y) = two_cluster_data(60, 6, 11);
    let feature_indices = [5, 4, 3, 2, 1, 0];

    let split = find_split(x.view(), y.view(), &feature_indices).unwrap();
    assert_abs_diff_eq!(split.gain, 1.0, epsilon = 1e-12);

    // Both cluster features separate perfectly; the first one listed wins
    assert_eq!(split.feature_index, 1);

    let again = find_split(x.view(), y.view(), &feature_indices).unwrap();
    assert_eq!(split, again);
}

#[test]
fn test_find_split_errors() {
    let x = array![[1.0, 2.0], [3.0, 4.0]];
    let y = array![0, 1];

    assert!(matches!(
        find_split(x.view(), y.view(), &[]),
        Err(ModelError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        find_split(x.view(), y.view(), &[2]),
        Err(ModelError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        find_split(x.view(), y.view(), &[0, 0]),
        Err(ModelError::InvalidConfiguration(_))
    ));

    let short_y = array![0];
    assert!(matches!(
        find_split(x.view(), short_y.view(), &[0]),
        Err(ModelError::InputValidationError(_))
    ));

    let empty_x = Array2::<f64>::zeros((0, 2));
    let empty_y = Array1::<i32>::zeros(0);
    assert_eq!(
        find_split(empty_x.view(), empty_y.view(), &[0]),
        Err(ModelError::EmptyDataset)
    );
}

#[test]
fn test_partition_threshold_goes_true() {
    let x = array![[1.0, 10.0], [2.5, 20.0], [3.0, 30.0], [0.5, 40.0]];
    let y = array![1, 2, 3, 4];

    let (x_true, y_true, x_false, y_false) = partition(x.view(), y.view(), 0, 2.5).unwrap();

    assert_eq!(y_true, array![1, 2, 4]);
    assert_eq!(x_true, array![[1.0, 10.0], [2.5, 20.0], [0.5, 40.0]]);
    assert_eq!(y_false, array![3]);
    assert_eq!(x_false, array![[3.0, 30.0]]);
}

#[test]
fn test_partition_is_complete() {
    let (x, y) = noisy_data(50, 3, 3, 5);

    for feature_index in 0..3 {
        for &threshold in &[-1.0, 2.0, 5.0, 7.5, 11.0] {
            let (x_true, y_true, x_false, y_false) =
                partition(x.view(), y.view(), feature_index, threshold).unwrap();

            assert_eq!(y_true.len() + y_false.len(), y.len());
            assert_eq!(x_true.nrows(), y_true.len());
            assert_eq!(x_false.nrows(), y_false.len());
            assert!(x_true.column(feature_index).iter().all(|&v| v <= threshold));
            assert!(x_false.column(feature_index).iter().all(|&v| v > threshold));
        }
    }
}

#[test]
fn test_partition_empty_side() {
    let x = array![[1.0], [2.0]];
    let y = array![0, 1];

    let (x_true, y_true, _, y_false) = partition(x.view(), y.view(), 0, f64::INFINITY).unwrap();
    assert_eq!(y_true.len(), 2);
    assert!(y_false.is_empty());
    assert_eq!(x_true.dim(), (2, 1));
}

#[test]
fn test_partition_errors() {
    let x = array![[1.0], [2.0]];
    let y = array![0, 1];

    assert!(matches!(
        partition(x.view(), y.view(), 1, 0.0),
        Err(ModelError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        partition(x.view(), array![0].view(), 0, 0.0),
        Err(ModelError::InputValidationError(_))
    ));
}
