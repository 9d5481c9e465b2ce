use super::*;
use tracing::trace;

/// Default minimum number of candidate features required to search them in parallel
const DEFAULT_PARALLEL_THRESHOLD_FEATURES: usize = 4;

/// The rows and labels on each side of a split, as owned copies:
/// `(x_true, y_true, x_false, y_false)`.
pub type Partition<L> = (Array2<f64>, Array1<L>, Array2<f64>, Array1<L>);

/// The best split rule found for a tree node.
///
/// Samples with `x[feature_index] <= threshold` go to the true branch, all
/// others to the false branch.
///
/// # Fields
///
/// - `feature_index` - Column the rule tests.
/// - `threshold` - Cut point, the midpoint of two adjacent distinct column values.
/// - `gain` - Information gain of the rule. `0.0` means no candidate was informative and
///   the rule is the default one: the first feature with threshold `0.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Split {
    pub feature_index: usize,
    pub threshold: f64,
    pub gain: f64,
}

/// Finds the feature and threshold with the highest information gain.
///
/// Every feature in `feature_indices` is scanned: its distinct values are sorted and
/// the midpoint of each adjacent pair is tried as a threshold. The search only moves
/// off the default rule on a strict improvement over zero gain, so ties keep the
/// earliest candidate (first feature in `feature_indices` order, then the smallest
/// threshold). Features are scanned on rayon workers when there are enough of them;
/// the result is identical to the sequential scan.
///
/// # Parameters
///
/// - `x` - Feature matrix with shape (n_samples, n_features).
/// - `y` - Class labels with shape (n_samples,).
/// - `feature_indices` - Columns allowed to take part in the split, in tie-break order.
///
/// # Returns
///
/// - `Ok(Split)` - The best rule. A `gain` of `0.0` means nothing was informative and the
///   default rule `x[feature_indices[0]] <= 0.0` is returned.
/// - `Err(ModelError::EmptyDataset)` - If `x` has no rows.
/// - `Err(ModelError::InputValidationError)` - If `x` and `y` differ in length.
/// - `Err(ModelError::InvalidConfiguration)` - If `feature_indices` is empty, repeats an index,
///   or references a column that does not exist.
///
/// # Examples
/// ```rust
/// use rustytree::machine_learning::find_split;
/// use ndarray::array;
///
/// let x = array![[1.0], [2.0], [3.0], [4.0]];
/// let y = array![0, 0, 1, 1];
/// let split = find_split(x.view(), y.view(), &[0]).unwrap();
/// assert_eq!(split.threshold, 2.5);
/// ```
pub fn find_split<L: Label>(
    x: ArrayView2<f64>,
    y: ArrayView1<L>,
    feature_indices: &[usize],
) -> Result<Split, ModelError> {
    if x.nrows() == 0 {
        return Err(ModelError::EmptyDataset);
    }
    if x.nrows() != y.len() {
        return Err(ModelError::InputValidationError(format!(
            "Input data and label vector have different lengths, x rows: {}, y length: {}",
            x.nrows(),
            y.len()
        )));
    }
    validate_feature_indices(feature_indices, x.ncols())?;

    let per_feature: Vec<Option<(f64, f64)>> =
        if feature_indices.len() >= DEFAULT_PARALLEL_THRESHOLD_FEATURES {
            feature_indices
                .par_iter()
                .map(|&feature_index| best_threshold(x, y, feature_index))
                .collect()
        } else {
            feature_indices
                .iter()
                .map(|&feature_index| best_threshold(x, y, feature_index))
                .collect()
        };

    let mut best = Split {
        feature_index: feature_indices[0],
        threshold: 0.0,
        gain: 0.0,
    };

    for (&feature_index, candidate) in feature_indices.iter().zip(per_feature) {
        let Some((threshold, gain)) = candidate else {
            continue;
        };
        if gain > best.gain {
            best = Split {
                feature_index,
                threshold,
                gain,
            };
            trace!(feature_index, threshold, gain, "new best split");
        }
    }

    Ok(best)
}

/// Returns the first threshold with the highest positive gain on one column, with its gain.
fn best_threshold<L: Label>(
    x: ArrayView2<f64>,
    y: ArrayView1<L>,
    feature_index: usize,
) -> Option<(f64, f64)> {
    let column = x.column(feature_index);

    let mut values = column.to_vec();
    values.sort_by(f64::total_cmp);
    values.dedup();

    let mut best_gain = 0.0;
    let mut best = None;

    for pair in values.windows(2) {
        let threshold = (pair[0] + pair[1]) / 2.0;

        let mut y_true = Vec::with_capacity(y.len());
        let mut y_false = Vec::with_capacity(y.len());
        for (&value, &label) in column.iter().zip(y.iter()) {
            if value <= threshold {
                y_true.push(label);
            } else {
                y_false.push(label);
            }
        }

        let gain = information_gain(&y, &Array1::from_vec(y_true), &Array1::from_vec(y_false));
        if gain > best_gain {
            best_gain = gain;
            best = Some((threshold, gain));
        }
    }

    best
}

/// Splits a dataset on the rule `x[feature_index] <= threshold`.
///
/// Row order is preserved on both sides, and every row lands on exactly one side.
///
/// # Parameters
///
/// - `x` - Feature matrix with shape (n_samples, n_features).
/// - `y` - Class labels with shape (n_samples,).
/// - `feature_index` - Column the rule tests.
/// - `threshold` - Cut point; rows with a value equal to it go to the true side.
///
/// # Returns
///
/// - `Ok(Partition<L>)` - Owned `(x_true, y_true, x_false, y_false)`. A side may be empty.
/// - `Err(ModelError::InputValidationError)` - If `x` and `y` differ in length.
/// - `Err(ModelError::InvalidConfiguration)` - If `feature_index` is not a column of `x`.
pub fn partition<L: Label>(
    x: ArrayView2<f64>,
    y: ArrayView1<L>,
    feature_index: usize,
    threshold: f64,
) -> Result<Partition<L>, ModelError> {
    if x.nrows() != y.len() {
        return Err(ModelError::InputValidationError(format!(
            "Input data and label vector have different lengths, x rows: {}, y length: {}",
            x.nrows(),
            y.len()
        )));
    }
    if feature_index >= x.ncols() {
        return Err(ModelError::InvalidConfiguration(format!(
            "feature index {} is out of range for data with {} features",
            feature_index,
            x.ncols()
        )));
    }

    let (true_rows, false_rows): (Vec<usize>, Vec<usize>) =
        (0..x.nrows()).partition(|&i| x[[i, feature_index]] <= threshold);

    Ok((
        x.select(Axis(0), &true_rows),
        y.select(Axis(0), &true_rows),
        x.select(Axis(0), &false_rows),
        y.select(Axis(0), &false_rows),
    ))
}
