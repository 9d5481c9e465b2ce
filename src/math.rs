use crate::traits::Label;
use ahash::AHashMap;
use ndarray::{ArrayBase, Data, Ix1};

/// Counts the occurrences of every distinct label.
fn label_counts<S, L>(y: &ArrayBase<S, Ix1>) -> AHashMap<L, usize>
where
    S: Data<Elem = L>,
    L: Label,
{
    // A capacity of 10 is reasonable for most classification problems
    let mut class_counts = AHashMap::with_capacity(10);
    y.fold((), |_, &label| {
        *class_counts.entry(label).or_insert(0) += 1;
    });
    class_counts
}

/// Calculates the entropy of a label set.
///
/// Entropy quantifies the impurity or randomness in a dataset and is used
/// by decision tree algorithms to evaluate split quality.
///
/// # Parameters
///
/// - `y` - Class labels stored in a 1D array
///
/// # Returns
///
/// - `f64` - Entropy value of the dataset (0.0 for homogeneous or empty data)
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use rustytree::math::entropy;
///
/// let labels = array![0, 1, 1, 0];
/// let ent = entropy(&labels);
/// // For two classes with equal frequency, entropy = 1.0
/// assert!((ent - 1.0).abs() < 1e-10);
/// ```
pub fn entropy<S, L>(y: &ArrayBase<S, Ix1>) -> f64
where
    S: Data<Elem = L>,
    L: Label,
{
    let total_samples = y.len() as f64;
    if total_samples == 0.0 {
        return 0.0;
    }

    let mut entropy = 0.0;
    for &count in label_counts(y).values() {
        let p = count as f64 / total_samples;
        entropy -= p * p.log2();
    }

    entropy
}

/// Calculates the information gain when splitting a dataset.
///
/// Information gain measures the reduction in entropy achieved by dividing a
/// dataset into child nodes, guiding feature selection in decision trees.
///
/// # Parameters
///
/// - `y` - Class labels in the parent node
/// - `left_y` - Class labels in the left child node
/// - `right_y` - Class labels in the right child node
///
/// # Returns
///
/// - `f64` - Information gain for the proposed split. 0.0 when the parent is empty,
///   already pure, or the child sizes do not add up to the parent size
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use rustytree::math::information_gain;
///
/// let parent = array![0, 0, 1, 1];
/// let left = array![0, 0];
/// let right = array![1, 1];
/// let gain = information_gain(&parent, &left, &right);
/// // A perfect split of a balanced binary set removes all entropy
/// assert!((gain - 1.0).abs() < 1e-10);
/// ```
pub fn information_gain<S1, S2, S3, L>(
    y: &ArrayBase<S1, Ix1>,
    left_y: &ArrayBase<S2, Ix1>,
    right_y: &ArrayBase<S3, Ix1>,
) -> f64
where
    S1: Data<Elem = L>,
    S2: Data<Elem = L>,
    S3: Data<Elem = L>,
    L: Label,
{
    let n = y.len();
    if n == 0 || left_y.len() + right_y.len() != n {
        return 0.0;
    }

    let e = entropy(y);

    // If parent node is already pure, no information gain is possible
    if e == 0.0 {
        return 0.0;
    }

    let n = n as f64;
    let n_left = left_y.len() as f64;
    let n_right = right_y.len() as f64;

    let weighted_child_entropy = (n_left / n) * entropy(left_y) + (n_right / n) * entropy(right_y);

    // Rounding can push a useless split a hair below zero
    (e - weighted_child_entropy).max(0.0)
}

/// Returns the most frequent label.
///
/// Ties are broken by picking the smallest label, so the result does not
/// depend on hash map iteration order.
///
/// # Parameters
///
/// - `y` - Class labels stored in a 1D array
///
/// # Returns
///
/// - `Option<L>` - The mode of the labels, or `None` if `y` is empty
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use rustytree::math::mode;
///
/// assert_eq!(mode(&array![2, 1, 2, 1, 3]), Some(1));
/// assert_eq!(mode(&array![4, 4, 1]), Some(4));
/// ```
pub fn mode<S, L>(y: &ArrayBase<S, Ix1>) -> Option<L>
where
    S: Data<Elem = L>,
    L: Label,
{
    label_counts(y)
        .into_iter()
        .max_by(|(label_a, count_a), (label_b, count_b)| {
            count_a.cmp(count_b).then_with(|| label_b.cmp(label_a))
        })
        .map(|(label, _)| label)
}
