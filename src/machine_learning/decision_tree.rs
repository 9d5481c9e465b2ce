use super::*;
use tracing::{debug, trace};

/// Default minimum number of samples required to enable parallel prediction
const DEFAULT_PARALLEL_THRESHOLD_SAMPLES: usize = 100;

/// Default minimum number of samples at a node required to build its two subtrees in parallel
const DEFAULT_PARALLEL_THRESHOLD_BUILD: usize = 256;

/// Number of features each tree is allowed to split on.
///
/// The rule is applied once per tree, to the number of columns in the training data;
/// the result is truncated to an integer and must lie in `[1, n_features]`.
///
/// # Variants
///
/// - `All` - Use every feature (the identity rule).
/// - `Sqrt` - Square root of the feature count, at least 1.
/// - `Log2` - Base-2 logarithm of the feature count, at least 1.
/// - `Custom` - Any function of the feature count.
#[derive(Clone, Default)]
pub enum MaxFeatures {
    #[default]
    All,
    Sqrt,
    Log2,
    Custom(Arc<dyn Fn(usize) -> f64 + Send + Sync>),
}

impl MaxFeatures {
    /// Wraps a closure as a `Custom` rule.
    ///
    /// # Parameters
    ///
    /// * `rule` - Maps the feature count to the number of features to draw.
    ///
    /// # Returns
    ///
    /// * `MaxFeatures` - The `Custom` variant holding `rule`.
    pub fn custom<F>(rule: F) -> Self
    where
        F: Fn(usize) -> f64 + Send + Sync + 'static,
    {
        MaxFeatures::Custom(Arc::new(rule))
    }

    /// Evaluates the rule for a given feature count.
    ///
    /// # Parameters
    ///
    /// * `n_features` - Number of columns in the training data.
    ///
    /// # Returns
    ///
    /// - `Ok(usize)` - Number of features to draw.
    /// - `Err(ModelError::InvalidConfiguration)` - If the truncated result is NaN or outside `[1, n_features]`.
    pub fn resolve(&self, n_features: usize) -> Result<usize, ModelError> {
        let n = n_features as f64;
        let raw = match self {
            MaxFeatures::All => n,
            MaxFeatures::Sqrt => n.sqrt().max(1.0),
            MaxFeatures::Log2 => n.log2().max(1.0),
            MaxFeatures::Custom(rule) => rule(n_features),
        };

        let truncated = raw.trunc();
        if truncated.is_nan() || truncated < 1.0 || truncated > n {
            return Err(ModelError::InvalidConfiguration(format!(
                "max_features resolved to {} for {} features, expected a value in [1, {}]",
                raw, n_features, n_features
            )));
        }

        Ok(truncated as usize)
    }
}

impl fmt::Debug for MaxFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxFeatures::All => write!(f, "All"),
            MaxFeatures::Sqrt => write!(f, "Sqrt"),
            MaxFeatures::Log2 => write!(f, "Log2"),
            MaxFeatures::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Hyperparameters for controlling decision tree growth.
///
/// # Fields
///
/// - `max_features` - How many features the tree may split on, drawn once per tree.
/// - `max_depth` - Maximum number of edges between the root and any leaf. Must be at least 1.
/// - `min_samples_split` - Minimum number of samples required to split a node. Must be at least 2.
/// - `random_state` - Seed for the feature subset draw. If `None`, the draw is seeded from the OS.
#[derive(Debug, Clone)]
pub struct DecisionTreeParams {
    pub max_features: MaxFeatures,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub random_state: Option<u64>,
}

/// Default hyperparameters for decision tree.
///
/// Uses all features (`max_features = MaxFeatures::All`), at most 10 levels (`max_depth = 10`),
/// minimum 2 samples to split (`min_samples_split = 2`) and no seed (`random_state = None`).
impl Default for DecisionTreeParams {
    fn default() -> Self {
        Self {
            max_features: MaxFeatures::All,
            max_depth: 10,
            min_samples_split: 2,
            random_state: None,
        }
    }
}

/// A vertex of a trained decision tree.
///
/// # Variants
///
/// - `Decision` - Routes a sample to `branch_true` when `sample[feature_index] <= threshold`,
///   to `branch_false` otherwise. Both children are owned by this node.
/// - `Leaf` - Predicts `label`, the mode of the training labels that reached it.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<L> {
    Decision {
        feature_index: usize,
        threshold: f64,
        branch_true: Box<Node<L>>,
        branch_false: Box<Node<L>>,
    },
    Leaf {
        label: L,
    },
}

impl<L: Label> Node<L> {
    /// Creates a new leaf node.
    ///
    /// # Parameters
    ///
    /// * `label` - The class predicted by this leaf.
    ///
    /// # Returns
    ///
    /// * `Node<L>` - A new `Node` configured as a leaf.
    pub fn new_leaf(label: L) -> Self {
        Node::Leaf { label }
    }

    /// Creates a new decision node from two fully built subtrees.
    ///
    /// # Parameters
    ///
    /// - `feature_index` - Index of the feature used for splitting.
    /// - `threshold` - Threshold value (samples with feature value ≤ threshold go to `branch_true`).
    /// - `branch_true` - Subtree for samples satisfying the rule.
    /// - `branch_false` - Subtree for all other samples.
    ///
    /// # Returns
    ///
    /// * `Node<L>` - A new `Node` configured as a decision node.
    pub fn new_decision(
        feature_index: usize,
        threshold: f64,
        branch_true: Node<L>,
        branch_false: Node<L>,
    ) -> Self {
        Node::Decision {
            feature_index,
            threshold,
            branch_true: Box::new(branch_true),
            branch_false: Box::new(branch_false),
        }
    }

    /// Returns `true` if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Number of edges on the longest path from this node to a leaf.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Decision {
                branch_true,
                branch_false,
                ..
            } => 1 + branch_true.depth().max(branch_false.depth()),
        }
    }

    /// Number of leaves in the subtree rooted here.
    pub fn n_leaves(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Decision {
                branch_true,
                branch_false,
                ..
            } => branch_true.n_leaves() + branch_false.n_leaves(),
        }
    }

    /// Number of nodes, decision and leaf, in the subtree rooted here.
    pub fn n_nodes(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Decision {
                branch_true,
                branch_false,
                ..
            } => 1 + branch_true.n_nodes() + branch_false.n_nodes(),
        }
    }

    /// Walks from this node to a leaf and returns the leaf's label.
    ///
    /// The sample length is not checked here; callers validate it against the
    /// training width first.
    ///
    /// # Parameters
    ///
    /// * `sample` - Feature values of one sample.
    ///
    /// # Returns
    ///
    /// * `L` - The label of the leaf the sample reaches.
    pub(crate) fn predict_sample<S>(&self, sample: &ArrayBase<S, Ix1>) -> L
    where
        S: Data<Elem = f64>,
    {
        let mut node = self;
        loop {
            match node {
                Node::Leaf { label } => return *label,
                Node::Decision {
                    feature_index,
                    threshold,
                    branch_true,
                    branch_false,
                } => {
                    node = if sample[*feature_index] <= *threshold {
                        branch_true
                    } else {
                        branch_false
                    };
                }
            }
        }
    }
}

/// Decision tree classifier grown by information gain.
///
/// At `fit` time a subset of the features is drawn uniformly at random without
/// replacement, sized by `max_features`. That subset is fixed for the whole tree:
/// every node searches the same features, which lets several trees fitted on
/// different subsets form an ensemble. Nodes split on the `(feature, threshold)`
/// pair with the highest information gain and stop when the maximum depth is
/// reached, too few samples remain, the labels are pure, or the chosen rule
/// sends every sample to one side. When no candidate has positive gain the
/// default rule `x[first feature] <= 0.0` is still tried.
///
/// # Fields
///
/// - `params` - Hyperparameters controlling tree growth.
/// - `root` - The root node of the trained tree, or `None` if not yet fitted.
/// - `n_features` - Number of features in the training data.
/// - `feature_indices` - The feature subset the tree was grown on, in tie-break order.
///
/// # Example
/// ```rust
/// use rustytree::machine_learning::{DecisionTreeClassifier, DecisionTreeParams, MaxFeatures};
/// use ndarray::array;
///
/// let x_train = array![
///     [5.1, 3.5, 1.4, 0.2],
///     [4.9, 3.0, 1.4, 0.2],
///     [6.2, 2.9, 4.3, 1.3],
///     [5.7, 2.8, 4.1, 1.3],
///     [6.3, 3.3, 6.0, 2.5],
///     [7.1, 3.0, 5.9, 2.1],
/// ];
/// let y_train = array![0, 0, 1, 1, 2, 2];
///
/// let params = DecisionTreeParams {
///     max_features: MaxFeatures::All,
///     max_depth: 5,
///     min_samples_split: 2,
///     random_state: Some(42),
/// };
///
/// let mut tree = DecisionTreeClassifier::new(Some(params));
/// tree.fit(x_train.view(), y_train.view()).unwrap();
///
/// let predictions = tree.predict(x_train.view()).unwrap();
/// assert_eq!(predictions, y_train);
/// ```
#[derive(Debug, Clone)]
pub struct DecisionTreeClassifier<L> {
    params: DecisionTreeParams,
    root: Option<Node<L>>,
    n_features: usize,
    feature_indices: Option<Vec<usize>>,
}

impl<L: Label> Default for DecisionTreeClassifier<L> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<L: Label> DecisionTreeClassifier<L> {
    /// Creates a new untrained classifier.
    ///
    /// Hyperparameters are checked when `fit` is called.
    ///
    /// # Parameters
    ///
    /// * `params` - Optional hyperparameters. If `None`, default parameters are used.
    ///
    /// # Returns
    ///
    /// * `DecisionTreeClassifier<L>` - A new untrained instance.
    pub fn new(params: Option<DecisionTreeParams>) -> Self {
        Self {
            params: params.unwrap_or_default(),
            root: None,
            n_features: 0,
            feature_indices: None,
        }
    }

    // Getters
    get_field!(get_n_features, n_features, usize);
    get_field_as_ref!(get_root, root, Option<&Node<L>>);

    /// Gets the hyperparameters.
    ///
    /// # Returns
    ///
    /// * `&DecisionTreeParams` - The hyperparameters this classifier was created with
    pub fn get_parameters(&self) -> &DecisionTreeParams {
        &self.params
    }

    /// Gets the feature subset the tree was grown on.
    ///
    /// # Returns
    ///
    /// * `Option<&[usize]>` - The feature indices in tie-break order, or `None` if not yet fitted
    pub fn get_feature_indices(&self) -> Option<&[usize]> {
        self.feature_indices.as_deref()
    }

    /// Trains the classifier on the provided data.
    ///
    /// Draws the feature subset, then grows the tree from depth 0. On error the
    /// classifier keeps whatever state it had before the call.
    ///
    /// # Parameters
    ///
    /// - `x` - Training features with shape (n_samples, n_features).
    /// - `y` - Training labels with shape (n_samples,).
    ///
    /// # Returns
    ///
    /// - `Ok(&mut Self)` - A mutable reference to `self` for method chaining.
    /// - `Err(ModelError::EmptyDataset)` - If `x` has no rows.
    /// - `Err(ModelError::InputValidationError)` - If `x` and `y` differ in length or `x` holds NaN or infinite values.
    /// - `Err(ModelError::InvalidConfiguration)` - If `max_depth`, `min_samples_split` or `max_features` is out of range.
    pub fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<L>) -> Result<&mut Self, ModelError> {
        preliminary_check(&x, &y)?;
        self.validate_parameters()?;

        let n_features = x.ncols();
        let n_sub_features = self.params.max_features.resolve(n_features)?;

        let mut rng = if let Some(seed) = self.params.random_state {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_rng(&mut rng())
        };
        let feature_indices =
            rand::seq::index::sample(&mut rng, n_features, n_sub_features).into_vec();

        self.grow(x, y, feature_indices)
    }

    /// Trains the classifier on a caller-chosen feature subset.
    ///
    /// Same as `fit`, except no features are drawn: every node searches
    /// `feature_indices`, in the given order. `max_features` and `random_state`
    /// are ignored.
    ///
    /// # Parameters
    ///
    /// - `x` - Training features with shape (n_samples, n_features).
    /// - `y` - Training labels with shape (n_samples,).
    /// - `feature_indices` - Distinct column indices of `x`.
    ///
    /// # Returns
    ///
    /// - `Ok(&mut Self)` - A mutable reference to `self` for method chaining.
    /// - `Err(ModelError)` - As for `fit`; additionally `InvalidConfiguration` if
    ///   `feature_indices` is empty, repeats an index, or is out of range.
    pub fn fit_with_features(
        &mut self,
        x: ArrayView2<f64>,
        y: ArrayView1<L>,
        feature_indices: Vec<usize>,
    ) -> Result<&mut Self, ModelError> {
        preliminary_check(&x, &y)?;
        self.validate_parameters()?;
        validate_feature_indices(&feature_indices, x.ncols())?;

        self.grow(x, y, feature_indices)
    }

    fn validate_parameters(&self) -> Result<(), ModelError> {
        if self.params.max_depth == 0 {
            return Err(ModelError::InvalidConfiguration(
                "max_depth must be at least 1".to_string(),
            ));
        }

        if self.params.min_samples_split < 2 {
            return Err(ModelError::InvalidConfiguration(format!(
                "min_samples_split must be at least 2, got {}",
                self.params.min_samples_split
            )));
        }

        Ok(())
    }

    /// Builds the tree on validated data and stores it.
    fn grow(
        &mut self,
        x: ArrayView2<f64>,
        y: ArrayView1<L>,
        feature_indices: Vec<usize>,
    ) -> Result<&mut Self, ModelError> {
        debug!(
            n_samples = x.nrows(),
            n_features = x.ncols(),
            ?feature_indices,
            "fitting decision tree"
        );

        let root = self.build_tree(x, y, &feature_indices, 0)?;

        debug!(
            depth = root.depth(),
            n_leaves = root.n_leaves(),
            "decision tree fitted"
        );

        self.n_features = x.ncols();
        self.feature_indices = Some(feature_indices);
        self.root = Some(root);

        Ok(self)
    }

    /// Recursively builds a subtree; children are complete before their parent is created.
    fn build_tree(
        &self,
        x: ArrayView2<f64>,
        y: ArrayView1<L>,
        feature_indices: &[usize],
        depth: usize,
    ) -> Result<Node<L>, ModelError> {
        if depth >= self.params.max_depth
            || y.len() < self.params.min_samples_split
            || entropy(&y) == 0.0
        {
            return self.create_leaf(y, depth);
        }

        let split = find_split(x, y, feature_indices)?;
        let (x_true, y_true, x_false, y_false) =
            partition(x, y, split.feature_index, split.threshold)?;

        // Degenerate rule: everything went to one side
        if y_true.is_empty() || y_false.is_empty() {
            return self.create_leaf(y, depth);
        }

        let build_true =
            || self.build_tree(x_true.view(), y_true.view(), feature_indices, depth + 1);
        let build_false =
            || self.build_tree(x_false.view(), y_false.view(), feature_indices, depth + 1);

        let (branch_true, branch_false) = if y.len() >= DEFAULT_PARALLEL_THRESHOLD_BUILD {
            rayon::join(build_true, build_false)
        } else {
            (build_true(), build_false())
        };

        Ok(Node::new_decision(
            split.feature_index,
            split.threshold,
            branch_true?,
            branch_false?,
        ))
    }

    fn create_leaf(&self, y: ArrayView1<L>, depth: usize) -> Result<Node<L>, ModelError> {
        let label = mode(&y).ok_or(ModelError::TreeError(
            "Cannot create a leaf from an empty label set",
        ))?;
        trace!(depth, n_samples = y.len(), ?label, "leaf");
        Ok(Node::new_leaf(label))
    }

    /// Predicts the class of a single sample.
    ///
    /// # Parameters
    ///
    /// * `x` - Feature vector for a single sample of length `n_features`.
    ///
    /// # Returns
    ///
    /// - `Ok(L)` - The predicted class label.
    /// - `Err(ModelError::NotFitted)` - If called before `fit`.
    /// - `Err(ModelError::DimensionMismatch)` - If `x` does not have `n_features` values.
    pub fn predict_one(&self, x: ArrayView1<f64>) -> Result<L, ModelError> {
        let root = self.root.as_ref().ok_or(ModelError::NotFitted)?;

        if x.len() != self.n_features {
            return Err(ModelError::DimensionMismatch {
                expected: self.n_features,
                found: x.len(),
            });
        }

        Ok(root.predict_sample(&x))
    }

    /// Predicts the class of every sample, in parallel for large inputs.
    ///
    /// # Parameters
    ///
    /// * `x` - Feature matrix with shape (n_samples, n_features).
    ///
    /// # Returns
    ///
    /// - `Ok(Array1<L>)` - One predicted label per row of `x`.
    /// - `Err(ModelError::NotFitted)` - If called before `fit`.
    /// - `Err(ModelError::DimensionMismatch)` - If `x` does not have `n_features` columns.
    pub fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<L>, ModelError> {
        let root = self.root.as_ref().ok_or(ModelError::NotFitted)?;

        if x.ncols() != self.n_features {
            return Err(ModelError::DimensionMismatch {
                expected: self.n_features,
                found: x.ncols(),
            });
        }

        let predictions: Vec<L> = if x.nrows() >= DEFAULT_PARALLEL_THRESHOLD_SAMPLES {
            x.axis_iter(Axis(0))
                .into_par_iter()
                .map(|row| root.predict_sample(&row))
                .collect()
        } else {
            x.axis_iter(Axis(0))
                .map(|row| root.predict_sample(&row))
                .collect()
        };

        Ok(Array1::from_vec(predictions))
    }

    /// Trains the tree on training data and immediately makes predictions on test data.
    ///
    /// # Parameters
    ///
    /// - `x_train` - Training features with shape (n_train_samples, n_features).
    /// - `y_train` - Training labels with shape (n_train_samples,).
    /// - `x_test` - Test features with shape (n_test_samples, n_features).
    ///
    /// # Returns
    ///
    /// * `Result<Array1<L>, ModelError>` - Predictions for the test data, or the first error from `fit` or `predict`.
    pub fn fit_predict(
        &mut self,
        x_train: ArrayView2<f64>,
        y_train: ArrayView1<L>,
        x_test: ArrayView2<f64>,
    ) -> Result<Array1<L>, ModelError> {
        self.fit(x_train, y_train)?;
        self.predict(x_test)
    }

    /// Generates a human-readable string representation of the decision tree structure.
    ///
    /// Decision nodes show their rule; the true branch is listed first.
    ///
    /// # Returns
    ///
    /// * `Result<String, ModelError>` - A formatted string containing the tree structure, or `ModelError::NotFitted` if the model hasn't been trained yet.
    pub fn generate_tree_structure(&self) -> Result<String, ModelError> {
        let root = self.root.as_ref().ok_or(ModelError::NotFitted)?;

        let mut output = String::new();
        output.push_str("Decision Tree Structure:\n");
        Self::print_node(root, &mut output, "", true);
        Ok(output)
    }

    // Recursively print tree structure
    fn print_node(node: &Node<L>, output: &mut String, prefix: &str, is_last: bool) {
        let connector = if is_last { "└── " } else { "├── " };
        output.push_str(prefix);
        output.push_str(connector);

        match node {
            Node::Leaf { label } => {
                output.push_str(&format!("Leaf: class={:?}\n", label));
            }
            Node::Decision {
                feature_index,
                threshold,
                branch_true,
                branch_false,
            } => {
                output.push_str(&format!(
                    "Split: feature[{}] <= {:.4}\n",
                    feature_index, threshold
                ));

                let new_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
                Self::print_node(branch_true, output, &new_prefix, false);
                Self::print_node(branch_false, output, &new_prefix, true);
            }
        }
    }
}
