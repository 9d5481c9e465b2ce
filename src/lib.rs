//! # rustytree
//!
//! A binary decision tree classifier in pure Rust.
//!
//! Trees are grown top-down by exhaustive information-gain split search over a
//! feature subset that is drawn once per tree, which makes every tree usable as
//! a member of a randomized ensemble. Feature matrices are `ndarray` arrays of
//! `f64`; class labels are any [`traits::Label`] type (all integer types).
//!
//! # Example
//! ```rust
//! use rustytree::machine_learning::{DecisionTreeClassifier, DecisionTreeParams};
//! use ndarray::array;
//!
//! let x = array![[1.0], [2.0], [3.0], [4.0]];
//! let y = array![0, 0, 1, 1];
//!
//! let mut tree = DecisionTreeClassifier::new(Some(DecisionTreeParams::default()));
//! tree.fit(x.view(), y.view()).unwrap();
//!
//! let predictions = tree.predict(array![[1.5], [3.5]].view()).unwrap();
//! assert_eq!(predictions, array![0, 1]);
//! ```

/// Error types returned by every fallible operation in this crate
pub mod error;

/// Trait bounds shared by the models
pub mod traits;

pub use error::ModelError;

/// A macro that generates a getter method for any field.
///
/// This macro creates a public getter method that returns the value of the
/// specified field. The generated method includes appropriate documentation
/// describing the field being accessed.
///
/// # Parameters
///
/// - `$method_name` - The name of the getter method (e.g., get_n_features)
/// - `$field_name` - The name of the field to access (e.g., n_features)
/// - `$return_type` - The return type of the getter method
#[cfg(feature = "machine_learning")]
macro_rules! get_field {
    ($method_name:ident, $field_name:ident, $return_type:ty) => {
        #[doc = concat!("Gets the `", stringify!($field_name), "` field.\n\n")]
        #[doc = "# Returns\n\n"]
        #[doc = concat!("* `", stringify!($return_type), "` - The value of the `", stringify!($field_name), "` field")]
        pub fn $method_name(&self) -> $return_type {
            self.$field_name
        }
    };
}

/// A macro that generates a public getter method returning a reference to a field.
///
/// This macro creates a method that provides immutable reference access to a private
/// `Option` field in a struct, following the Rust convention of getter methods.
///
/// # Parameters
///
/// - `$method_name` - The identifier for the generated getter method name
/// - `$field_name` - The identifier of the struct field to access
/// - `$return_type` - The type expression for the return value (typically `Option<&Type>`)
#[cfg(feature = "machine_learning")]
macro_rules! get_field_as_ref {
    ($method_name:ident, $field_name:ident, $return_type:ty) => {
        #[doc = concat!("Gets the `", stringify!($field_name), "` field.\n\n")]
        #[doc = "# Returns\n\n"]
        #[doc = concat!("* `", stringify!($return_type), "` - The value of the `", stringify!($field_name), "` field as a reference")]
        pub fn $method_name(&self) -> $return_type {
            self.$field_name.as_ref()
        }
    };
}

/// Module `math` contains the label statistics used to grow decision trees.
///
/// # Core Functions
///
/// - `entropy` - Calculates the entropy of a label set for information-based splitting
/// - `information_gain` - Measures information gained from splitting a label set in two
/// - `mode` - Most frequent label, smallest label on ties
///
/// # Example
/// ```rust
/// use rustytree::math::{entropy, information_gain, mode};
/// use ndarray::array;
///
/// let labels = array![0, 1, 1, 0];
/// let ent = entropy(&labels);
/// let gain = information_gain(&labels, &array![0, 0], &array![1, 1]);
/// let majority = mode(&labels);
/// ```
#[cfg(feature = "math")]
pub mod math;

/// Module `machine_learning` provides the decision tree classifier and its split search.
///
/// # Components
///
/// - **DecisionTreeClassifier**: binary tree grown by information gain, with
///   per-tree feature subsampling, depth/size/purity stopping rules and parallel prediction
/// - **find_split**: exhaustive midpoint threshold search over a feature subset
/// - **partition**: the `value <= threshold` split of a dataset into two owned subsets
///
/// # Examples
/// ```rust
/// use rustytree::machine_learning::*;
/// use ndarray::array;
///
/// let x = array![[1.0, 5.0], [2.0, 5.0], [3.0, 5.0], [4.0, 5.0]];
/// let y = array![0, 0, 1, 1];
///
/// let split = find_split(x.view(), y.view(), &[0, 1]).unwrap();
/// assert_eq!(split.feature_index, 0);
/// assert_eq!(split.threshold, 2.5);
/// ```
#[cfg(feature = "machine_learning")]
pub mod machine_learning;

/// A convenience module that re-exports the most commonly used types and functions from this crate.
///
/// # Examples
/// ```rust
/// use rustytree::prelude::*;
///
/// let tree: DecisionTreeClassifier<i32> = DecisionTreeClassifier::default();
/// ```
pub mod prelude;
