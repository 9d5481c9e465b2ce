use crate::ModelError;
use crate::math::{entropy, information_gain, mode};
use crate::traits::Label;
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Axis, Data, Ix1, Ix2};
use rand::rngs::StdRng;
use rand::{SeedableRng, rng};
use rayon::prelude::*;
use std::fmt;
use std::sync::Arc;

/// Decision tree classifier grown by information gain with per-tree feature subsampling
pub mod decision_tree;
/// This module provides helper functions for machine learning models
mod helper_function;
/// Exhaustive best-split search over a fixed feature subset
pub mod split_finder;

pub use decision_tree::*;
use helper_function::{preliminary_check, validate_feature_indices};
pub use split_finder::*;
