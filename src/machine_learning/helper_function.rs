use super::*;

/// Performs validation checks on a training set.
///
/// This function validates that:
/// - The input data matrix is not empty
/// - The label vector length matches the number of rows in the input data
/// - The input data does not contain NaN or infinite values
///
/// # Parameters
///
/// - `x` - A 2D array of feature values where rows represent samples and columns represent features
/// - `y` - A 1D array of class labels, one per sample
///
/// # Returns
///
/// - `Ok(())` - If all validation checks pass
/// - `Err(ModelError::EmptyDataset)` - If `x` has no rows
/// - `Err(ModelError::InputValidationError)` - If any other check fails, with an informative error message
pub fn preliminary_check<S1, S2, L>(
    x: &ArrayBase<S1, Ix2>,
    y: &ArrayBase<S2, Ix1>,
) -> Result<(), ModelError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = L>,
    L: Label,
{
    if x.nrows() == 0 {
        return Err(ModelError::EmptyDataset);
    }

    if y.len() != x.nrows() {
        return Err(ModelError::InputValidationError(format!(
            "Input data and label vector have different lengths, x rows: {}, y length: {}",
            x.nrows(),
            y.len()
        )));
    }

    for (i, row) in x.outer_iter().enumerate() {
        for (j, &val) in row.iter().enumerate() {
            if !val.is_finite() {
                return Err(ModelError::InputValidationError(format!(
                    "Input data contains NaN or infinite value at position [{}][{}]",
                    i, j
                )));
            }
        }
    }

    Ok(())
}

/// Validates a feature index set against the number of columns it will be used on.
///
/// The set must be non-empty, contain no duplicates, and only reference
/// existing columns.
///
/// # Parameters
///
/// - `feature_indices` - Column indices to validate
/// - `n_features` - Number of columns in the data
///
/// # Returns
///
/// - `Ok(())` - If the set is usable
/// - `Err(ModelError::InvalidConfiguration)` - Otherwise
pub fn validate_feature_indices(
    feature_indices: &[usize],
    n_features: usize,
) -> Result<(), ModelError> {
    if feature_indices.is_empty() {
        return Err(ModelError::InvalidConfiguration(
            "feature index set must not be empty".to_string(),
        ));
    }

    let mut seen = vec![false; n_features];
    for &index in feature_indices {
        if index >= n_features {
            return Err(ModelError::InvalidConfiguration(format!(
                "feature index {} is out of range for data with {} features",
                index, n_features
            )));
        }
        if seen[index] {
            return Err(ModelError::InvalidConfiguration(format!(
                "feature index {} appears more than once",
                index
            )));
        }
        seen[index] = true;
    }

    Ok(())
}
