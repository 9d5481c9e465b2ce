use thiserror::Error;

/// Error types that can occur during model operations
///
/// # Variants
///
/// - `InvalidConfiguration` - Hyperparameters or a feature index set that cannot be used with the given data
/// - `EmptyDataset` - The training data contains no samples
/// - `NotFitted` - Indicates that the model has not been fitted yet
/// - `DimensionMismatch` - A sample's feature count differs from the training feature count
/// - `InputValidationError` - indicates the input data provided does not meet the expected format, type, or validation rules
/// - `TreeError` - indicates that there is something wrong with the tree
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Dataset is empty: at least one sample is required")]
    EmptyDataset,
    #[error(
        "Model has not been fitted. Certain methods require the model to be fitted before use."
    )]
    NotFitted,
    #[error("Feature dimension mismatch: expected {expected} features, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("Input validation error: {0}")]
    InputValidationError(String),
    #[error("Tree structure error: {0}")]
    TreeError(&'static str),
}
