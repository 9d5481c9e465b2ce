/// Prelude module for machine learning functionality.
#[cfg(feature = "machine_learning")]
pub mod machine_learning_prelude;
/// Prelude module for mathematical operations.
#[cfg(feature = "math")]
pub mod math_prelude;

pub use crate::error::ModelError;
pub use crate::traits::Label;
#[cfg(feature = "machine_learning")]
pub use machine_learning_prelude::*;
#[cfg(feature = "math")]
pub use math_prelude::*;
