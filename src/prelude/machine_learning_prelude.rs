pub use crate::machine_learning::decision_tree::{
    DecisionTreeClassifier, DecisionTreeParams, MaxFeatures, Node,
};
pub use crate::machine_learning::split_finder::{Split, find_split, partition};
