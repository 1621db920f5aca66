pub mod common_nd;
pub mod ksg;

// Re-exports so users can import the estimator from
// ksg_mi::estimators::approaches::* ergonomically.
pub use common_nd::dataset::{DistanceMatrix, SampleSet};
pub use ksg::KsgMutualInformation;
