pub mod analyze;
pub mod batch;
pub mod utility;
