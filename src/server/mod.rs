pub mod predict;
pub mod worker;
