pub mod catalog;
pub mod reconcile;
