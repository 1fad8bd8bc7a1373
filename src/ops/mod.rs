pub mod ids;
pub mod list_ops;
