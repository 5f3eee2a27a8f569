pub mod column_ops;
pub mod deadline;
pub mod filter;
pub mod projection;
pub mod search;
pub mod stats;
pub mod task_ops;
