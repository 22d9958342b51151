pub mod defaults;
pub mod paths;
pub mod queries;
