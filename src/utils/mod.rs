pub mod paths;
pub mod sanitize;
