pub mod learning_path;
pub mod search;
