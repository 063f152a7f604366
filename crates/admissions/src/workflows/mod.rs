pub mod documents;
pub mod prerequisites;
