pub mod body;
pub mod response;
pub mod submission;
