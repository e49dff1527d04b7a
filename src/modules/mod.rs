pub mod evaluation;
pub mod jobs;
