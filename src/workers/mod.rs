pub mod chunker;
pub mod runner;
pub mod stages;
