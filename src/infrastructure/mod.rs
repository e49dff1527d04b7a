pub mod inference;
pub mod media;
pub mod models;
pub mod speech;
pub mod storage;
