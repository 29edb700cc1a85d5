pub mod jobs;
pub mod workers;
