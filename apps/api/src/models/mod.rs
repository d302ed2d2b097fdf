pub mod insights;
pub mod profile;
