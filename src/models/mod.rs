pub mod applicant;
pub mod profile;
pub mod project;
pub mod volunteer;
