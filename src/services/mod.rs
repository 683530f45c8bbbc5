// Service layer

pub mod schedule;
pub mod settings;
