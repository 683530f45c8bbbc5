// Data models for the club scheduler

pub mod court;
pub mod event;
pub mod instructor;
pub mod settings;
