// egui-based UI layer

pub mod app;
pub mod views;

pub use app::SchedulerApp;
