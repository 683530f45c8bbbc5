use club_scheduler::ui_egui::SchedulerApp;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();
    log::info!("Starting Club Scheduler");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Club Scheduler"),
        ..Default::default()
    };

    eframe::run_native(
        "Club Scheduler",
        options,
        Box::new(|cc| Ok(Box::new(SchedulerApp::new(cc)?))),
    )
}
