use bunpo100::gui::BunpoApp;
use eframe::egui;

fn main() -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 900.0])
            .with_min_inner_size([520.0, 600.0])
            .with_title("bunpo100"),
        ..Default::default()
    };

    eframe::run_native("bunpo100", options, Box::new(|cc| Ok(Box::new(BunpoApp::new(cc)))))
}
