use eframe::egui::{
    self,
    containers,
};

use crate::account::Session;

pub enum TopBarAction {
    OpenAccount,
    ResetProgress,
}

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        session: &Session,
        learned_count: usize,
    ) -> Option<TopBarAction> {
        let mut action = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);

                ui.menu_button("File", |ui| {
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Progress", |ui| {
                    let reset =
                        ui.add_enabled(learned_count > 0, egui::Button::new("Reset progress..."));
                    if reset.clicked() {
                        action = Some(TopBarAction::ResetProgress);
                        ui.close();
                    }
                });

                ui.menu_button("Account", |ui| {
                    if ui.button("Account & Billing").clicked() {
                        action = Some(TopBarAction::OpenAccount);
                        ui.close();
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    Self::show_account_status(ui, session);
                });
            });
        });

        action
    }

    fn show_account_status(ui: &mut egui::Ui, session: &Session) {
        let (label, color) = if session.has_access() {
            ("Plus", egui::Color32::from_rgb(0, 200, 0))
        } else {
            ("Free", egui::Color32::from_rgb(200, 80, 80))
        };

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.small(egui::RichText::new("●").color(color)).on_hover_text(label);
            ui.small(label);

            if session.signed_in() {
                ui.add_space(6.0);
                ui.small(session.display_name());
            }
        });
    }
}
