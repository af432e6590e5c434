use std::time::{
    Duration,
    Instant,
};

use eframe::egui;

use super::theme::Theme;

const TOAST_SECONDS: f32 = 4.0;

/// Blocking loading overlay plus transient toast messages. The loading
/// overlay dims the whole window; toasts sit in the bottom-right corner and
/// dismiss themselves.
pub struct MessageOverlay {
    pub active: bool,
    pub message: Option<String>,
    toast: Option<Toast>,
}

struct Toast {
    text: String,
    error: bool,
    shown_at: Instant,
}

impl MessageOverlay {
    pub fn new() -> Self {
        Self { active: false, message: None, toast: None }
    }

    pub fn set_message(&mut self, message: String) {
        self.message = Some(message);
        self.active = true;
    }

    pub fn clear_message(&mut self) {
        self.message = None;
        self.active = false;
    }

    pub fn show_info(&mut self, text: impl Into<String>) {
        self.toast = Some(Toast { text: text.into(), error: false, shown_at: Instant::now() });
    }

    pub fn show_error(&mut self, text: impl Into<String>) {
        self.toast = Some(Toast { text: text.into(), error: true, shown_at: Instant::now() });
    }

    pub fn show(&mut self, ctx: &egui::Context, theme: &Theme) {
        if self.active {
            egui::Area::new(egui::Id::new("message_overlay"))
                .order(egui::Order::Foreground)
                .fixed_pos(egui::Pos2::new(0.0, 0.0))
                .show(ctx, |ui| {
                    let screen_size = ui.ctx().screen_rect().size();
                    ui.allocate_space(screen_size);
                    ui.painter().rect_filled(
                        ui.ctx().screen_rect(),
                        0.0,
                        egui::Color32::from_black_alpha(120),
                    );
                });

            let message = self.message.clone().unwrap_or_else(|| "Loading...".to_string());

            egui::Window::new("message_box")
                .order(egui::Order::Foreground)
                .collapsible(false)
                .resizable(false)
                .title_bar(false)
                .fixed_size(egui::Vec2::new(220.0, 80.0))
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::new(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.add(egui::Spinner::new());
                        ui.label(message);
                    });
                });
        }

        let expired = self
            .toast
            .as_ref()
            .map_or(false, |toast| toast.shown_at.elapsed().as_secs_f32() > TOAST_SECONDS);
        if expired {
            self.toast = None;
        }

        if let Some(toast) = &self.toast {
            let color = if toast.error { theme.red(ctx) } else { theme.green(ctx) };

            egui::Window::new("toast")
                .order(egui::Order::Foreground)
                .collapsible(false)
                .resizable(false)
                .title_bar(false)
                .anchor(egui::Align2::RIGHT_BOTTOM, egui::Vec2::new(-16.0, -16.0))
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new("●").color(color));
                        ui.label(&toast.text);
                    });
                });

            // Keep repainting so the toast disappears without user input.
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}

impl Default for MessageOverlay {
    fn default() -> Self {
        Self::new()
    }
}
