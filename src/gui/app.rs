use std::sync::mpsc::{
    channel,
    Receiver,
};

use eframe::egui::{
    self,
    RichText,
};

use super::{
    account_page::AccountPage,
    list::{
        grammar_list,
        ListState,
    },
    message_overlay::MessageOverlay,
    settings::SettingsData,
    theme::{
        set_theme,
        Theme,
    },
    top_bar::{
        TopBar,
        TopBarAction,
    },
    ActionQueue,
    UiAction,
};
use crate::{
    account::{
        billing,
        Session,
    },
    core::BunpoError,
    email::{
        EmailClient,
        EmailMessage,
    },
    progress::{
        FileStore,
        ProgressTracker,
    },
};

const SUPPORT_EMAIL: &str = "support@bunpo100.app";

pub struct BunpoApp {
    pub tracker: ProgressTracker,
    pub list_state: ListState,
    pub settings_data: SettingsData,
    pub theme: Theme,
    pub message_overlay: MessageOverlay,
    pub session: Session,
    pub account_page: AccountPage,

    email: EmailClient,
    confirm_reset: bool,
    pending_portal: Option<Receiver<Result<String, BunpoError>>>,
    pending_feedback: Option<Receiver<Result<String, BunpoError>>>,
}

impl BunpoApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings_data = SettingsData::load();

        let app = Self {
            tracker: ProgressTracker::new(Box::new(FileStore::new())),
            list_state: ListState::default(),
            settings_data,
            theme: Theme::tokyo(),
            message_overlay: MessageOverlay::new(),
            session: Session::load(),
            account_page: AccountPage::default(),
            email: EmailClient::from_env(),
            confirm_reset: false,
            pending_portal: None,
            pending_feedback: None,
        };

        Self::setup_fonts(&cc.egui_ctx);
        set_theme(&cc.egui_ctx, app.theme.clone());
        cc.egui_ctx.set_zoom_factor(cc.egui_ctx.zoom_factor() + 0.2);

        cc.egui_ctx.options_mut(|options| {
            options.theme_preference = if app.settings_data.dark_mode {
                egui::ThemePreference::Dark
            } else {
                egui::ThemePreference::Light
            };
        });

        app
    }

    /// Installs a system font that covers kana and kanji; the egui defaults
    /// don't. Checked in order, first hit wins.
    fn setup_fonts(ctx: &egui::Context) {
        const FONT_CANDIDATES: &[&str] = &[
            "assets/fonts/NotoSansJP-Regular.ttf",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/truetype/fonts-japanese-gothic.ttf",
            "/System/Library/Fonts/Hiragino Sans GB.ttc",
            "C:\\Windows\\Fonts\\meiryo.ttc",
            "C:\\Windows\\Fonts\\YuGothM.ttc",
        ];

        for path in FONT_CANDIDATES {
            let Ok(bytes) = std::fs::read(path) else {
                continue;
            };

            let mut fonts = egui::FontDefinitions::default();
            fonts.font_data.insert(
                "jp_sans".to_owned(),
                std::sync::Arc::new(egui::FontData::from_owned(bytes)),
            );
            fonts
                .families
                .entry(egui::FontFamily::Proportional)
                .or_default()
                .insert(0, "jp_sans".to_owned());
            fonts
                .families
                .entry(egui::FontFamily::Monospace)
                .or_default()
                .push("jp_sans".to_owned());

            ctx.set_fonts(fonts);
            return;
        }

        eprintln!("No Japanese font found on this system. Kana and kanji may render as boxes.");
    }

    pub(crate) fn execute_actions(&mut self, ctx: &egui::Context, actions: &mut ActionQueue) {
        for action in actions.drain() {
            match action {
                UiAction::ToggleLearned(id) => {
                    self.tracker.toggle_learned(id);
                    self.list_state.mark_dirty();
                }
                UiAction::ToggleExpanded(id) => self.list_state.toggle_expanded(id),
                UiAction::SetSearch(search) => self.list_state.set_search(search),
                UiAction::SetFilter(mode) => self.list_state.set_filter_mode(mode),
                UiAction::OpenCheckout(url) => {
                    ctx.open_url(egui::OpenUrl::new_tab(url));
                }
                UiAction::OpenBillingPortal => self.open_billing_portal(),
                UiAction::SendFeedback(text) => self.send_feedback(text),
            }
        }
    }

    fn open_billing_portal(&mut self) {
        let customer_id = self
            .session
            .profile
            .as_ref()
            .and_then(|profile| profile.customer_id.clone());

        let Some(customer_id) = customer_id else {
            self.message_overlay.show_error("No billing profile on file.");
            return;
        };

        let (sender, receiver) = channel();
        self.pending_portal = Some(receiver);
        self.account_page.opening_portal = true;

        std::thread::spawn(move || {
            let _ = sender.send(billing::create_portal_url(&customer_id));
        });
    }

    fn send_feedback(&mut self, text: String) {
        let body = text.trim().to_string();
        if body.is_empty() {
            return;
        }

        let message = EmailMessage {
            to: SUPPORT_EMAIL.to_string(),
            subject: "bunpo100 feedback".to_string(),
            text: Some(body),
            html: None,
            reply_to: self.session.user.as_ref().and_then(|user| user.email.clone()),
        };

        let (sender, receiver) = channel();
        self.pending_feedback = Some(receiver);
        self.account_page.sending_feedback = true;

        let client = self.email.clone();
        std::thread::spawn(move || {
            let _ = sender.send(client.send(&message));
        });
    }

    fn poll_background(&mut self, ctx: &egui::Context) {
        if let Some(receiver) = &self.pending_portal {
            if let Ok(result) = receiver.try_recv() {
                self.pending_portal = None;
                self.account_page.opening_portal = false;

                match result {
                    Ok(url) => ctx.open_url(egui::OpenUrl::new_tab(url)),
                    Err(e) => {
                        eprintln!("Billing portal request failed: {}", e);
                        self.message_overlay.show_error("Couldn't open the billing portal.");
                    }
                }
            }
        }

        if let Some(receiver) = &self.pending_feedback {
            if let Ok(result) = receiver.try_recv() {
                self.pending_feedback = None;
                self.account_page.sending_feedback = false;

                match result {
                    Ok(_) => {
                        self.account_page.feedback.clear();
                        self.message_overlay.show_info("Feedback sent. Thank you!");
                    }
                    Err(e) => {
                        eprintln!("Feedback send failed: {}", e);
                        self.message_overlay.show_error("Failed to send feedback.");
                    }
                }
            }
        }
    }

    fn loading_placeholder(&self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(160.0);
                ui.add(egui::Spinner::new().size(28.0));
                ui.add_space(8.0);
                ui.label(
                    RichText::new("Loading your progress...").color(self.theme.comment(ctx)),
                );
            });
        });
    }

    fn confirm_reset_window(&mut self, ctx: &egui::Context) {
        if !self.confirm_reset {
            return;
        }

        let mut close = false;

        egui::Window::new("Reset progress")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("This removes every learned checkmark on this device. There is no undo.");
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        close = true;
                    }
                    let reset = ui.button(RichText::new("Reset").color(self.theme.red(ctx)));
                    if reset.clicked() {
                        self.tracker.reset();
                        self.list_state.mark_dirty();
                        self.message_overlay.show_info("Progress reset.");
                        close = true;
                    }
                });
            });

        if close {
            self.confirm_reset = false;
        }
    }
}

impl eframe::App for BunpoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_background(ctx);

        // The theme switch lives in the top bar; persist whatever it set.
        let dark_mode = ctx.style().visuals.dark_mode;
        if dark_mode != self.settings_data.dark_mode {
            self.settings_data.dark_mode = dark_mode;
            self.settings_data.save();
        }

        if let Some(action) = TopBar::show(ctx, &self.session, self.tracker.learned_count()) {
            match action {
                TopBarAction::OpenAccount => self.account_page.open = true,
                TopBarAction::ResetProgress => self.confirm_reset = true,
            }
        }

        if !self.tracker.is_loaded() {
            // One placeholder frame before the store is read: the list must
            // never flash zero progress.
            self.loading_placeholder(ctx);
            self.tracker.load();
            ctx.request_repaint();
            return;
        }

        grammar_list(ctx, self);

        let mut actions = ActionQueue::new();
        {
            let Self { account_page, theme, session, .. } = self;
            account_page.show(ctx, theme, session, &mut actions);
        }
        self.execute_actions(ctx, &mut actions);

        self.confirm_reset_window(ctx);
        self.message_overlay.show(ctx, &self.theme);
    }
}
