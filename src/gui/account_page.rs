use eframe::egui::{
    self,
    CornerRadius,
    Margin,
    RichText,
    Stroke,
    TextEdit,
    Ui,
};

use super::{
    theme::Theme,
    ActionQueue,
    UiAction,
};
use crate::account::{
    billing::{
        checkout_url,
        Plan,
        PRICING_PLANS,
    },
    Session,
};

/// The account/billing window: profile summary, plan cards or subscription
/// management, and a feedback form.
pub struct AccountPage {
    pub open: bool,
    pub feedback: String,
    pub sending_feedback: bool,
    pub opening_portal: bool,
}

impl Default for AccountPage {
    fn default() -> Self {
        Self {
            open: false,
            feedback: String::new(),
            sending_feedback: false,
            opening_portal: false,
        }
    }
}

impl AccountPage {
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        theme: &Theme,
        session: &Session,
        actions: &mut ActionQueue,
    ) {
        if !self.open {
            return;
        }

        let mut open = self.open;

        egui::Window::new("Account & Billing")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .default_width(420.0)
            .show(ctx, |ui| {
                self.ui_profile(ui, theme, session);
                ui.separator();

                if session.has_access() {
                    self.ui_subscription(ui, actions);
                } else {
                    ui_plans(ui, theme, session, actions);
                }

                ui.separator();
                self.ui_feedback(ui, theme, actions);
            });

        self.open = open;
    }

    fn ui_profile(&self, ui: &mut Ui, theme: &Theme, session: &Session) {
        ui.label(theme.heading(ui.ctx(), "Account"));

        match &session.user {
            Some(user) => {
                ui.label(format!(
                    "Signed in as {}",
                    user.email.as_deref().unwrap_or("unknown")
                ));
                if let Some(name) = session
                    .profile
                    .as_ref()
                    .and_then(|profile| profile.name.as_deref())
                {
                    ui.label(format!("Name: {}", name));
                }
            }
            None => {
                ui.label(
                    RichText::new(
                        "Not signed in. Sign in on the website to sync your subscription.",
                    )
                    .color(theme.comment(ui.ctx())),
                );
            }
        }
    }

    fn ui_subscription(&self, ui: &mut Ui, actions: &mut ActionQueue) {
        ui.label("You have an active subscription.");
        ui.add_space(4.0);

        let label = if self.opening_portal { "Opening..." } else { "Manage Subscription" };
        let button = ui.add_enabled(!self.opening_portal, egui::Button::new(label));
        if button.clicked() {
            actions.push(UiAction::OpenBillingPortal);
        }
    }

    fn ui_feedback(&mut self, ui: &mut Ui, theme: &Theme, actions: &mut ActionQueue) {
        ui.label(theme.heading(ui.ctx(), "Feedback"));
        ui.label(
            RichText::new("Questions or problems? Send us a note.")
                .color(theme.comment(ui.ctx())),
        );
        ui.add_space(4.0);

        ui.add(
            TextEdit::multiline(&mut self.feedback)
                .desired_rows(3)
                .desired_width(f32::INFINITY)
                .hint_text("Your message..."),
        );

        let can_send = !self.sending_feedback && !self.feedback.trim().is_empty();
        let label = if self.sending_feedback { "Sending..." } else { "Send Feedback" };
        if ui.add_enabled(can_send, egui::Button::new(label)).clicked() {
            actions.push(UiAction::SendFeedback(self.feedback.clone()));
        }
    }
}

fn ui_plans(ui: &mut Ui, theme: &Theme, session: &Session, actions: &mut ActionQueue) {
    ui.label("Choose a plan to unlock the full catalog.");
    ui.add_space(6.0);

    for plan in PRICING_PLANS {
        ui_plan_card(ui, theme, plan, session, actions);
        ui.add_space(6.0);
    }
}

fn ui_plan_card(
    ui: &mut Ui,
    theme: &Theme,
    plan: &Plan,
    session: &Session,
    actions: &mut ActionQueue,
) {
    let stroke = if plan.is_featured {
        Stroke::new(1.5, theme.cyan(ui.ctx()))
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke
    };

    egui::Frame::group(ui.style())
        .stroke(stroke)
        .corner_radius(CornerRadius::same(6))
        .inner_margin(Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui| {
                ui.label(RichText::new(plan.name).strong().size(16.0));
                if let Some(badge) = plan.badge {
                    ui.label(RichText::new(badge).small().color(theme.purple(ui.ctx())));
                }
            });

            ui.label(
                RichText::new(format!("{}{}", plan.display_price, plan.interval)).strong(),
            );
            ui.label(RichText::new(plan.description).color(theme.comment(ui.ctx())));
            ui.add_space(4.0);

            for feature in plan.features {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("✓").color(theme.green(ui.ctx())));
                    ui.label(*feature);
                });
            }

            ui.add_space(4.0);
            if ui.button("Get Started").clicked() {
                let url = checkout_url(plan, session.profile.as_ref()).to_string();
                actions.push(UiAction::OpenCheckout(url));
            }
        });
}
