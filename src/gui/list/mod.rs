use eframe::egui::{
    self,
    RichText,
};

mod filter;
mod header;
mod row;
mod search;
mod state;

pub use filter::FilterMode;
pub use search::matches_search;
pub use state::ListState;

use super::app::BunpoApp;
use crate::{
    core::catalog,
    gui::ActionQueue,
};

pub fn grammar_list(ctx: &egui::Context, app: &mut BunpoApp) {
    let mut actions = ActionQueue::new();

    egui::CentralPanel::default().show(ctx, |ui| {
        let entries = catalog::entries();

        {
            let tracker = &app.tracker;
            app.list_state.ensure_indices(entries, |id| tracker.is_learned(id));
        }

        ui.heading(app.theme.heading(ui.ctx(), "Japanese Grammar Structures"));
        ui.label(
            RichText::new(
                "Ordered by frequency. Click a row to reveal the example. \
                 Check off what you've learned.",
            )
            .color(app.theme.comment(ui.ctx())),
        );
        ui.add_space(8.0);

        header::progress_row(ui, app);
        ui.add_space(8.0);
        header::controls_row(ui, app, &mut actions);

        if app.list_state.is_filtered() {
            ui.add_space(4.0);
            ui.label(
                RichText::new(format!(
                    "Showing {} of {} structures",
                    app.list_state.visible_indices().len(),
                    entries.len()
                ))
                .color(app.theme.comment(ui.ctx())),
            );
        }

        ui.add_space(8.0);

        egui::ScrollArea::vertical().show(ui, |ui| {
            let visible_indices = app.list_state.visible_indices().to_vec();

            if visible_indices.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(48.0);
                    ui.label(
                        RichText::new("No grammar structures match your search.")
                            .color(app.theme.comment(ui.ctx())),
                    );
                });
                return;
            }

            for index in visible_indices {
                let entry = &entries[index];
                row::entry_row(
                    ui,
                    entry,
                    app.tracker.is_learned(entry.id),
                    app.tracker.learned_at(entry.id),
                    app.list_state.is_expanded(entry.id),
                    &app.theme,
                    &mut actions,
                );
            }
        });
    });

    let had_actions = !actions.is_empty();
    app.execute_actions(ctx, &mut actions);

    if had_actions {
        ctx.request_repaint();
    }
}
