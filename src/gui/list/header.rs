use eframe::egui::{
    self,
    TextEdit,
    Ui,
};

use super::filter::FilterMode;
use crate::{
    core::catalog,
    gui::{
        app::BunpoApp,
        ActionQueue,
        UiAction,
    },
};

pub fn progress_row(ui: &mut Ui, app: &BunpoApp) {
    let total = catalog::total();
    let count = app.tracker.learned_count();
    let fraction = if total == 0 { 0.0 } else { count as f32 / total as f32 };
    let percent = (fraction * 100.0).round() as u32;

    ui.add(
        egui::ProgressBar::new(fraction)
            .text(format!("{}/{}", count, total))
            .fill(app.theme.green(ui.ctx())),
    )
    .on_hover_text(format!("{}% learned", percent));
}

pub fn controls_row(ui: &mut Ui, app: &BunpoApp, actions: &mut ActionQueue) {
    let search_width = 280.0;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let mut search = app.list_state.search().to_string();
        let response = ui.add_sized(
            [search_width, ui.spacing().interact_size.y],
            TextEdit::singleline(&mut search).hint_text("Search grammar or English..."),
        );
        if response.changed() {
            actions.push(UiAction::SetSearch(search));
        }

        ui.separator();

        for mode in FilterMode::MODES {
            let selected = app.list_state.filter_mode() == mode;
            if ui.selectable_label(selected, mode.label()).clicked() && !selected {
                actions.push(UiAction::SetFilter(mode));
            }
        }
    });
}
