use eframe::egui::{
    self,
    Align2,
    CornerRadius,
    CursorIcon,
    FontId,
    Label,
    Margin,
    RichText,
    Sense,
    Stroke,
    Ui,
};

use crate::{
    core::GrammarEntry,
    gui::{
        theme::{
            blend_colors,
            Theme,
        },
        ActionQueue,
        UiAction,
    },
};

pub(super) fn entry_row(
    ui: &mut Ui,
    entry: &GrammarEntry,
    learned: bool,
    learned_at: Option<i64>,
    expanded: bool,
    theme: &Theme,
    actions: &mut ActionQueue,
) {
    let base_fill = ui.visuals().faint_bg_color;
    let fill = if learned {
        blend_colors(base_fill, theme.green(ui.ctx()), 0.18)
    } else {
        base_fill
    };

    egui::Frame::group(ui.style())
        .fill(fill)
        .corner_radius(CornerRadius::same(6))
        .inner_margin(Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui| {
                // The toggle is its own widget; clicking it must never
                // expand or collapse the row.
                ui_toggle(ui, entry.id, learned, learned_at, theme, actions);
                ui.add_space(6.0);

                ui.label(
                    RichText::new(format!("{:>3}", entry.id))
                        .color(theme.comment(ui.ctx()))
                        .monospace(),
                );
                ui.add_space(6.0);

                ui.vertical(|ui| {
                    let mut clicked = false;

                    ui.horizontal_wrapped(|ui| {
                        let response = ui.add(
                            Label::new(RichText::new(&entry.structure).strong().size(16.0))
                                .sense(Sense::click()),
                        );
                        if response.hovered() {
                            ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
                        }
                        clicked |= response.clicked();

                        if let Some(notes) = &entry.notes {
                            notes_badge(ui, notes, theme);
                        }
                    });

                    let response = ui.add(
                        Label::new(
                            RichText::new(&entry.structure_translation)
                                .color(theme.comment(ui.ctx())),
                        )
                        .sense(Sense::click()),
                    );
                    clicked |= response.clicked();

                    if clicked {
                        actions.push(UiAction::ToggleExpanded(entry.id));
                    }

                    if expanded {
                        ui.add_space(6.0);
                        egui::Frame::new()
                            .fill(ui.visuals().extreme_bg_color)
                            .corner_radius(CornerRadius::same(4))
                            .inner_margin(Margin::symmetric(8, 6))
                            .show(ui, |ui| {
                                ui.label(RichText::new(&entry.example).size(15.0));
                                ui.label(
                                    RichText::new(&entry.example_translation)
                                        .color(theme.comment(ui.ctx()))
                                        .italics(),
                                );
                            });
                    }
                });
            });
        });

    ui.add_space(4.0);
}

fn ui_toggle(
    ui: &mut Ui,
    id: u32,
    learned: bool,
    learned_at: Option<i64>,
    theme: &Theme,
    actions: &mut ActionQueue,
) {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(22.0, 22.0), Sense::click());
    let center = rect.center();
    let radius = 9.0;

    let painter = ui.painter();
    if learned {
        painter.circle_filled(center, radius, theme.green(ui.ctx()));
        painter.text(
            center,
            Align2::CENTER_CENTER,
            "✓",
            FontId::proportional(12.0),
            ui.visuals().extreme_bg_color,
        );
    } else {
        let color = if response.hovered() {
            theme.green(ui.ctx())
        } else {
            theme.comment(ui.ctx())
        };
        painter.circle_stroke(center, radius, Stroke::new(1.5, color));
    }

    let hover_text = match (learned, learned_at.and_then(format_learned_date)) {
        (true, Some(date)) => format!("Learned on {}", date),
        (true, None) => "Mark as unlearned".to_string(),
        (false, _) => "Mark as learned".to_string(),
    };
    let response = response.on_hover_text(hover_text);

    if response.clicked() {
        actions.push(UiAction::ToggleLearned(id));
    }
}

fn notes_badge(ui: &mut Ui, notes: &str, theme: &Theme) {
    egui::Frame::new()
        .fill(ui.visuals().extreme_bg_color)
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(RichText::new(notes).small().color(theme.purple(ui.ctx())));
        });
}

fn format_learned_date(millis: i64) -> Option<String> {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|learned| learned.format("%b %e, %Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn learned_date_formats_from_epoch_millis() {
        // 2026-01-15T09:30:00Z
        let formatted = format_learned_date(1_768_469_400_000).unwrap();
        assert_eq!(formatted, "Jan 15, 2026");
    }

    #[test]
    fn out_of_range_timestamp_has_no_date() {
        assert_eq!(format_learned_date(i64::MAX), None);
    }
}
