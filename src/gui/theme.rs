use eframe::egui::{
    self,
    Color32,
    RichText,
    Visuals,
};

#[derive(Clone)]
pub struct Theme {
    dark: ThemeDetails,
    light: ThemeDetails,
}

impl Default for Theme {
    fn default() -> Self {
        Self::tokyo()
    }
}

impl Theme {
    pub fn tokyo() -> Self {
        Theme {
            dark: ThemeDetails::tokyo_night_storm(),
            light: ThemeDetails::tokyo_night_light(),
        }
    }

    fn details(&self, ctx: &egui::Context) -> &ThemeDetails {
        if ctx.style().visuals.dark_mode {
            &self.dark
        } else {
            &self.light
        }
    }

    pub fn heading(&self, ctx: &egui::Context, content: &str) -> RichText {
        RichText::new(content).color(self.details(ctx).cyan).strong()
    }

    pub fn red(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).red
    }

    pub fn orange(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).orange
    }

    pub fn green(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).green
    }

    pub fn purple(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).purple
    }

    pub fn cyan(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).cyan
    }

    pub fn comment(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).comment
    }
}

#[derive(Clone)]
struct ThemeDetails {
    background: Color32,
    background_dark: Color32,
    background_light: Color32,
    foreground: Color32,
    selection: Color32,
    comment: Color32,
    red: Color32,
    orange: Color32,
    green: Color32,
    purple: Color32,
    cyan: Color32,
}

impl ThemeDetails {
    fn tokyo_night_storm() -> Self {
        Self {
            background: Color32::from_rgb(0x24, 0x28, 0x3b),
            background_dark: Color32::from_rgb(0x1f, 0x23, 0x35),
            background_light: Color32::from_rgb(0x2a, 0x2f, 0x45),
            foreground: Color32::from_rgb(0xc0, 0xca, 0xf5),
            selection: Color32::from_rgb(0x36, 0x4a, 0x82),
            comment: Color32::from_rgb(0x56, 0x5f, 0x89),
            red: Color32::from_rgb(0xf7, 0x76, 0x8e),
            orange: Color32::from_rgb(0xff, 0x9e, 0x64),
            green: Color32::from_rgb(0x9e, 0xce, 0x6a),
            purple: Color32::from_rgb(0xbb, 0x9a, 0xf7),
            cyan: Color32::from_rgb(0x7d, 0xcf, 0xff),
        }
    }

    fn tokyo_night_light() -> Self {
        Self {
            background: Color32::from_rgb(0xd5, 0xd6, 0xdb),
            background_dark: Color32::from_rgb(0xc8, 0xc9, 0xd1),
            background_light: Color32::from_rgb(0xdf, 0xe0, 0xe5),
            foreground: Color32::from_rgb(0x34, 0x3b, 0x58),
            selection: Color32::from_rgb(0x9f, 0xa8, 0xcd),
            comment: Color32::from_rgb(0x96, 0x99, 0xa3),
            red: Color32::from_rgb(0x8c, 0x43, 0x51),
            orange: Color32::from_rgb(0x96, 0x50, 0x27),
            green: Color32::from_rgb(0x48, 0x5e, 0x30),
            purple: Color32::from_rgb(0x5a, 0x4a, 0x78),
            cyan: Color32::from_rgb(0x16, 0x67, 0x75),
        }
    }
}

pub fn blend_colors(base: Color32, tint: Color32, amount: f32) -> Color32 {
    let t = amount.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Color32::from_rgb(
        lerp(base.r(), tint.r()),
        lerp(base.g(), tint.g()),
        lerp(base.b(), tint.b()),
    )
}

fn apply(details: &ThemeDetails, mut visuals: Visuals) -> Visuals {
    visuals.panel_fill = details.background;
    visuals.window_fill = details.background;
    visuals.extreme_bg_color = details.background_dark;
    visuals.faint_bg_color = details.background_light;
    visuals.selection.bg_fill = details.selection;
    visuals.hyperlink_color = details.cyan;
    visuals.warn_fg_color = details.orange;
    visuals.error_fg_color = details.red;
    visuals.widgets.noninteractive.fg_stroke.color = details.foreground;
    visuals.widgets.inactive.fg_stroke.color = details.foreground;
    visuals.widgets.hovered.fg_stroke.color = details.foreground;
    visuals.widgets.active.fg_stroke.color = details.foreground;
    visuals.widgets.open.fg_stroke.color = details.foreground;
    visuals
}

pub fn set_theme(ctx: &egui::Context, theme: Theme) {
    ctx.set_visuals_of(egui::Theme::Dark, apply(&theme.dark, Visuals::dark()));
    ctx.set_visuals_of(egui::Theme::Light, apply(&theme.light, Visuals::light()));
}
