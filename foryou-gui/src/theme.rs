use eframe::egui::{self, Color32, Rounding, Stroke};
use foryou_core::{ThemeConfig, UiConfig};

fn rgb(c: [u8; 3]) -> Color32 {
    Color32::from_rgb(c[0], c[1], c[2])
}

pub fn accent(theme: &ThemeConfig) -> Color32 {
    rgb(theme.accent_color)
}

pub fn secondary_text(theme: &ThemeConfig) -> Color32 {
    rgb(theme.secondary_text_color)
}

pub fn apply(ctx: &egui::Context, theme: &ThemeConfig, ui_config: &UiConfig) {
    let mut style = (*ctx.style()).clone();

    let bg_color = rgb(theme.background_color);
    let surface_color = rgb(theme.surface_color);
    let text_color = rgb(theme.text_color);
    let accent_color = rgb(theme.accent_color);
    let border_color = Color32::from_rgb(73, 69, 79);

    style.visuals.dark_mode = true;
    style.visuals.panel_fill = bg_color;
    style.visuals.window_fill = bg_color;
    style.visuals.extreme_bg_color = Color32::from_rgb(20, 18, 24);
    style.visuals.faint_bg_color = surface_color;
    style.visuals.override_text_color = Some(text_color);

    style.visuals.widgets.noninteractive.bg_fill = surface_color;
    style.visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, border_color);
    style.visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, text_color);

    style.visuals.widgets.inactive.bg_fill = surface_color;
    style.visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, border_color);
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, text_color);

    style.visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, accent_color);
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, text_color);

    style.visuals.widgets.active.bg_fill = accent_color;
    style.visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent_color);
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::BLACK);

    style.visuals.selection.bg_fill = accent_color.gamma_multiply(0.35);
    style.visuals.selection.stroke = Stroke::new(1.0, accent_color);

    for widget in [
        &mut style.visuals.widgets.noninteractive,
        &mut style.visuals.widgets.inactive,
        &mut style.visuals.widgets.hovered,
        &mut style.visuals.widgets.active,
    ] {
        widget.rounding = Rounding::same(8.0);
    }

    for font in style.text_styles.values_mut() {
        if font.size < ui_config.font_size {
            font.size = ui_config.font_size;
        }
    }

    style.spacing.item_spacing = egui::vec2(12.0, 8.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    style.spacing.interact_size = egui::vec2(36.0, 28.0);

    ctx.set_style(style);
}
