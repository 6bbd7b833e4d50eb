//! Settings panel UI rendering

use eframe::egui::{self, RichText};

use crate::app::PoemshelfApp;
use crate::ui::theme::ThemePreset;

/// Render the settings side panel
pub fn render_settings(app: &mut PoemshelfApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();

    ui.add_space(8.0);
    ui.label(
        RichText::new("Settings")
            .color(theme.text_primary)
            .size(18.0)
            .strong(),
    );
    ui.add_space(12.0);

    ui.label(RichText::new("Appearance").color(theme.accent).size(13.0).strong());
    ui.add_space(6.0);

    ui.horizontal(|ui| {
        ui.label(RichText::new("Theme:").color(theme.text_muted));

        let current_name = app.config.viewer.theme.name();
        egui::ComboBox::from_id_salt("theme_select")
            .selected_text(current_name)
            .show_ui(ui, |ui| {
                for preset in ThemePreset::all() {
                    if ui
                        .selectable_label(app.config.viewer.theme == *preset, preset.name())
                        .clicked()
                    {
                        app.config.viewer.theme = *preset;
                        app.ui.current_theme = preset.theme();
                        app.ui.theme_dirty = true;
                        app.save_config();
                    }
                }
            });
    });

    ui.add_space(6.0);
    if ui
        .checkbox(&mut app.config.viewer.show_tag_counts, "Show tag counts")
        .changed()
    {
        app.save_config();
    }

    ui.add_space(16.0);
    ui.label(RichText::new("Source").color(theme.accent).size(13.0).strong());
    ui.add_space(6.0);

    ui.label(RichText::new("Site").color(theme.text_muted).size(11.0));
    ui.label(RichText::new(app.config.source.base_url.as_str()).color(theme.text_secondary));
    ui.add_space(4.0);

    if ui
        .checkbox(
            &mut app.config.source.keep_stale_on_error,
            "Keep last poems if a reload fails",
        )
        .on_hover_text("Takes effect on next start")
        .changed()
    {
        app.save_config();
    }

    ui.add_space(8.0);
    ui.label(
        RichText::new("Change the site with `poemshelf config set source.base_url <url>`")
            .color(theme.text_muted)
            .size(11.0),
    );
}
