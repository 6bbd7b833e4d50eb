//! Shared UI components for the Poemshelf viewer

use eframe::egui::{self, RichText};

use crate::app::PoemshelfApp;
use crate::views;

/// Render the header: title, last-updated line and actions
pub fn render_header(app: &mut PoemshelfApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(
                RichText::new("Poems")
                    .size(22.0)
                    .strong()
                    .color(theme.text_primary),
            );

            if let Some(raw) = app.poems.view.last_updated.as_deref() {
                ui.label(
                    RichText::new(format!("Last updated {}", views::format_last_updated(raw)))
                        .size(11.0)
                        .color(theme.text_muted),
                );
            }
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("About").clicked() {
                app.ui.show_about_dialog = true;
            }

            let settings_label = if app.ui.show_settings { "Close settings" } else { "Settings" };
            if ui.button(settings_label).clicked() {
                app.ui.show_settings = !app.ui.show_settings;
            }

            let loading = app.poems.view.loading;
            if ui
                .add_enabled(!loading, egui::Button::new("Reload"))
                .clicked()
            {
                app.reload();
            }

            if loading {
                ui.spinner();
            }
        });
    });
}

/// Render a tag as a clickable chip. Returns true when clicked.
pub fn tag_chip(
    ui: &mut egui::Ui,
    app: &PoemshelfApp,
    tag: &str,
    count: usize,
    selected: bool,
) -> bool {
    let theme = &app.ui.current_theme;

    let label = if app.config.viewer.show_tag_counts {
        format!("{} ({})", tag, count)
    } else {
        tag.to_string()
    };

    let (fill, text_color) = if selected {
        (theme.accent_muted, theme.text_primary)
    } else {
        (theme.bg_medium, theme.text_secondary)
    };

    let button = egui::Button::new(RichText::new(label).color(text_color).size(12.0))
        .fill(fill)
        .corner_radius(egui::CornerRadius::same(10));

    ui.add(button).clicked()
}

/// Render the About dialog
pub fn render_about_dialog(app: &mut PoemshelfApp, ctx: &egui::Context) {
    if !app.ui.show_about_dialog {
        return;
    }

    let theme = app.ui.current_theme.clone();
    let site = app.config.source.base_url.clone();

    egui::Window::new("About Poemshelf")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 200.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);

                ui.label(
                    RichText::new("Poemshelf")
                        .size(24.0)
                        .strong()
                        .color(theme.accent),
                );

                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme.text_muted),
                );

                ui.add_space(12.0);
                ui.label(RichText::new("Reading from").color(theme.text_secondary));
                if ui.link(site.as_str()).clicked() {
                    if let Err(e) = open::that(&site) {
                        tracing::warn!("Failed to open {}: {}", site, e);
                    }
                }

                ui.add_space(12.0);
                ui.label(
                    RichText::new("Built with Rust + egui")
                        .size(11.0)
                        .color(theme.text_muted),
                );

                ui.add_space(12.0);
                if ui.button("Close").clicked() {
                    app.ui.show_about_dialog = false;
                }

                ui.add_space(8.0);
            });
        });
}
