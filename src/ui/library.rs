//! Poem library rendering: tag strip and poem list

use eframe::egui::{self, RichText};

use crate::app::PoemshelfApp;
use crate::ui::components::tag_chip;
use crate::ui::theme::Theme;
use crate::views;

/// Render the central library panel
pub fn render_library(app: &mut PoemshelfApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();
    let view = &app.poems.view;

    // Error replaces content, so the two are never shown together
    if let Some(error) = view.error.clone() {
        render_error(app, ui, &theme, &error);
        return;
    }

    if view.loading && view.poems.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.spinner();
            ui.label(RichText::new("Loading poems...").color(theme.text_muted));
        });
        return;
    }

    if view.poems.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label(RichText::new("No poems published yet").color(theme.text_muted));
        });
        return;
    }

    render_tag_strip(app, ui, &theme);
    ui.add_space(8.0);
    ui.separator();
    ui.add_space(4.0);
    render_poem_list(app, ui, &theme);
}

fn render_error(app: &mut PoemshelfApp, ui: &mut egui::Ui, theme: &Theme, error: &str) {
    ui.add_space(24.0);
    egui::Frame::new()
        .fill(theme.bg_medium)
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::same(16))
        .stroke(egui::Stroke::new(1.0, theme.error))
        .show(ui, |ui| {
            ui.label(
                RichText::new("Could not load poems")
                    .color(theme.error)
                    .size(15.0)
                    .strong(),
            );
            ui.add_space(6.0);
            ui.label(RichText::new(error).color(theme.text_secondary));
            ui.add_space(10.0);

            let loading = app.poems.view.loading;
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!loading, egui::Button::new("Try again"))
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

fn render_tag_strip(app: &mut PoemshelfApp, ui: &mut egui::Ui, theme: &Theme) {
    ui.label(RichText::new("Popular tags").color(theme.text_muted).size(11.0));
    ui.add_space(4.0);

    let mut clicked: Option<String> = None;
    let shown: &PoemshelfApp = app;
    ui.horizontal_wrapped(|ui| {
        for summary in &shown.poems.view.tags {
            let selected = shown.ui.selected_tag.as_deref() == Some(summary.tag.as_str());
            if tag_chip(ui, shown, &summary.tag, summary.count, selected) {
                clicked = Some(summary.tag.clone());
            }
        }
    });

    if let Some(tag) = clicked {
        app.ui.toggle_tag(&tag);
    }
}

fn render_poem_list(app: &mut PoemshelfApp, ui: &mut egui::Ui, theme: &Theme) {
    let selected_tag = app.ui.selected_tag.clone();
    let mut open_requested: Option<String> = None;

    {
        let visible = app.poems.visible_poems(selected_tag.as_deref());

        let heading = match &selected_tag {
            Some(tag) => format!("{} poems tagged \"{}\"", visible.len(), tag),
            None => format!("{} poems", visible.len()),
        };
        ui.label(RichText::new(heading).color(theme.text_muted).size(11.0));
        ui.add_space(4.0);

        egui::ScrollArea::vertical()
            .id_salt("poem_list")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for poem in &visible {
                    ui.horizontal(|ui| {
                        let title = RichText::new(views::display_title(&poem.filename))
                            .color(theme.text_primary)
                            .size(15.0);
                        let response = ui
                            .add(egui::Label::new(title).sense(egui::Sense::click()))
                            .on_hover_text(poem.filename.as_str());
                        if response.clicked() {
                            open_requested = Some(poem.filename.clone());
                        }

                        if !poem.tags.is_empty() {
                            ui.label(
                                RichText::new(poem.tags.join(", "))
                                    .color(theme.text_muted)
                                    .size(11.0),
                            );
                        }
                    });
                    ui.add_space(2.0);
                }
            });
    }

    if let Some(filename) = open_requested {
        app.open_poem(&filename);
    }
}
