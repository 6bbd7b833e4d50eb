use eframe::egui;

use crate::client::ManifestClient;
use crate::config::Config;
use crate::loader::PoemsLoader;
use crate::state::{PoemsState, StateEvent, UiState};
use crate::ui;

/// Main application state
pub struct PoemshelfApp {
    /// Application configuration
    pub config: Config,
    /// Status message for the status bar
    pub status_message: String,
    /// Poems loaded from the configured site
    pub poems: PoemsState,
    /// UI-related state
    pub ui: UiState,
}

impl PoemshelfApp {
    /// Create a new application instance and start loading poems
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config, client: ManifestClient) -> Self {
        let loader = PoemsLoader::activate(client, config.source.keep_stale_on_error);
        let theme = config.viewer.theme.theme();

        Self {
            config,
            status_message: "Loading poems...".to_string(),
            poems: PoemsState::new(loader),
            ui: UiState::new(theme),
        }
    }

    /// Start a new load of the manifest
    pub fn reload(&mut self) {
        let event = self.poems.reload();
        self.handle_events(vec![event]);
    }

    /// Open a poem in the system browser
    pub fn open_poem(&mut self, filename: &str) {
        let Some(url) = self.poems.poem_url(filename) else {
            self.status_message = format!("Cannot build a link for {}", filename);
            return;
        };

        match open::that(&url) {
            Ok(()) => self.status_message = format!("Opened {}", filename),
            Err(e) => {
                tracing::error!("Failed to open {}: {}", url, e);
                self.status_message = format!("Error: could not open {}", filename);
            }
        }
    }

    /// Persist the current configuration
    pub fn save_config(&mut self) {
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save config: {}", e);
            self.status_message = format!("Error: failed to save settings: {}", e);
        }
    }

    fn handle_events(&mut self, events: Vec<StateEvent>) {
        for event in events {
            match event {
                StateEvent::StatusMessage(msg) => self.status_message = msg,
                StateEvent::LogError(msg) => tracing::error!("{}", msg),
                StateEvent::LogInfo(msg) => tracing::info!("{}", msg),
            }
        }
    }
}

impl eframe::App for PoemshelfApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.ui.theme_dirty {
            self.ui.current_theme.apply(ctx);
            self.ui.theme_dirty = false;
        }

        let events = self.poems.poll(ctx);
        self.handle_events(events);

        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::new()
                    .fill(self.ui.current_theme.bg_darkest)
                    .inner_margin(egui::Margin::same(12)),
            )
            .show(ctx, |ui| ui::render_header(self, ui));

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let color = if self.status_message.starts_with("Error") {
                    self.ui.current_theme.error
                } else {
                    self.ui.current_theme.text_muted
                };
                ui.label(egui::RichText::new(&self.status_message).color(color).size(12.0));
            });
        });

        if self.ui.show_settings {
            egui::SidePanel::right("settings_panel")
                .resizable(false)
                .default_width(240.0)
                .show(ctx, |ui| ui::render_settings(self, ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| ui::render_library(self, ui));

        ui::render_about_dialog(self, ctx);
    }
}
