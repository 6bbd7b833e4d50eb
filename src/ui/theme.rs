use eframe::egui::{self, Color32, Stroke, Visuals};
use serde::{Deserialize, Serialize};

/// Available theme presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    #[default]
    Ink,
    Sepia,
    Night,
}

impl ThemePreset {
    /// Get all available presets
    pub fn all() -> &'static [ThemePreset] {
        &[ThemePreset::Ink, ThemePreset::Sepia, ThemePreset::Night]
    }

    /// Get display name for the preset
    pub fn name(&self) -> &'static str {
        match self {
            ThemePreset::Ink => "Ink",
            ThemePreset::Sepia => "Sepia",
            ThemePreset::Night => "Night",
        }
    }

    /// Parse a preset from its config name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Get the theme colors for this preset
    pub fn theme(&self) -> Theme {
        match self {
            ThemePreset::Ink => Theme::ink(),
            ThemePreset::Sepia => Theme::sepia(),
            ThemePreset::Night => Theme::night(),
        }
    }
}

/// Theme color definitions
#[derive(Debug, Clone)]
pub struct Theme {
    /// Start from egui's dark visuals rather than light
    pub dark: bool,

    // Base colors
    pub bg_darkest: Color32,
    pub bg_dark: Color32,
    pub bg_medium: Color32,
    pub bg_light: Color32,

    // Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    // Accent colors
    pub accent: Color32,
    pub accent_hover: Color32,
    pub accent_muted: Color32,

    pub error: Color32,

    // UI element colors
    pub border: Color32,
    pub selection: Color32,
}

impl Theme {
    /// Ink theme - charcoal page, warm red accent
    pub fn ink() -> Self {
        Self {
            dark: true,

            bg_darkest: Color32::from_rgb(14, 14, 16),
            bg_dark: Color32::from_rgb(22, 22, 25),
            bg_medium: Color32::from_rgb(32, 32, 36),
            bg_light: Color32::from_rgb(46, 46, 52),

            text_primary: Color32::from_rgb(236, 234, 228),
            text_secondary: Color32::from_rgb(196, 192, 184),
            text_muted: Color32::from_rgb(132, 128, 122),

            accent: Color32::from_rgb(220, 88, 72),
            accent_hover: Color32::from_rgb(236, 120, 104),
            accent_muted: Color32::from_rgb(160, 62, 52),

            error: Color32::from_rgb(239, 68, 68),

            border: Color32::from_rgb(60, 60, 66),
            selection: Color32::from_rgb(220, 88, 72).gamma_multiply(0.3),
        }
    }

    /// Sepia theme - old paper, brown ink
    pub fn sepia() -> Self {
        Self {
            dark: false,

            bg_darkest: Color32::from_rgb(250, 244, 230),
            bg_dark: Color32::from_rgb(244, 236, 216),
            bg_medium: Color32::from_rgb(234, 222, 196),
            bg_light: Color32::from_rgb(222, 206, 174),

            text_primary: Color32::from_rgb(58, 42, 28),
            text_secondary: Color32::from_rgb(92, 72, 52),
            text_muted: Color32::from_rgb(138, 118, 96),

            accent: Color32::from_rgb(138, 76, 28),
            accent_hover: Color32::from_rgb(166, 98, 44),
            accent_muted: Color32::from_rgb(196, 150, 104),

            error: Color32::from_rgb(176, 40, 32),

            border: Color32::from_rgb(200, 182, 150),
            selection: Color32::from_rgb(138, 76, 28).gamma_multiply(0.25),
        }
    }

    /// Night theme - deep blue, moonlight accent
    pub fn night() -> Self {
        Self {
            dark: true,

            bg_darkest: Color32::from_rgb(10, 14, 26),
            bg_dark: Color32::from_rgb(15, 20, 36),
            bg_medium: Color32::from_rgb(24, 31, 52),
            bg_light: Color32::from_rgb(36, 45, 72),

            text_primary: Color32::from_rgb(226, 232, 244),
            text_secondary: Color32::from_rgb(184, 194, 214),
            text_muted: Color32::from_rgb(120, 132, 158),

            accent: Color32::from_rgb(186, 200, 255),
            accent_hover: Color32::from_rgb(212, 222, 255),
            accent_muted: Color32::from_rgb(104, 118, 176),

            error: Color32::from_rgb(251, 113, 133),

            border: Color32::from_rgb(48, 58, 88),
            selection: Color32::from_rgb(186, 200, 255).gamma_multiply(0.25),
        }
    }

    /// Apply this theme to egui's visuals
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = if self.dark {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        // Window and panel backgrounds
        visuals.window_fill = self.bg_dark;
        visuals.panel_fill = self.bg_dark;
        visuals.faint_bg_color = self.bg_medium;
        visuals.extreme_bg_color = self.bg_darkest;

        visuals.widgets.noninteractive.bg_fill = self.bg_medium;
        visuals.widgets.noninteractive.weak_bg_fill = self.bg_light;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border);
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_secondary);

        visuals.widgets.inactive.bg_fill = self.bg_medium;
        visuals.widgets.inactive.weak_bg_fill = self.bg_light;
        visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, self.border);
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.widgets.hovered.bg_fill = self.bg_light;
        visuals.widgets.hovered.weak_bg_fill = self.bg_light;
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, self.accent);
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.widgets.active.bg_fill = self.accent_muted;
        visuals.widgets.active.weak_bg_fill = self.accent_muted;
        visuals.widgets.active.bg_stroke = Stroke::new(1.0, self.accent_hover);
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.selection.bg_fill = self.selection;
        visuals.selection.stroke = Stroke::new(1.0, self.accent);

        visuals.hyperlink_color = self.accent;
        visuals.error_fg_color = self.error;

        visuals.window_stroke = Stroke::new(1.0, self.border);
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        ctx.set_visuals(visuals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_from_name() {
        assert_eq!(ThemePreset::from_name("sepia"), Some(ThemePreset::Sepia));
        assert_eq!(ThemePreset::from_name(" Night "), Some(ThemePreset::Night));
        assert_eq!(ThemePreset::from_name("amber"), None);
    }

    #[test]
    fn test_every_preset_has_a_theme() {
        for preset in ThemePreset::all() {
            let theme = preset.theme();
            assert_ne!(theme.text_primary, theme.bg_dark, "{}", preset.name());
        }
    }
}
