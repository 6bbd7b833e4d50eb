//! UI-related application state

use crate::ui::theme::Theme;

/// UI-related state
pub struct UiState {
    /// Current theme
    pub current_theme: Theme,
    /// Whether theme needs to be applied
    pub theme_dirty: bool,
    /// Tag the poem list is filtered by
    pub selected_tag: Option<String>,
    /// Whether to show the settings panel
    pub show_settings: bool,
    /// Whether to show the About dialog
    pub show_about_dialog: bool,
}

impl UiState {
    /// Create a new UiState with the given theme
    pub fn new(theme: Theme) -> Self {
        Self {
            current_theme: theme,
            theme_dirty: true, // Apply theme on first frame
            selected_tag: None,
            show_settings: false,
            show_about_dialog: false,
        }
    }

    /// Select a tag, or clear the filter if it is already selected
    pub fn toggle_tag(&mut self, tag: &str) {
        if self.selected_tag.as_deref() == Some(tag) {
            self.selected_tag = None;
        } else {
            self.selected_tag = Some(tag.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_tag() {
        let mut ui = UiState::new(Theme::ink());

        ui.toggle_tag("sea");
        assert_eq!(ui.selected_tag.as_deref(), Some("sea"));

        ui.toggle_tag("sky");
        assert_eq!(ui.selected_tag.as_deref(), Some("sky"));

        ui.toggle_tag("sky");
        assert_eq!(ui.selected_tag, None);
    }
}
