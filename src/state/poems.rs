//! Poems-related application state

use eframe::egui;
use tokio::sync::watch;

use crate::loader::{LoadState, PoemsLoader};
use crate::manifest::PoemMeta;
use crate::state::StateEvent;
use crate::views::{self, DerivedViews, PoemsView};

/// Poems-related state
pub struct PoemsState {
    /// Loader owning the manifest state
    loader: PoemsLoader,
    /// Receiver for loader state changes
    rx: watch::Receiver<LoadState>,
    /// Memoized sorted poems and tag summary
    derived: DerivedViews,
    /// What the UI renders
    pub view: PoemsView,
}

impl PoemsState {
    /// Wrap an already activated loader
    pub fn new(loader: PoemsLoader) -> Self {
        let mut rx = loader.subscribe();
        let state = rx.borrow_and_update().clone();
        let mut derived = DerivedViews::default();
        derived.refresh(state.data.as_ref());
        let view = PoemsView::from_parts(&state, &derived);

        Self {
            loader,
            rx,
            derived,
            view,
        }
    }

    /// Start a new load cycle
    pub fn reload(&mut self) -> StateEvent {
        self.loader.load();
        StateEvent::StatusMessage("Loading poems...".to_string())
    }

    /// Poems to show, optionally narrowed to one tag
    pub fn visible_poems(&self, tag: Option<&str>) -> Vec<&PoemMeta> {
        match tag {
            Some(tag) => views::filter_by_tag(&self.view.poems, tag),
            None => self.view.poems.iter().collect(),
        }
    }

    /// URL of a poem file on the configured site
    pub fn poem_url(&self, filename: &str) -> Option<String> {
        self.loader
            .client()
            .poem_url(filename)
            .map(|u| u.to_string())
            .ok()
    }

    /// Poll the loader for state changes
    pub fn poll(&mut self, ctx: &egui::Context) -> Vec<StateEvent> {
        let events = self.sync();
        if self.view.loading {
            ctx.request_repaint();
        }
        events
    }

    /// Pick up the latest loader state, recomputing derived views if the data changed
    fn sync(&mut self) -> Vec<StateEvent> {
        let mut events = Vec::new();

        if !matches!(self.rx.has_changed(), Ok(true)) {
            return events;
        }

        let state = self.rx.borrow_and_update().clone();
        let was_loading = self.view.loading;
        self.derived.refresh(state.data.as_ref());
        self.view = PoemsView::from_parts(&state, &self.derived);

        if was_loading && !state.loading {
            match &state.error {
                Some(msg) => {
                    events.push(StateEvent::LogError(format!("Failed to load poems: {}", msg)));
                    events.push(StateEvent::StatusMessage(format!("Error: {}", msg)));
                }
                None => {
                    let count = self.view.poems.len();
                    events.push(StateEvent::StatusMessage(format!("Loaded {} poems", count)));
                    events.push(StateEvent::LogInfo(format!(
                        "Loaded {} poems from {}",
                        count,
                        self.loader.client().base()
                    )));
                }
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ManifestClient;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn state_for(response: ResponseTemplate) -> (MockServer, PoemsState) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/poems/poems.json"))
            .respond_with(response)
            .mount(&server)
            .await;

        let client = ManifestClient::new(&server.uri()).unwrap();
        let loader = PoemsLoader::activate(client, true);
        (server, PoemsState::new(loader))
    }

    #[tokio::test]
    async fn test_sync_reports_loaded_poems() {
        let body = r#"{"poems":[{"filename":"b.md","tags":["sea"]},{"filename":"a.md","tags":["sky"]}]}"#;
        let (_server, mut state) =
            state_for(ResponseTemplate::new(200).set_body_raw(body, "application/json")).await;
        assert!(state.view.loading);

        state.loader.settled().await;
        let events = state.sync();

        assert!(!state.view.loading);
        assert_eq!(state.view.poems[0].filename, "a.md");
        assert_eq!(events[0], StateEvent::StatusMessage("Loaded 2 poems".to_string()));

        // Nothing new: no events, view unchanged
        assert!(state.sync().is_empty());

        let visible = state.visible_poems(Some("sea"));
        let sea: Vec<&str> = visible.iter().map(|p| p.filename.as_str()).collect();
        assert_eq!(sea, vec!["b.md"]);
        assert_eq!(state.visible_poems(None).len(), 2);
    }

    #[tokio::test]
    async fn test_sync_reports_errors() {
        let (_server, mut state) = state_for(ResponseTemplate::new(404)).await;

        state.loader.settled().await;
        let events = state.sync();

        assert_eq!(state.view.error.as_deref(), Some("Failed to fetch poems.json (404)"));
        assert!(events.contains(&StateEvent::StatusMessage(
            "Error: Failed to fetch poems.json (404)".to_string()
        )));
    }

    #[tokio::test]
    async fn test_poem_url() {
        let (server, state) = state_for(ResponseTemplate::new(404)).await;
        assert_eq!(
            state.poem_url("dawn.md"),
            Some(format!("{}/poems/dawn.md", server.uri()))
        );
    }
}
