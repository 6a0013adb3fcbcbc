use crate::api::MeterApi;
use crate::config::Config;
use crate::flows;
use crate::notifications::Notifications;
use crate::state::{AppState, SharedState};
use crate::types::Effect;
use crate::ui;
use color_eyre::Result;
use ratatui::{DefaultTerminal, Frame};
use std::sync::{Arc, RwLock};
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{error, info};

pub struct App<A: MeterApi> {
    state: SharedState,
    api: Arc<A>,
    base_url: String,
    event_handler: ui::EventHandler,
}

impl<A: MeterApi> App<A> {
    pub fn new(api: A, config: &Config) -> Self {
        let state = AppState {
            notifications: Notifications::new(config.notification_duration()),
            ..Default::default()
        };

        Self {
            state: Arc::new(RwLock::new(state)),
            api: Arc::new(api),
            base_url: config.server.base_url.clone(),
            event_handler: ui::EventHandler::new(),
        }
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        info!(base_url = %self.base_url, "Starting meter registry");

        // Populate the cache and dashboard before the list tab is opened
        self.spawn(Effect::Load);

        // Main UI loop
        while !self.event_handler.should_quit {
            self.tick(Instant::now());

            terminal.draw(|frame| self.draw(frame))?;

            if let Some(effect) = self.event_handler.handle_events(&self.state)? {
                self.spawn(effect);
            }
        }

        info!("Shutting down");
        Ok(())
    }

    fn tick(&self, now: Instant) {
        if let Ok(mut state) = self.state.write() {
            state.notifications.tick(now);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        if let Ok(state) = self.state.read() {
            ui::render_app(frame, &state, &self.base_url);
        }
    }

    /// Run an effect in the background so drawing continues meanwhile
    fn spawn(&self, effect: Effect) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state);
        tokio::spawn(async move { run_effect(api.as_ref(), &state, effect).await })
    }
}

/// Dispatch an effect to its flow. Failures have already been notified to
/// the user by the flow; they are only logged here.
pub async fn run_effect<A: MeterApi>(api: &A, state: &SharedState, effect: Effect) {
    match effect {
        Effect::Load => {
            if let Err(e) = flows::load_meters(api, state).await {
                error!(error = %e, "Initial meter load failed");
            }
        }
        Effect::Refresh => {
            if let Err(e) = flows::refresh(api, state).await {
                error!(error = %e, "Refresh failed");
            }
        }
        Effect::Submit => {
            flows::submit_form(api, state).await;
        }
        Effect::ConfirmDelete => {
            flows::confirm_delete(api, state).await;
        }
        Effect::SwitchTab(tab) => {
            flows::switch_tab(api, state, tab).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::test_support::{assert_buffer_contains, meter, FakeApi};
    use crate::types::{DeleteFlow, Severity, Tab};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::time::Duration;

    fn app_with(api: FakeApi) -> App<FakeApi> {
        App::new(api, &Config::default())
    }

    #[tokio::test]
    async fn test_spawned_load_populates_dashboard() {
        let app = app_with(FakeApi::with_meters(vec![
            meter("abc123", "M1"),
            meter("def456", "M2"),
        ]));

        app.spawn(Effect::Load).await.unwrap();

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        assert_buffer_contains(terminal.backend().buffer(), "Total Meters: 2");
        assert_buffer_contains(terminal.backend().buffer(), "[F1] Register Meter");
    }

    #[tokio::test]
    async fn test_failed_initial_load_is_not_fatal() {
        let api = FakeApi::default();
        api.fail_list(ApiError::Transport("connection refused".to_string()));
        let app = app_with(api);

        app.spawn(Effect::Load).await.unwrap();

        let state = app.state.read().unwrap();
        assert!(state.data.visibility.empty);
        assert_eq!(state.notifications.len(), 1);
        assert_eq!(
            state.notifications.iter().next().map(|n| n.severity),
            Some(Severity::Error)
        );
    }

    #[tokio::test]
    async fn test_delete_effect_round_trip() {
        let app = app_with(FakeApi::with_meters(vec![meter("abc123", "M1")]));
        app.spawn(Effect::Load).await.unwrap();
        app.state
            .write()
            .unwrap()
            .delete
            .request("abc123".to_string(), "M1".to_string());

        app.spawn(Effect::ConfirmDelete).await.unwrap();

        let state = app.state.read().unwrap();
        assert_eq!(state.delete, DeleteFlow::Idle);
        assert_eq!(state.total_meters(), 0);
        assert_eq!(
            app.api.calls(),
            vec!["GET /meters", "DELETE /meters/abc123", "GET /meters"]
        );
    }

    #[tokio::test]
    async fn test_switch_tab_effect() {
        let app = app_with(FakeApi::default());
        app.spawn(Effect::SwitchTab(Tab::Meters)).await.unwrap();

        assert_eq!(app.state.read().unwrap().ui.active_tab, Tab::Meters);
        assert_eq!(app.api.calls(), vec!["GET /meters"]);
    }

    #[test]
    fn test_tick_expires_notifications_with_configured_duration() {
        let mut config = Config::default();
        config.ui.notification_ms = 1000;
        let app = App::new(FakeApi::default(), &config);

        let start = Instant::now();
        app.state.write().unwrap().notifications.push(
            "Meter deleted successfully!",
            Severity::Success,
            start,
        );

        app.tick(start + Duration::from_millis(999));
        assert!(!app.state.read().unwrap().notifications.iter().any(|n| n.is_exiting()));

        app.tick(start + Duration::from_millis(1000));
        assert!(app.state.read().unwrap().notifications.iter().all(|n| n.is_exiting()));

        app.tick(start + Duration::from_millis(1300));
        assert!(app.state.read().unwrap().notifications.is_empty());
    }
}
