//! Console application state and event loop

use crate::aws::{ActionError, ConnectOperations};
use crate::store::SnapshotStore;
use crate::tui::input::{KeyHandler, KeyResult};
use crate::tui::ui;
use crate::workflow::{self, Session};
use anyhow::{Context, Result};
use connect_console_common::ResourceKind;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::prelude::*;
use ratatui::widgets::TableState;
use std::time::Duration;
use tracing::{error, info};

/// An action requested from the keyboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    LoadConfiguration(String),
    Load(ResourceKind),
    Delete(ResourceKind),
    Analyse,
    Clear,
}

impl UiAction {
    /// Short progress label for the header
    pub fn label(&self) -> String {
        match self {
            UiAction::LoadConfiguration(id) => format!("Loading configuration for {id}"),
            UiAction::Load(kind) => format!("Loading {}", kind.label().to_lowercase()),
            UiAction::Delete(kind) => format!("Deleting {}", kind.label().to_lowercase()),
            UiAction::Analyse => "Analysing queues".to_string(),
            UiAction::Clear => "Clearing local data".to_string(),
        }
    }
}

/// Input mode of the shell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Typing an instance id for "load configuration"
    Prompt { input: String },
    /// Waiting for y/n before running a destructive action
    Confirm(UiAction),
    Help,
}

/// Outcome message shown under the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Info(String),
    Failure(ActionError),
}

pub struct App<C> {
    client: C,
    store: SnapshotStore,
    pub session: Session,
    pub active: ResourceKind,
    pub mode: Mode,
    pub banner: Option<Banner>,
    /// Label of the action currently awaited, if any
    pub busy: Option<String>,
    pub should_quit: bool,
    queue_table: TableState,
    flow_table: TableState,
}

impl<C> App<C> {
    pub fn new(client: C, store: SnapshotStore, session: Session) -> Self {
        let mut app = Self {
            client,
            store,
            session,
            active: ResourceKind::Queue,
            mode: Mode::Normal,
            banner: None,
            busy: None,
            should_quit: false,
            queue_table: TableState::default(),
            flow_table: TableState::default(),
        };
        app.clamp_cursors();
        app
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn table_state_mut(&mut self, kind: ResourceKind) -> &mut TableState {
        match kind {
            ResourceKind::Queue => &mut self.queue_table,
            ResourceKind::ContactFlow => &mut self.flow_table,
        }
    }

    /// Row under the cursor in the active table
    pub fn cursor(&self) -> Option<usize> {
        match self.active {
            ResourceKind::Queue => self.queue_table.selected(),
            ResourceKind::ContactFlow => self.flow_table.selected(),
        }
    }

    pub fn switch_kind(&mut self) {
        self.active = self.active.next();
    }

    pub fn select_next(&mut self) {
        let rows = self.session.row_count(self.active);
        if rows == 0 {
            return;
        }
        let next = self.cursor().map_or(0, |i| (i + 1).min(rows - 1));
        self.table_state_mut(self.active).select(Some(next));
    }

    pub fn select_previous(&mut self) {
        let rows = self.session.row_count(self.active);
        if rows == 0 {
            return;
        }
        let previous = self.cursor().map_or(0, |i| i.saturating_sub(1));
        self.table_state_mut(self.active).select(Some(previous));
    }

    pub fn toggle_current(&mut self) {
        if let Some(index) = self.cursor() {
            self.session.toggle_row(self.active, index);
        }
    }

    pub fn select_all(&mut self) {
        self.session.select_all(self.active);
    }

    pub fn clear_selection(&mut self) {
        self.session.clear_selection(self.active);
    }

    /// Start the instance id prompt, pre-filled with the current id
    pub fn begin_prompt(&mut self) {
        let input = self
            .session
            .instance_id()
            .map(|id| id.to_string())
            .unwrap_or_default();
        self.mode = Mode::Prompt { input };
    }

    /// Ask for confirmation of a delete on the active kind. Nothing selected
    /// means nothing to confirm.
    pub fn request_delete(&mut self) -> Option<UiAction> {
        let action = UiAction::Delete(self.active);
        if self.session.selected_count(self.active) == 0 {
            return Some(action);
        }
        self.mode = Mode::Confirm(action);
        None
    }

    pub fn request_clear(&mut self) {
        self.mode = Mode::Confirm(UiAction::Clear);
    }

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            Mode::Help => Mode::Normal,
            _ => Mode::Help,
        };
    }

    fn clamp_cursors(&mut self) {
        for kind in ResourceKind::ALL {
            let rows = self.session.row_count(kind);
            let state = self.table_state_mut(kind);
            let selected = match (rows, state.selected()) {
                (0, _) => None,
                (_, None) => Some(0),
                (rows, Some(i)) => Some(i.min(rows - 1)),
            };
            state.select(selected);
        }
    }

    fn report<T>(&mut self, result: Result<T, ActionError>, describe: impl FnOnce(&T) -> String) {
        self.banner = Some(match result {
            Ok(value) => Banner::Success(describe(&value)),
            Err(e) => {
                error!(kind = %e.kind, code = ?e.code, error = %e.message, "Action failed");
                Banner::Failure(e)
            }
        });
    }
}

impl<C: ConnectOperations> App<C> {
    /// Run one action to completion and record its banner
    pub async fn perform(&mut self, action: UiAction) {
        info!(action = %action.label(), "Running action");

        match action {
            UiAction::LoadConfiguration(instance_id) => {
                let result = workflow::load_configuration(
                    &self.client,
                    &self.store,
                    &mut self.session,
                    &instance_id,
                )
                .await;
                self.report(result, |config| format!("Configured instance {}", config.id));
            }
            UiAction::Load(kind) => {
                let result = match kind {
                    ResourceKind::Queue => {
                        workflow::load_queues(&self.client, &self.store, &mut self.session).await
                    }
                    ResourceKind::ContactFlow => {
                        workflow::load_flows(&self.client, &self.store, &mut self.session).await
                    }
                };
                self.report(result, |summary| {
                    let mut text = format!("Loaded {} {}", summary.rows, kind.label().to_lowercase());
                    if summary.dropped_selection > 0 {
                        text.push_str(&format!(
                            " ({} selected rows no longer exist)",
                            summary.dropped_selection
                        ));
                    }
                    text
                });
            }
            UiAction::Delete(kind) => {
                let result = match kind {
                    ResourceKind::Queue => {
                        workflow::delete_queues(&self.client, &self.store, &mut self.session).await
                    }
                    ResourceKind::ContactFlow => {
                        workflow::delete_flows(&self.client, &self.store, &mut self.session).await
                    }
                };
                self.report(result, |summary| {
                    format!("Deleted {} {}", summary.applied, kind.label().to_lowercase())
                });
            }
            UiAction::Analyse => {
                let result =
                    workflow::analyse_queues(&self.client, &self.store, &mut self.session).await;
                self.report(result, |summary| format!("Analysed {} queues", summary.applied));
            }
            UiAction::Clear => {
                let result = workflow::clear(&self.store, &mut self.session);
                self.report(result, |report| {
                    format!("Removed {} local files", report.removed)
                });
            }
        }

        self.clamp_cursors();
    }

    /// Main event loop. Each action is awaited before the next frame.
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut render_interval = tokio::time::interval(Duration::from_millis(100));

        while !self.should_quit {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            match KeyHandler::handle(self, key) {
                                KeyResult::Action(action) => {
                                    self.busy = Some(action.label());
                                    terminal.draw(|f| ui::render(f, self))?;
                                    self.perform(action).await;
                                    self.busy = None;
                                }
                                KeyResult::Quit => self.should_quit = true,
                                KeyResult::Handled | KeyResult::Unhandled => {}
                            }
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                        None => break,
                    }
                }

                _ = render_interval.tick() => {
                    // tui-logger >= 0.14 moves events on its own background thread
                    // (spawned by `init_logger`), so no explicit `move_events()` here.
                    terminal.draw(|f| ui::render(f, self))?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::{ErrorKind, MockConnectOperations};
    use crate::workflow::{InstanceId, Phase};
    use connect_console_common::{InstanceInfo, QueueRecord};
    use tempfile::TempDir;

    fn queue(id: &str) -> QueueRecord {
        QueueRecord {
            id: id.to_string(),
            arn: format!("arn:queue/{id}"),
            name: id.to_string(),
            queue_type: Some("STANDARD".to_string()),
        }
    }

    fn app(mock: MockConnectOperations) -> (TempDir, App<MockConnectOperations>) {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path());
        let session = Session::new(InstanceId::parse("inst-1"));
        (dir, App::new(mock, store, session))
    }

    #[tokio::test]
    async fn test_load_sets_cursor_and_success_banner() {
        let mut mock = MockConnectOperations::new();
        mock.expect_list_queues()
            .returning(|_, _| Ok(vec![queue("q-1"), queue("q-2")]));
        let (_dir, mut app) = app(mock);
        assert_eq!(app.cursor(), None);

        app.perform(UiAction::Load(ResourceKind::Queue)).await;

        assert_eq!(app.cursor(), Some(0));
        assert_eq!(app.banner, Some(Banner::Success("Loaded 2 queues".to_string())));
    }

    #[tokio::test]
    async fn test_failure_banner_keeps_app_usable() {
        let mut mock = MockConnectOperations::new();
        mock.expect_describe_instance()
            .returning(|_| Err(anyhow::anyhow!("AccessDeniedException: denied")));
        mock.expect_list_queues()
            .returning(|_, _| Ok(vec![queue("q-1")]));
        let (_dir, mut app) = app(mock);

        app.perform(UiAction::LoadConfiguration("inst-9".to_string()))
            .await;
        match &app.banner {
            Some(Banner::Failure(e)) => assert_eq!(e.kind, ErrorKind::AccessDenied),
            other => panic!("unexpected banner: {other:?}"),
        }

        app.perform(UiAction::Load(ResourceKind::Queue)).await;
        assert!(matches!(app.banner, Some(Banner::Success(_))));
    }

    #[tokio::test]
    async fn test_configuration_updates_session() {
        let mut mock = MockConnectOperations::new();
        mock.expect_describe_instance().returning(|id| {
            Ok(InstanceInfo {
                id: id.to_string(),
                arn: "arn:instance".to_string(),
            })
        });
        let (_dir, mut app) = app(mock);

        app.perform(UiAction::LoadConfiguration("inst-7".to_string()))
            .await;

        assert_eq!(app.session.instance_id().unwrap().as_str(), "inst-7");
    }

    #[tokio::test]
    async fn test_clear_resets_cursor() {
        let mut mock = MockConnectOperations::new();
        mock.expect_list_queues()
            .returning(|_, _| Ok(vec![queue("q-1")]));
        let (_dir, mut app) = app(mock);
        app.perform(UiAction::Load(ResourceKind::Queue)).await;

        app.perform(UiAction::Clear).await;

        assert_eq!(app.cursor(), None);
        assert_eq!(app.session.phase(ResourceKind::Queue), Phase::Empty);
    }

    #[test]
    fn test_navigation_is_bounded() {
        let (_dir, mut app) = app(MockConnectOperations::new());
        app.session
            .queues
            .replace_snapshot(vec![queue("q-1"), queue("q-2")]);
        app.clamp_cursors();

        app.select_next();
        app.select_next();
        assert_eq!(app.cursor(), Some(1));
        app.select_previous();
        app.select_previous();
        assert_eq!(app.cursor(), Some(0));
    }

    #[test]
    fn test_delete_without_selection_skips_confirmation() {
        let (_dir, mut app) = app(MockConnectOperations::new());
        assert_eq!(
            app.request_delete(),
            Some(UiAction::Delete(ResourceKind::Queue))
        );
        assert_eq!(app.mode, Mode::Normal);

        app.session.queues.replace_snapshot(vec![queue("q-1")]);
        app.clamp_cursors();
        app.toggle_current();
        assert_eq!(app.request_delete(), None);
        assert_eq!(
            app.mode,
            Mode::Confirm(UiAction::Delete(ResourceKind::Queue))
        );
    }
}
