//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry point
//! for every gostudy operation, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the catalogue, the session and the run scheduler for one visitor
//! - **Normalizes inputs** (selector strings such as `3` or `basics/project` → `TopicRef`)
//! - **Dispatches** to the appropriate command function
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs` and `session.rs`
//! - **I/O**: no stdout, stderr or terminal assumptions
//! - **Presentation**: returns data structures, not strings
//!
//! ## Simulated runs
//!
//! [`StudyApi::run`] returns at once with the running display; the delay runs on a tokio
//! task. Completions are applied only when the owner asks for them, through
//! [`StudyApi::next_run_event`], [`StudyApi::wait_for_run`] or [`StudyApi::poll_run`],
//! so the session is only ever mutated from the caller's side. Selecting a topic
//! cancels a pending run.

use crate::catalogue::Catalogue;
use crate::commands;
use crate::config::MAX_INDENT_WIDTH;
use crate::error::Result;
use crate::format::{indent_unit, DEFAULT_INDENT};
use crate::index::{display_topic, resolve_selector};
use crate::model::TopicRef;
use crate::runner::{RunScheduler, DEFAULT_RUN_DELAY};
use crate::session::{ExecutionDisplay, Session};
use std::path::Path;
use std::time::Duration;

/// The main API facade for gostudy operations.
pub struct StudyApi {
    catalogue: Catalogue,
    session: Session,
    scheduler: RunScheduler,
    indent_unit: String,
}

impl StudyApi {
    /// Opens a session on the catalogue's first topic.
    pub fn new(catalogue: Catalogue) -> Result<Self> {
        let session = Session::at_first_topic(&catalogue)?;
        Ok(Self {
            catalogue,
            session,
            scheduler: RunScheduler::new(DEFAULT_RUN_DELAY),
            indent_unit: DEFAULT_INDENT.to_string(),
        })
    }

    pub fn with_run_delay(mut self, delay: Duration) -> Self {
        self.scheduler = RunScheduler::new(delay);
        self
    }

    /// Widths past [`MAX_INDENT_WIDTH`] are capped.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_unit = indent_unit(width.min(MAX_INDENT_WIDTH));
        self
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn selection(&self) -> &TopicRef {
        self.session.selection()
    }

    pub fn buffer(&self) -> &str {
        self.session.buffer()
    }

    pub fn display(&self) -> &ExecutionDisplay {
        self.session.display()
    }

    pub fn run_delay(&self) -> Duration {
        self.scheduler.delay()
    }

    pub fn resolve(&self, selector: &str) -> Result<TopicRef> {
        resolve_selector(&self.catalogue, selector)
    }

    pub fn list_topics(&self, category: Option<&str>) -> Result<commands::CmdResult> {
        commands::list::run(&self.catalogue, category)
    }

    pub fn show_topic(&self, selector: &str) -> Result<commands::CmdResult> {
        let topic_ref = self.resolve(selector)?;
        commands::show::run(&self.catalogue, &topic_ref)
    }

    /// The active topic together with the (possibly edited) buffer and output panel.
    pub fn show_current(&self) -> Result<commands::CmdResult> {
        let topic = display_topic(&self.catalogue, self.session.selection())?;
        Ok(commands::CmdResult::default()
            .with_topic(topic)
            .with_buffer(self.session.buffer())
            .with_display(self.session.display().clone()))
    }

    pub fn search_topics(&self, term: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.catalogue, term)
    }

    pub fn select_topic(
        &mut self,
        category_key: &str,
        topic_key: &str,
    ) -> Result<commands::CmdResult> {
        let topic_ref = TopicRef::new(category_key, topic_key);
        let result = commands::select::run(&self.catalogue, &mut self.session, &topic_ref)?;
        self.scheduler.cancel();
        Ok(result)
    }

    /// Selects by sidebar number or `category/topic` path.
    pub fn select(&mut self, selector: &str) -> Result<commands::CmdResult> {
        let topic_ref = self.resolve(selector)?;
        self.select_topic(&topic_ref.category, &topic_ref.topic)
    }

    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.session.set_buffer(text);
    }

    /// Starts a simulated run. Requires a tokio runtime.
    pub fn run(&mut self) -> commands::CmdResult {
        let (ticket, result) = commands::run::begin(&mut self.session);
        self.scheduler.schedule(ticket);
        result
    }

    pub fn run_pending(&self) -> bool {
        self.scheduler.has_pending()
    }

    /// Waits for the next timer completion and applies it.
    ///
    /// `None` when nothing is pending or the completion was stale.
    pub async fn next_run_event(&mut self) -> Option<commands::CmdResult> {
        let ticket = self.scheduler.next_completion().await?;
        commands::run::complete(&self.catalogue, &mut self.session, &ticket)
    }

    /// Waits until the pending run, if any, has landed.
    pub async fn wait_for_run(&mut self) -> Option<commands::CmdResult> {
        while self.scheduler.has_pending() {
            if let Some(result) = self.next_run_event().await {
                return Some(result);
            }
        }
        None
    }

    /// Applies a completion that has already arrived, without waiting.
    pub fn poll_run(&mut self) -> Option<commands::CmdResult> {
        let ticket = self.scheduler.try_completion()?;
        commands::run::complete(&self.catalogue, &mut self.session, &ticket)
    }

    pub fn format_buffer(&mut self) -> commands::CmdResult {
        commands::reindent::run(&mut self.session, &self.indent_unit)
    }

    pub fn clear_output(&mut self) -> commands::CmdResult {
        commands::clear::run(&mut self.session)
    }
}

/// Config access without a session, so a config that points at a broken catalogue can
/// still be repaired.
pub fn config_in(config_dir: &Path, action: ConfigAction) -> Result<commands::CmdResult> {
    commands::config::run(config_dir, action)
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StudyError;
    use crate::session::RUNNING_PLACEHOLDER;

    fn api() -> StudyApi {
        StudyApi::new(Catalogue::builtin().unwrap()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn welcome_to_go_end_to_end() {
        let mut api = api();
        api.select_topic("basics", "project").unwrap();
        assert!(api.buffer().contains("fmt.Println(\"Welcome to Go\")"));

        let started = api.run();
        assert_eq!(started.display.unwrap().output, RUNNING_PLACEHOLDER);
        assert!(api.display().is_running);

        let done = api.wait_for_run().await.unwrap();
        assert_eq!(done.display.unwrap().output, "Welcome to Go");
        assert_eq!(
            api.display(),
            &ExecutionDisplay {
                is_running: false,
                output: "Welcome to Go".into()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn run_waits_for_the_configured_delay() {
        let mut api = api().with_run_delay(Duration::from_millis(300));
        let start = tokio::time::Instant::now();
        api.run();
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_millis(299)).await;
        tokio::task::yield_now().await;
        assert!(api.poll_run().is_none());
        assert!(api.display().is_running);

        assert!(api.wait_for_run().await.is_some());
        assert!(start.elapsed() >= Duration::from_millis(300));
        assert!(!api.display().is_running);
    }

    #[tokio::test(start_paused = true)]
    async fn output_ignores_buffer_edits() {
        let mut api = api();
        let target = api.catalogue().entry(10).unwrap().topic_ref();
        api.select(&target.to_string()).unwrap();
        api.set_buffer("garbage that would never compile {{{");
        api.run();
        api.wait_for_run().await;

        let expected = api.catalogue().lookup(&target).unwrap().content.output.clone();
        assert_eq!(api.display().output, expected);
    }

    #[tokio::test(start_paused = true)]
    async fn navigating_mid_run_leaves_new_topic_clean() {
        let mut api = api();
        api.run();
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_millis(400)).await;
        api.select("2").unwrap();

        assert!(!api.run_pending());
        tokio::time::advance(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        assert!(api.poll_run().is_none());
        assert_eq!(api.display(), &ExecutionDisplay::default());
    }

    #[tokio::test(start_paused = true)]
    async fn rerun_restarts_and_lands_once() {
        let mut api = api();
        api.run();
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_millis(700)).await;
        api.run();
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_millis(200)).await;
        tokio::task::yield_now().await;
        assert!(api.poll_run().is_none());
        assert!(api.display().is_running);

        assert!(api.wait_for_run().await.is_some());
        assert!(!api.display().is_running);
        assert!(!api.run_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn wait_without_run_returns_none() {
        let mut api = api();
        assert!(api.wait_for_run().await.is_none());
    }

    #[test]
    fn failed_select_keeps_everything() {
        let mut api = api();
        api.set_buffer("edited");
        let before = api.session().clone();

        let err = api.select_topic("basics", "nope").unwrap_err();
        assert!(matches!(err, StudyError::UnknownTopic { .. }));
        assert!(api.select("not-a-selector").is_err());
        assert_eq!(api.session(), &before);
    }

    #[test]
    fn format_and_clear() {
        let mut api = api().with_indent_width(2);
        api.set_buffer("a{\nb\n}");
        let result = api.format_buffer();
        assert_eq!(result.buffer.as_deref(), Some("a{\n  b\n}"));

        let result = api.clear_output();
        assert_eq!(result.display.unwrap().output, "");
    }

    #[test]
    fn indent_width_is_capped() {
        let mut api = api().with_indent_width(usize::MAX);
        api.set_buffer("a{\nb\n}");
        let result = api.format_buffer();
        let expected = format!("a{{\n{}b\n}}", " ".repeat(MAX_INDENT_WIDTH));
        assert_eq!(result.buffer.as_deref(), Some(expected.as_str()));
    }

    #[test]
    fn show_current_reflects_edits() {
        let mut api = api();
        api.set_buffer("mine");
        let result = api.show_current().unwrap();
        assert_eq!(result.buffer.as_deref(), Some("mine"));
        assert_eq!(result.topic.unwrap().number, 1);
    }
}
