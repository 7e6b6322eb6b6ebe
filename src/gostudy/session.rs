//! # Study Session
//!
//! All mutable state of one visitor lives here, in a plain value:
//!
//! - **Selection**: the active `category/topic` pair. It only ever holds pairs that
//!   were looked up successfully, so dereferencing it against the same catalogue does
//!   not fail.
//! - **Buffer**: the editable copy of the active snippet. Replaced wholesale on every
//!   selection change; edits are otherwise free and never written back.
//! - **Execution display**: `is_running` plus the text of the output panel.
//!
//! ## Run bookkeeping
//!
//! A simulated run is split in two halves so that the timer itself never touches the
//! session: [`Session::begin_run`] flips the display to the running state and hands out
//! a [`RunTicket`], and [`Session::complete_run`] later applies the ticket. Every
//! selection change and every new run bumps the session generation; a ticket from an
//! older generation is ignored. As a consequence:
//!
//! - restarting a run makes the earlier ticket inert, so only the latest one lands;
//! - navigating away mid-run makes the pending ticket inert, and the new topic keeps its
//!   freshly reset display.
//!
//! `is_running` is only ever set by `begin_run`, and both the latest ticket and any
//! selection clear it, so it cannot stay stuck.

use crate::catalogue::Catalogue;
use crate::error::Result;
use crate::format::format_with_unit;
use crate::model::{Topic, TopicRef};
use serde::Serialize;
use tracing::debug;

/// Output panel text while a simulated run is in flight.
pub const RUNNING_PLACEHOLDER: &str = "Running...";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionDisplay {
    pub is_running: bool,
    pub output: String,
}

/// Proof that a run was started, bound to the topic active at that moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTicket {
    pub generation: u64,
    pub topic: TopicRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    selection: TopicRef,
    buffer: String,
    display: ExecutionDisplay,
    generation: u64,
}

impl Session {
    /// Starts a session on `start`, which must exist in `catalogue`.
    pub fn new(catalogue: &Catalogue, start: &TopicRef) -> Result<Self> {
        let topic = catalogue.lookup(start)?;
        Ok(Self {
            selection: start.clone(),
            buffer: topic.content.code.clone(),
            display: ExecutionDisplay::default(),
            generation: 0,
        })
    }

    /// Starts a session on the catalogue's first topic.
    pub fn at_first_topic(catalogue: &Catalogue) -> Result<Self> {
        Self::new(catalogue, &catalogue.first_topic())
    }

    pub fn selection(&self) -> &TopicRef {
        &self.selection
    }

    pub fn active_topic<'c>(&self, catalogue: &'c Catalogue) -> Result<&'c Topic> {
        catalogue.lookup(&self.selection)
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn display(&self) -> &ExecutionDisplay {
        &self.display
    }

    pub fn select_topic(
        &mut self,
        catalogue: &Catalogue,
        category_key: &str,
        topic_key: &str,
    ) -> Result<()> {
        // Look up before touching anything: a failed selection leaves the session as is.
        let code = catalogue
            .topic(category_key, topic_key)?
            .content
            .code
            .clone();

        self.selection = TopicRef::new(category_key, topic_key);
        self.buffer = code;
        self.display = ExecutionDisplay::default();
        self.generation += 1;
        debug!(topic = %self.selection, generation = self.generation, "topic selected");
        Ok(())
    }

    pub fn select(&mut self, catalogue: &Catalogue, topic_ref: &TopicRef) -> Result<()> {
        self.select_topic(catalogue, &topic_ref.category, &topic_ref.topic)
    }

    /// Replaces the buffer with user edits. Display state is left alone.
    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    pub fn begin_run(&mut self) -> RunTicket {
        self.generation += 1;
        self.display = ExecutionDisplay {
            is_running: true,
            output: RUNNING_PLACEHOLDER.to_string(),
        };
        debug!(topic = %self.selection, generation = self.generation, "run started");
        RunTicket {
            generation: self.generation,
            topic: self.selection.clone(),
        }
    }

    /// Applies a finished run. Returns `false` (and changes nothing) for a stale ticket.
    ///
    /// The revealed text is always the topic's authored output; the buffer is not read.
    pub fn complete_run(&mut self, catalogue: &Catalogue, ticket: &RunTicket) -> bool {
        if ticket.generation != self.generation || ticket.topic != self.selection {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "stale run completion ignored"
            );
            return false;
        }
        let Ok(topic) = catalogue.lookup(&ticket.topic) else {
            return false;
        };
        self.display = ExecutionDisplay {
            is_running: false,
            output: topic.content.output.clone(),
        };
        debug!(topic = %ticket.topic, "run completed");
        true
    }

    pub fn clear_output(&mut self) {
        self.display.output.clear();
    }

    pub fn format_buffer(&mut self, indent_unit: &str) {
        self.buffer = format_with_unit(&self.buffer, indent_unit);
    }
}
