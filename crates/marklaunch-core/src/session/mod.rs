//! Interactive session lifecycle.
//!
//! A [`Session`] owns every piece of mutable picker state (query, filtered
//! view, selection, grace timer) and processes [`SessionEvent`]s one at a time.
//! The frontend feeds it events and draws [`Session::view`]; it never mutates
//! session state directly.

mod timer;

pub use timer::{DEFAULT_GRACE, GraceTimer, GraceToken};

use crate::config::{BookmarkItem, MatchedContext, Registry};
use crate::error::{Error, Result};
use crate::launch::{LaunchCommand, Spawner, dispatch};
use crate::search::filter_indices;
use crate::selection::{Direction, Selection};
use tracing::{debug, info};

/// Events the frontend delivers to the session, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    QueryChanged(String),
    Navigate(Direction),
    Confirm,
    Cancel,
    FocusLost,
    FocusGained,
    TimerElapsed(GraceToken),
}

/// How a session ended.
#[derive(Debug)]
pub enum Outcome {
    Launched(LaunchCommand),
    /// Reported to the user; the session still ends.
    LaunchFailed { command: LaunchCommand, error: Error },
    Cancelled,
    /// Focus was not regained within the grace period.
    FocusTimeout,
}

#[derive(Debug)]
pub enum Step {
    Continue,
    Terminated(Outcome),
    /// The session had already terminated; the event was dropped.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Terminated,
}

/// Result of the starting phase.
pub enum Startup<S: Spawner> {
    Running(Session<S>),
    /// No category handles the foreground application.
    NoMatch { identifier: String },
}

/// What the frontend should draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View<'a> {
    pub rows: Vec<&'a BookmarkItem>,
    pub active: Option<usize>,
}

pub struct Session<S: Spawner> {
    context: MatchedContext,
    query: String,
    view: Vec<usize>,
    selection: Selection,
    phase: Phase,
    timer: GraceTimer,
    spawner: S,
}

impl<S: Spawner> Session<S> {
    /// Match `identifier` against the registry and, on success, start running.
    ///
    /// # Errors
    ///
    /// Returns a `Schema` error if the matched category's bookmarks are malformed.
    pub fn start(
        registry: &Registry,
        identifier: &str,
        spawner: S,
        timer: GraceTimer,
    ) -> Result<Startup<S>> {
        match registry.match_context(identifier)? {
            Some(context) => Ok(Startup::Running(Self::new(context, spawner, timer))),
            None => {
                info!("No category found for {identifier}");
                Ok(Startup::NoMatch {
                    identifier: identifier.to_string(),
                })
            }
        }
    }

    /// Running session over `context` with an empty query.
    pub fn new(context: MatchedContext, spawner: S, timer: GraceTimer) -> Self {
        let mut session = Self {
            context,
            query: String::new(),
            view: Vec::new(),
            selection: Selection::Empty,
            phase: Phase::Running,
            timer,
            spawner,
        };
        session.refilter();
        session
    }

    /// Process one event to completion.
    pub fn handle(&mut self, event: SessionEvent) -> Step {
        if self.phase == Phase::Terminated {
            debug!("Dropping {:?}: session terminated", event);
            return Step::Ignored;
        }

        match event {
            SessionEvent::QueryChanged(query) => {
                self.query = query;
                self.refilter();
                Step::Continue
            }
            SessionEvent::Navigate(direction) => {
                self.selection = self.selection.navigate(direction, self.view.len());
                debug!("Navigate {:?} -> {:?}", direction, self.selection);
                Step::Continue
            }
            SessionEvent::Confirm => self.confirm(),
            SessionEvent::Cancel => self.terminate(Outcome::Cancelled),
            SessionEvent::FocusLost => {
                self.timer.arm();
                Step::Continue
            }
            SessionEvent::FocusGained => {
                self.timer.cancel();
                Step::Continue
            }
            SessionEvent::TimerElapsed(token) => {
                if self.timer.is_current(token) {
                    info!("Focus not regained within {:?}", self.timer.delay());
                    self.terminate(Outcome::FocusTimeout)
                } else {
                    debug!("Ignoring stale grace timer {:?}", token);
                    Step::Continue
                }
            }
        }
    }

    #[must_use]
    pub fn view(&self) -> View<'_> {
        View {
            rows: self.view.iter().map(|&idx| &self.context.items[idx]).collect(),
            active: self.selection.index(),
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn context(&self) -> &MatchedContext {
        &self.context
    }

    fn refilter(&mut self) {
        self.view = filter_indices(&self.query, &self.context.items);
        let rows = self.view.iter().map(|&idx| &self.context.items[idx]);
        self.selection = Selection::after_filter(&self.query, rows);
        debug!(
            "Query '{}': {} rows, selection {:?}",
            self.query,
            self.view.len(),
            self.selection
        );
    }

    fn confirm(&mut self) -> Step {
        let Some(active) = self.selection.index() else {
            debug!("Confirm with no active row");
            return Step::Continue;
        };

        // Rebuild the view so a stale index can never pick the wrong row.
        let current = filter_indices(&self.query, &self.context.items);
        let Some(&item_idx) = current.get(active) else {
            debug!("Confirm index {} out of range ({} rows)", active, current.len());
            return Step::Continue;
        };

        let item = &self.context.items[item_idx];
        let command = LaunchCommand::new(&self.context.handler_path, &item.target);
        info!("Confirmed '{}' in '{}'", item.key, self.context.category);

        let outcome = match dispatch(&self.spawner, &command) {
            Ok(()) => Outcome::Launched(command),
            Err(error) => Outcome::LaunchFailed { command, error },
        };
        self.terminate(outcome)
    }

    fn terminate(&mut self, outcome: Outcome) -> Step {
        self.timer.cancel();
        self.phase = Phase::Terminated;
        debug!("Session terminated: {:?}", outcome);
        Step::Terminated(outcome)
    }
}
