//! One submit cycle: collect the form, ask the scorer, show the outcome.
//!
//! The scorer call blocks, so it runs on a worker thread and reports back
//! over a channel. The UI thread polls [`SubmissionController::poll`] each
//! tick; only one request may be outstanding at a time.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use tracing::{debug, info, warn};

use crate::collector::collect;
use crate::error::{RankerError, Result};
use crate::models::RankedBank;
use crate::results::ResultsView;
use crate::rows::RowSequence;
use crate::scorer::Scorer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Collecting,
    AwaitingResponse,
    Success,
    Failure(RankerError),
}

/// What happened when the user asked for a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// A request carrying this many banks is on its way.
    Started(usize),
    /// A previous request is still outstanding; nothing was sent.
    InFlight,
}

type Outcome = Result<Vec<RankedBank>>;

pub struct SubmissionController {
    scorer: Arc<dyn Scorer>,
    state: SubmitState,
    last_outcome: Option<SubmitState>,
    pending: Option<Receiver<Outcome>>,
}

impl SubmissionController {
    pub fn new(scorer: Arc<dyn Scorer>) -> Self {
        Self {
            scorer,
            state: SubmitState::Idle,
            last_outcome: None,
            pending: None,
        }
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    /// How the most recent cycle ended: `Success` or `Failure`. The
    /// controller itself is back in `Idle` by then.
    pub fn last_outcome(&self) -> Option<&SubmitState> {
        self.last_outcome.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.state == SubmitState::AwaitingResponse
    }

    /// Message of the last failure, if the last cycle failed.
    pub fn failure_message(&self) -> Option<String> {
        match &self.last_outcome {
            Some(SubmitState::Failure(err)) => Some(err.to_string()),
            _ => None,
        }
    }

    /// Start a cycle. Clears the previous results, then either fails fast
    /// with [`RankerError::NoValidBanks`] or hands the banks to the scorer.
    pub fn submit(&mut self, rows: &RowSequence, results: &mut ResultsView) -> Result<Submission> {
        if self.is_busy() {
            return Ok(Submission::InFlight);
        }

        results.clear();
        self.last_outcome = None;
        self.state = SubmitState::Collecting;

        let banks = collect(rows);
        if banks.is_empty() {
            warn!(rows = rows.len(), "no complete bank rows to submit");
            return Err(self.fail(RankerError::NoValidBanks));
        }

        let count = banks.len();
        let (tx, rx) = mpsc::channel();
        let scorer = Arc::clone(&self.scorer);
        let spawned = thread::Builder::new()
            .name("scorer".to_string())
            .spawn(move || {
                let outcome = scorer.calculate(&banks);
                let _ = tx.send(outcome);
            });

        if let Err(err) = spawned {
            return Err(self.fail(RankerError::Transport(err.to_string())));
        }

        info!(banks = count, "submitted banks for ranking");
        self.pending = Some(rx);
        self.state = SubmitState::AwaitingResponse;
        Ok(Submission::Started(count))
    }

    /// Check for a finished request without blocking. Returns the number of
    /// ranked banks, or the failure, once the request resolves.
    pub fn poll(&mut self, results: &mut ResultsView) -> Option<Result<usize>> {
        let outcome = match self.pending.as_ref()?.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(worker_lost()),
        };
        Some(self.finish(outcome, results))
    }

    /// Block until the outstanding request resolves.
    pub fn wait(&mut self, results: &mut ResultsView) -> Option<Result<usize>> {
        let outcome = self.pending.as_ref()?.recv().unwrap_or_else(|_| Err(worker_lost()));
        Some(self.finish(outcome, results))
    }

    fn finish(&mut self, outcome: Outcome, results: &mut ResultsView) -> Result<usize> {
        self.pending = None;
        match outcome {
            Ok(ranked) => {
                info!(results = ranked.len(), "ranking received");
                results.render(&ranked);
                self.settle(SubmitState::Success);
                Ok(ranked.len())
            }
            Err(err) => {
                results.clear();
                Err(self.fail(err))
            }
        }
    }

    fn fail(&mut self, err: RankerError) -> RankerError {
        warn!(error = %err, "submission failed");
        self.settle(SubmitState::Failure(err.clone()));
        err
    }

    /// Pass through a terminal state and come back to rest in `Idle`.
    fn settle(&mut self, outcome: SubmitState) {
        debug!(from = ?self.state, to = ?outcome, "submission resolved");
        self.state = outcome;
        self.last_outcome = Some(std::mem::replace(&mut self.state, SubmitState::Idle));
    }
}

fn worker_lost() -> RankerError {
    RankerError::Transport("scoring worker stopped unexpectedly".to_string())
}
