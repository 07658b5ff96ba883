//! Query lifecycle and the asynchronous analysis boundary.
//!
//! The presentation layer drives a `QuerySession`: each submission moves the
//! session to `Analyzing` and spawns an analysis task; the task's single
//! completion moves it to `Completed`. Observers follow the state through a
//! `tokio::sync::watch` channel.
//!
//! Overlapping submissions follow a latest-submission-wins policy. Every
//! submission takes a new generation number and only the completion carrying
//! the current generation is applied. Older tasks still run to the end
//! (there is no cancellation); their results are dropped.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::SelectorConfig;
use crate::error::SelectorError;
use crate::selector::{RequirementSpec, ScoredMaterial, SelectionEngine};

/// Lifecycle of a material query as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "results", rename_all = "snake_case")]
pub enum QueryState {
    /// Nothing submitted yet
    Idle,
    /// Analysis in progress
    Analyzing,
    /// Analysis finished; an empty list means "no matches"
    Completed(Vec<ScoredMaterial>),
}

impl QueryState {
    pub fn is_analyzing(&self) -> bool {
        matches!(self, QueryState::Analyzing)
    }

    /// Results if the query has completed.
    pub fn results(&self) -> Option<&[ScoredMaterial]> {
        match self {
            QueryState::Completed(results) => Some(results),
            _ => None,
        }
    }

    /// User-facing status line for the results panel.
    pub fn summary(&self) -> String {
        match self {
            QueryState::Idle => "Enter your requirements and click \"Find Suitable Materials\" \
                                 to get recommendations"
                .to_string(),
            QueryState::Analyzing => "Analyzing Materials...".to_string(),
            QueryState::Completed(results) if results.is_empty() => {
                "No materials found matching your criteria. Try adjusting your requirements."
                    .to_string()
            }
            QueryState::Completed(results) => {
                let noun = if results.len() == 1 { "material" } else { "materials" };
                format!("{} recommended {}", results.len(), noun)
            }
        }
    }
}

/// State plus the generation of the submission it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// 0 before the first submission
    pub generation: u64,
    pub state: QueryState,
}

// =============================================================================
// ANALYSIS SERVICE
// =============================================================================

/// Asynchronous stand-in for a remote analysis backend.
///
/// Waits for the configured delay, then runs the ranking pipeline. There is
/// no timeout and no cancellation: a started analysis always completes.
#[derive(Debug, Clone)]
pub struct AnalysisService {
    engine: SelectionEngine,
    delay: Duration,
}

impl AnalysisService {
    pub fn new(engine: SelectionEngine, delay: Duration) -> Self {
        Self { engine, delay }
    }

    pub fn from_config(engine: SelectionEngine, config: &SelectorConfig) -> Self {
        Self::new(engine, config.analysis_delay())
    }

    pub async fn analyze(&self, req: RequirementSpec) -> Vec<ScoredMaterial> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.engine.select(&req)
    }

    /// Run `analyze` on a spawned task. Must be called inside a Tokio runtime.
    pub fn spawn(&self, req: RequirementSpec) -> PendingAnalysis {
        let service = self.clone();
        PendingAnalysis {
            handle: tokio::spawn(async move { service.analyze(req).await }),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn engine(&self) -> &SelectionEngine {
        &self.engine
    }
}

/// A spawned analysis with exactly one completion.
#[derive(Debug)]
pub struct PendingAnalysis {
    handle: JoinHandle<Vec<ScoredMaterial>>,
}

impl PendingAnalysis {
    pub async fn wait(self) -> Result<Vec<ScoredMaterial>, SelectorError> {
        self.handle
            .await
            .map_err(|e| SelectorError::Task(format!("Analysis task failed: {}", e)))
    }
}

// =============================================================================
// QUERY SESSION
// =============================================================================

/// Query state holder for one presentation surface.
#[derive(Debug, Clone)]
pub struct QuerySession {
    service: AnalysisService,
    state: Arc<watch::Sender<SessionSnapshot>>,
}

/// Handle to a submitted query.
#[derive(Debug)]
pub struct Submission {
    pub generation: u64,
    handle: JoinHandle<Result<bool, SelectorError>>,
}

impl Submission {
    /// Wait for the analysis task. Returns whether its results were applied
    /// (false when a newer submission superseded it).
    pub async fn finished(self) -> Result<bool, SelectorError> {
        match self.handle.await {
            Ok(applied) => applied,
            Err(e) => Err(SelectorError::Task(format!("Query task failed: {}", e))),
        }
    }
}

/// What a finished `QuerySession::run` observed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryOutcome {
    pub generation: u64,
    /// False when a newer submission superseded this one; `state` then
    /// belongs to that newer submission
    pub applied: bool,
    /// Session state right after this submission's task finished
    pub state: QueryState,
}

impl QuerySession {
    pub fn new(service: AnalysisService) -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot {
            generation: 0,
            state: QueryState::Idle,
        });
        Self {
            service,
            state: Arc::new(tx),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> QueryState {
        self.state.borrow().state.clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Receive every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// Enter `Analyzing` for a new submission and return its generation.
    pub fn begin(&self) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|snapshot| {
            snapshot.generation += 1;
            snapshot.state = QueryState::Analyzing;
            generation = snapshot.generation;
        });
        generation
    }

    /// Apply results for `generation` if it is still the latest submission.
    /// Returns false, leaving the state untouched, for stale generations.
    pub fn complete(&self, generation: u64, results: Vec<ScoredMaterial>) -> bool {
        let count = results.len();
        let applied = self.state.send_if_modified(|snapshot| {
            if snapshot.generation == generation {
                snapshot.state = QueryState::Completed(results);
                true
            } else {
                false
            }
        });

        if applied {
            info!("Query {} completed with {} results", generation, count);
        } else {
            warn!(
                "Discarding results of superseded query {} (latest is {})",
                generation,
                self.state.borrow().generation
            );
        }
        applied
    }

    /// Submit a query: enter `Analyzing` and analyze on a spawned task.
    /// Must be called inside a Tokio runtime.
    pub fn submit(&self, req: RequirementSpec) -> Submission {
        let generation = self.begin();
        info!("Submitted query {}: {:?}", generation, req);

        let pending = self.service.spawn(req);
        let session = self.clone();
        let handle = tokio::spawn(async move {
            let results = pending.wait().await?;
            Ok(session.complete(generation, results))
        });

        Submission { generation, handle }
    }

    /// Submit and wait for this submission's task to finish.
    pub async fn run(&self, req: RequirementSpec) -> Result<QueryOutcome, SelectorError> {
        let submission = self.submit(req);
        let generation = submission.generation;
        let applied = submission.finished().await?;
        Ok(QueryOutcome {
            generation,
            applied,
            state: self.state(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Strength;

    fn session(delay_ms: u64) -> QuerySession {
        let service = AnalysisService::new(
            SelectionEngine::with_default_catalog(),
            Duration::from_millis(delay_ms),
        );
        QuerySession::new(service)
    }

    fn names(state: &QueryState) -> Vec<String> {
        state
            .results()
            .unwrap_or_default()
            .iter()
            .map(|s| s.material.name.clone())
            .collect()
    }

    #[test]
    fn test_new_session_is_idle() {
        let s = session(0);
        assert_eq!(s.state(), QueryState::Idle);
        assert_eq!(s.snapshot().generation, 0);
        assert!(s.state().results().is_none());
    }

    #[test]
    fn test_begin_enters_analyzing() {
        let s = session(0);
        let generation = s.begin();
        assert_eq!(generation, 1);
        assert!(s.state().is_analyzing());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let s = session(0);
        let first = s.begin();
        let second = s.begin();

        assert!(!s.complete(first, vec![]));
        assert_eq!(s.state(), QueryState::Analyzing);

        assert!(s.complete(second, vec![]));
        assert_eq!(s.state(), QueryState::Completed(vec![]));
    }

    #[test]
    fn test_empty_completion_differs_from_idle() {
        let s = session(0);
        let generation = s.begin();
        s.complete(generation, vec![]);
        let state = s.state();
        assert_ne!(state, QueryState::Idle);
        assert_eq!(state.results().map(|r| r.len()), Some(0));
        assert!(state.summary().starts_with("No materials found"));
    }

    #[test]
    fn test_summary_messages() {
        assert!(QueryState::Idle.summary().contains("Find Suitable Materials"));
        assert_eq!(QueryState::Analyzing.summary(), "Analyzing Materials...");
    }

    #[tokio::test]
    async fn test_run_completes_with_results() {
        let s = session(0);
        let outcome = s
            .run(RequirementSpec::new().with_strength(Strength::VeryHigh))
            .await
            .unwrap();
        assert!(outcome.applied);
        assert_eq!(outcome.generation, 1);
        assert_eq!(
            names(&outcome.state),
            vec!["Titanium Ti-6Al-4V", "Carbon Fiber Composite"]
        );
        assert_eq!(s.snapshot().generation, 1);
    }

    #[tokio::test]
    async fn test_run_with_no_matches_completes_empty() {
        let s = session(0);
        let outcome = s.run(RequirementSpec::new()).await.unwrap();
        assert_eq!(outcome.state, QueryState::Completed(vec![]));
    }

    #[tokio::test]
    async fn test_state_is_analyzing_while_pending() {
        let s = session(50);
        let submission = s.submit(RequirementSpec::new().with_application("marine"));
        assert!(s.state().is_analyzing());
        assert!(submission.finished().await.unwrap());
        assert_eq!(names(&s.state()).len(), 3);
    }

    #[tokio::test]
    async fn test_latest_submission_wins() {
        let s = session(20);
        let first = s.submit(RequirementSpec::new().with_application("aerospace"));
        let second = s.submit(RequirementSpec::new().with_application("medical"));

        assert!(!first.finished().await.unwrap());
        assert!(second.finished().await.unwrap());
        assert_eq!(names(&s.state()), vec!["Titanium Ti-6Al-4V", "PEEK"]);
    }

    #[tokio::test]
    async fn test_superseded_run_reports_not_applied() {
        let s = session(20);
        let (first, second) = tokio::join!(
            s.run(RequirementSpec::new().with_application("aerospace")),
            s.run(RequirementSpec::new().with_application("medical")),
        );
        let first = first.unwrap();
        let second = second.unwrap();

        assert_eq!((first.generation, second.generation), (1, 2));
        assert!(!first.applied);
        assert!(second.applied);
        assert_eq!(names(&second.state), vec!["Titanium Ti-6Al-4V", "PEEK"]);
    }

    #[tokio::test]
    async fn test_subscribers_observe_completion() {
        let s = session(10);
        let mut rx = s.subscribe();
        let submission = s.submit(RequirementSpec::new().require_recyclable(true));

        let snapshot = rx
            .wait_for(|snap| matches!(snap.state, QueryState::Completed(_)))
            .await
            .unwrap()
            .clone();
        assert_eq!(snapshot.generation, submission.generation);
        assert_eq!(snapshot.state.results().map(|r| r.len()), Some(5));
        submission.finished().await.unwrap();
    }

    #[tokio::test]
    async fn test_service_spawn_single_completion() {
        let service = AnalysisService::new(SelectionEngine::with_default_catalog(), Duration::ZERO);
        let pending = service.spawn(RequirementSpec::new().with_application("packaging"));
        let results = pending.wait().await.unwrap();
        let names: Vec<&str> = results.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["PLA (Bioplastic)", "Recycled PET"]);
    }
}
