use std::sync::Arc;
use std::time::Duration;

use content_config::{IngestConfig, LlmConfig};
use content_dedup::DedupFilter;
use content_llm::{categories, LlmClient};
use content_store::{Difficulty, PgPool};
use futures::StreamExt;
use rand::seq::SliceRandom;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

use crate::state::{DaemonStatus, IngestStats, RunState};

const PROVIDER_NAME: &str = "openai";
const DIFFICULTY_LEVELS: &[&str] = &["easy", "medium", "hard"];

struct Inner {
    state: RunState,
    stats: IngestStats,
    task: Option<JoinHandle<()>>,
}

/// Orchestrates periodic trivia ingestion: fetch from the configured LLM,
/// drop anything the dedup filter has already seen, insert the rest.
/// Shared across the control surface and the background task via a single
/// mutex guarding all mutable state.
pub struct IngestionDaemon {
    pool: PgPool,
    dedup: Arc<DedupFilter>,
    llm: LlmClient,
    ingest_config: IngestConfig,
    llm_config: LlmConfig,
    inner: Arc<Mutex<Inner>>,
}

impl IngestionDaemon {
    pub fn new(pool: PgPool, ingest_config: IngestConfig, llm_config: LlmConfig) -> Self {
        Self {
            pool,
            dedup: Arc::new(DedupFilter::default()),
            llm: LlmClient::new(),
            ingest_config,
            llm_config,
            inner: Arc::new(Mutex::new(Inner { state: RunState::Stopped, stats: IngestStats::default(), task: None })),
        }
    }

    pub async fn status(&self) -> DaemonStatus {
        let inner = self.inner.lock().await;
        DaemonStatus { state: inner.state, stats: inner.stats.clone(), config: self.ingest_config.clone() }
    }

    /// Start the cycle loop. Returns an explanatory message instead of an
    /// error since the control surface reports outcomes as plain text.
    pub async fn start(self: &Arc<Self>) -> String {
        let mut inner = self.inner.lock().await;
        if inner.state == RunState::Running {
            return "already running".to_string();
        }
        if self.llm_config.openai_api_key.is_empty() && self.llm_config.anthropic_api_key.is_empty() {
            return "no LLM API key configured".to_string();
        }

        let existing = content_store::existing_trivia_signatures(&self.pool, 10_000).await.unwrap_or_default();
        let warmed = self.dedup.warm(existing);
        info!(warmed, "dedup cache warmed from existing cards");

        inner.state = RunState::Running;
        inner.stats.start_time = Some(chrono::Utc::now());

        let daemon = Arc::clone(self);
        inner.task = Some(tokio::spawn(async move { daemon.run_loop().await }));
        "started".to_string()
    }

    pub async fn stop(&self) -> String {
        let mut inner = self.inner.lock().await;
        if inner.state == RunState::Stopped {
            return "already stopped".to_string();
        }
        inner.state = RunState::Stopped;
        if let Some(task) = inner.task.take() {
            task.abort();
        }
        "stopped".to_string()
    }

    pub async fn pause(&self) -> String {
        let mut inner = self.inner.lock().await;
        if inner.state != RunState::Running {
            return format!("cannot pause from state={:?}", inner.state);
        }
        inner.state = RunState::Paused;
        "paused".to_string()
    }

    pub async fn resume(&self) -> String {
        let mut inner = self.inner.lock().await;
        if inner.state != RunState::Paused {
            return format!("cannot resume from state={:?}", inner.state);
        }
        inner.state = RunState::Running;
        "running".to_string()
    }

    pub async fn runs(&self, limit: i64) -> content_store::Result<Vec<content_store::SourceRun>> {
        content_store::list_runs(&self.pool, limit).await
    }

    pub async fn providers(&self) -> content_store::Result<Vec<content_store::SourceProvider>> {
        content_store::list_providers(&self.pool).await
    }

    async fn run_loop(self: Arc<Self>) {
        loop {
            if self.current_state().await != RunState::Running {
                break;
            }

            if let Err(err) = self.run_cycle().await {
                error!(?err, "ingestion cycle failed");
                let mut inner = self.inner.lock().await;
                inner.stats.errors += 1;
            } else {
                let mut inner = self.inner.lock().await;
                inner.stats.cycles_completed += 1;
            }

            // Sleep in 1-second increments so stop/pause takes effect promptly.
            for _ in 0..self.ingest_config.cycle_seconds {
                if self.current_state().await != RunState::Running {
                    break;
                }
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            while self.current_state().await == RunState::Paused {
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            if self.current_state().await == RunState::Stopped {
                break;
            }
        }
    }

    async fn current_state(&self) -> RunState {
        self.inner.lock().await.state
    }

    async fn run_cycle(&self) -> anyhow::Result<()> {
        let provider_id = content_store::ensure_provider(&self.pool, PROVIDER_NAME).await?;
        let run_id = content_store::create_run(&self.pool, provider_id).await?;

        let mut fetched = 0i32;
        let mut added = 0i32;
        let mut skipped = 0i32;
        let mut error_msg: Option<String> = None;

        match self.fetch_batches().await {
            Ok(candidates) => {
                fetched = candidates.len() as i32;
                {
                    let mut inner = self.inner.lock().await;
                    inner.stats.total_fetched += fetched as u64;
                }

                for candidate in candidates {
                    if self.current_state().await != RunState::Running {
                        break;
                    }

                    let correct = candidate.correct_answer().to_string();
                    if self.dedup.is_duplicate(&candidate.question, &correct) {
                        skipped += 1;
                        let mut inner = self.inner.lock().await;
                        inner.stats.duplicates_skipped += 1;
                        continue;
                    }

                    match self.insert_candidate(&candidate, provider_id).await {
                        Ok(card_id) => {
                            self.dedup.register(&candidate.question, &correct, card_id);
                            added += 1;
                            let mut inner = self.inner.lock().await;
                            inner.stats.items_added += 1;
                        }
                        Err(err) => {
                            error!(?err, "failed to insert ingested card");
                            let mut inner = self.inner.lock().await;
                            inner.stats.errors += 1;
                        }
                    }
                }
            }
            Err(err) => {
                error_msg = Some(err.to_string());
                error!(?err, "cycle fetch failed");
                let mut inner = self.inner.lock().await;
                inner.stats.errors += 1;
            }
        }

        content_store::finish_run(&self.pool, run_id, fetched, added, skipped, error_msg.as_deref()).await?;
        info!(fetched, added, skipped, error = ?error_msg, "ingestion cycle complete");
        Ok(())
    }

    /// Pick up to `concurrent_batches` categories at random (without
    /// replacement) and one random difficulty per category, then fan out
    /// one LLM call per pick.
    async fn fetch_batches(&self) -> anyhow::Result<Vec<content_llm::TriviaCandidate>> {
        let mut categories = categories::canonical_categories();
        categories.shuffle(&mut rand::thread_rng());
        let picks = self.ingest_config.concurrent_batches.min(categories.len());

        let jobs: Vec<(&str, &str)> = categories[..picks]
            .iter()
            .map(|&category| {
                let difficulty = *DIFFICULTY_LEVELS.choose(&mut rand::thread_rng()).expect("DIFFICULTY_LEVELS is non-empty");
                (category, difficulty)
            })
            .collect();

        let api_key = if self.llm_config.uses_anthropic() { &self.llm_config.anthropic_api_key } else { &self.llm_config.openai_api_key };
        let model = self.llm_config.chat_model.clone();
        let batch_size = self.ingest_config.batch_size;

        let api_key = api_key.to_string();
        let llm = self.llm.clone();
        let mut futs: Vec<std::pin::Pin<Box<dyn std::future::Future<Output = Vec<content_llm::TriviaCandidate>> + Send>>> = Vec::with_capacity(jobs.len());
        for (category, difficulty) in jobs {
            futs.push(Box::pin(generate_one_batch(llm.clone(), api_key.clone(), model.clone(), category, difficulty, batch_size)));
        }
        let results = futures::stream::iter(futs)
            .buffer_unordered(self.ingest_config.concurrent_batches)
            .collect::<Vec<_>>()
            .await;

        Ok(results.into_iter().flatten().collect())
    }

    async fn insert_candidate(&self, candidate: &content_llm::TriviaCandidate, source_id: Uuid) -> content_store::Result<Uuid> {
        let pic = categories::symbol_for(&candidate.category);
        let deck_id = content_store::ensure_category_deck(&self.pool, &candidate.category, pic).await?;

        let properties = serde_json::json!({
            "choices": candidate.choices,
            "correct_index": candidate.correct_index,
            "explanation": candidate.explanation,
            "hint": candidate.hint,
            "aisource": "openai",
        });
        let difficulty = match candidate.difficulty.as_str() {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Medium,
        };

        let card = content_store::insert_ingested_card(&self.pool, deck_id, &candidate.question, properties, difficulty, source_id).await?;
        Ok(card.id)
    }
}

async fn generate_one_batch(
    llm: LlmClient,
    api_key: String,
    model: String,
    category: &str,
    difficulty: &str,
    batch_size: usize,
) -> Vec<content_llm::TriviaCandidate> {
    llm.generate_batch(&api_key, &model, category, difficulty, batch_size).await
}
