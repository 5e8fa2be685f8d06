//! Two-stage signature + similarity deduplication for generated trivia.
//!
//! Stage 1 is an O(1) exact-signature lookup. Stage 2 falls back to Jaccard
//! similarity over the most recent `check_limit` normalised questions. State
//! lives entirely in process memory behind a single mutex — a restart always
//! warms back up from the store via [`DedupFilter::warm`].

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use uuid::Uuid;

const DEFAULT_JACCARD_THRESHOLD: f64 = 0.85;
const DEFAULT_MAX_CACHE: usize = 10_000;
const DEFAULT_CHECK_LIMIT: usize = 1_000;

fn normalize(text: &str) -> String {
    text.to_lowercase()
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}

fn signature(question: &str, correct_answer: &str) -> String {
    format!("{}|{}", normalize(question), normalize(correct_answer))
}

fn jaccard(a: &str, b: &str) -> f64 {
    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();
    if words_a.is_empty() && words_b.is_empty() {
        return 0.0;
    }
    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();
    intersection as f64 / union as f64
}

/// Snapshot of cache occupancy, exposed for the control surface / metrics seam.
#[derive(Debug, Clone, Copy, Default)]
pub struct DedupStats {
    pub signature_count: usize,
    pub text_count: usize,
}

struct Inner {
    signatures: HashMap<String, Uuid>,
    sig_order: VecDeque<String>,
    texts: VecDeque<(Uuid, String)>,
}

/// In-process duplicate detector, shared across a single ingestion daemon.
pub struct DedupFilter {
    jaccard_threshold: f64,
    max_cache: usize,
    check_limit: usize,
    inner: Mutex<Inner>,
}

impl Default for DedupFilter {
    fn default() -> Self {
        Self::new(DEFAULT_JACCARD_THRESHOLD, DEFAULT_MAX_CACHE, DEFAULT_CHECK_LIMIT)
    }
}

impl DedupFilter {
    pub fn new(jaccard_threshold: f64, max_cache: usize, check_limit: usize) -> Self {
        Self {
            jaccard_threshold,
            max_cache,
            check_limit,
            inner: Mutex::new(Inner {
                signatures: HashMap::new(),
                sig_order: VecDeque::new(),
                texts: VecDeque::new(),
            }),
        }
    }

    /// True if `question`/`correct_answer` duplicates prior registered content.
    pub fn is_duplicate(&self, question: &str, correct_answer: &str) -> bool {
        let sig = signature(question, correct_answer);
        let inner = self.inner.lock().expect("dedup mutex poisoned");

        if inner.signatures.contains_key(&sig) {
            return true;
        }

        let norm_question = normalize(question);
        let recent = inner.texts.iter().rev().take(self.check_limit);
        recent.map(|(_, text)| jaccard(&norm_question, text)).any(|score| score >= self.jaccard_threshold)
    }

    /// Register `question`/`correct_answer` as seen, owned by `card_id`.
    pub fn register(&self, question: &str, correct_answer: &str, card_id: Uuid) {
        let sig = signature(question, correct_answer);
        let mut inner = self.inner.lock().expect("dedup mutex poisoned");

        if inner.signatures.contains_key(&sig) {
            return;
        }

        inner.signatures.insert(sig.clone(), card_id);
        inner.sig_order.push_back(sig);
        inner.texts.push_back((card_id, normalize(question)));
        self.evict_if_needed(&mut inner);
    }

    fn evict_if_needed(&self, inner: &mut Inner) {
        if inner.signatures.len() <= self.max_cache {
            return;
        }
        let evict_count = self.max_cache / 4;
        for _ in 0..evict_count {
            if let Some(old_sig) = inner.sig_order.pop_front() {
                inner.signatures.remove(&old_sig);
            }
            inner.texts.pop_front();
        }
        tracing::debug!(evict_count, "evicted dedup cache entries");
    }

    /// Warm the cache from `existing` trivia rows (question, correct_answer, id),
    /// newest first, up to the cache ceiling. Returns the count loaded.
    pub fn warm<I>(&self, existing: I) -> usize
    where
        I: IntoIterator<Item = (Uuid, String, String)>,
    {
        let mut loaded = 0;
        for (card_id, question, correct_answer) in existing.into_iter().take(self.max_cache) {
            self.register(&question, &correct_answer, card_id);
            loaded += 1;
        }
        tracing::info!(loaded, "warmed dedup cache from store");
        loaded
    }

    pub fn stats(&self) -> DedupStats {
        let inner = self.inner.lock().expect("dedup mutex poisoned");
        DedupStats {
            signature_count: inner.signatures.len(),
            text_count: inner.texts.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_then_is_duplicate_is_idempotent() {
        let filter = DedupFilter::default();
        let id = Uuid::new_v4();
        filter.register("What is the capital of France?", "Paris", id);
        assert!(filter.is_duplicate("What is the capital of France?", "Paris"));
    }

    #[test]
    fn similarity_catches_punctuation_and_case_variants() {
        let filter = DedupFilter::default();
        filter.register("What is the capital of France", "Paris", Uuid::new_v4());
        assert!(filter.is_duplicate("What IS the capital of France?", "Paris"));
    }

    #[test]
    fn distinct_questions_are_not_duplicates() {
        let filter = DedupFilter::default();
        filter.register("What is the capital of France?", "Paris", Uuid::new_v4());
        assert!(!filter.is_duplicate("What is the tallest mountain on Earth?", "Everest"));
    }

    #[test]
    fn eviction_keeps_cache_bounded_and_keeps_recent_entries() {
        let filter = DedupFilter::new(0.85, 40, 1000);
        let mut last_ids = Vec::new();
        for i in 0..120 {
            let id = Uuid::new_v4();
            filter.register(&format!("unique question number {i}"), &format!("answer {i}"), id);
            if i >= 90 {
                last_ids.push((i, id));
            }
        }
        let stats = filter.stats();
        assert!(stats.signature_count <= 40);
        for (i, _) in &last_ids {
            assert!(filter.is_duplicate(&format!("unique question number {i}"), &format!("answer {i}")));
        }
    }

    #[test]
    fn same_question_twice_in_one_cycle_adds_once_and_skips_once() {
        let filter = DedupFilter::default();
        let candidates = [
            ("What is the capital of France?", "Paris"),
            ("What is the capital of France?", "Paris"),
        ];

        let mut added = 0;
        let mut skipped = 0;
        for (question, answer) in candidates {
            if filter.is_duplicate(question, answer) {
                skipped += 1;
            } else {
                filter.register(question, answer, Uuid::new_v4());
                added += 1;
            }
        }

        assert_eq!(added, 1);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn warm_loads_up_to_cache_ceiling() {
        let filter = DedupFilter::new(0.85, 5, 1000);
        let rows = (0..10).map(|i| (Uuid::new_v4(), format!("q{i}"), format!("a{i}")));
        let loaded = filter.warm(rows);
        assert_eq!(loaded, 5);
    }
}
