use log::debug;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::core::model::AnalysisResult;

pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

pub trait ResultStore {
    fn insert(&mut self, result: AnalysisResult) -> String;
    fn get(&self, id: &str) -> Option<&AnalysisResult>;
}

struct Entry {
    result: AnalysisResult,
    stored_at: Instant,
}

pub struct MemoryStore {
    entries: HashMap<String, Entry>,
    ttl: Duration,
}

impl MemoryStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_expired(&mut self) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl ResultStore for MemoryStore {
    fn insert(&mut self, result: AnalysisResult) -> String {
        self.evict_expired();
        let id = format!("{:032x}", rand::random::<u128>());
        debug!("storing result {id}");
        self.entries.insert(
            id.clone(),
            Entry {
                result,
                stored_at: Instant::now(),
            },
        );
        id
    }

    fn get(&self, id: &str) -> Option<&AnalysisResult> {
        let entry = self.entries.get(id)?;
        if entry.stored_at.elapsed() >= self.ttl {
            return None;
        }
        Some(&entry.result)
    }
}
