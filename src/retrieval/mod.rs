// Note retrieval — embedding nearest-neighbour with keyword fallback
//
// The index probes its embedding backend once at build time and binds a
// strategy for the whole session. An embedding hit below the similarity
// floor falls through to substring keyword matching; a task name nothing
// matches always yields the fixed NO_NOTE_FOUND reply.

pub mod embedding;
pub mod ingest;

use tracing::{debug, warn};

use crate::config::constants::{DEFAULT_SIMILARITY_FLOOR, NO_NOTE_FOUND};
use crate::config::RetrievalSettings;
use crate::logging::{SessionEvent, SessionLogger};
use embedding::{cosine_similarity, EmbeddingEngine, HashEmbedding};

/// One retrievable note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEntry {
    /// Lowercase keyword for substring matching
    pub keyword: String,
    /// Note text returned to the executor verbatim
    pub text: String,
}

impl NoteEntry {
    pub fn new(keyword: &str, text: &str) -> Self {
        Self {
            keyword: keyword.trim().to_lowercase(),
            text: text.to_string(),
        }
    }
}

/// Built-in study notes, available without any corpus ingestion
pub fn builtin_notes() -> Vec<NoteEntry> {
    vec![
        NoteEntry::new(
            "machine learning",
            "Machine learning is the study of algorithms that improve from experience.",
        ),
        NoteEntry::new(
            "compiler design",
            "A compiler translates source code into executable machine code.",
        ),
        NoteEntry::new(
            "networking",
            "Computer networks enable devices to communicate and share resources.",
        ),
        NoteEntry::new(
            "data structures",
            "Common data structures include arrays, linked lists, stacks, and queues.",
        ),
    ]
}

/// Which lookup strategy the index bound at build time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Embedding,
    Keyword,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Embedding => "embedding",
            Strategy::Keyword => "keyword",
        }
    }
}

/// Session-scoped note index
pub struct NoteIndex {
    entries: Vec<NoteEntry>,
    vectors: Vec<Vec<f32>>,
    engine: Option<HashEmbedding>,
    floor: f32,
}

impl NoteIndex {
    /// Build an index over `entries`, probing the embedding backend once.
    ///
    /// A failed probe (or `use_embeddings = false`) binds the keyword
    /// strategy instead; retrieval keeps working either way.
    pub fn build(entries: Vec<NoteEntry>, use_embeddings: bool, floor: f32) -> Self {
        if !use_embeddings {
            debug!("embeddings disabled, binding keyword strategy");
            return Self {
                entries,
                vectors: Vec::new(),
                engine: None,
                floor,
            };
        }

        let engine = HashEmbedding::new();
        match embed_entries(&engine, &entries) {
            Ok(vectors) => {
                debug!(entries = entries.len(), "bound embedding strategy");
                Self {
                    entries,
                    vectors,
                    engine: Some(engine),
                    floor,
                }
            }
            Err(err) => {
                warn!(error = %err, "embedding probe failed, using keyword matching");
                Self {
                    entries,
                    vectors: Vec::new(),
                    engine: None,
                    floor,
                }
            }
        }
    }

    /// Built-in notes, embeddings on, default floor
    pub fn with_defaults() -> Self {
        Self::build(builtin_notes(), true, DEFAULT_SIMILARITY_FLOOR)
    }

    pub fn strategy(&self) -> Strategy {
        if self.engine.is_some() {
            Strategy::Embedding
        } else {
            Strategy::Keyword
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry after build (corpus ingestion)
    ///
    /// The bound strategy is kept; if the new entry cannot be embedded
    /// the whole index degrades to keyword matching.
    pub fn push(&mut self, entry: NoteEntry) {
        if let Some(engine) = &self.engine {
            match engine.embed(&embeddable_text(&entry)) {
                Ok(vector) => self.vectors.push(vector),
                Err(err) => {
                    warn!(error = %err, "could not embed new entry, degrading to keyword matching");
                    self.engine = None;
                    self.vectors.clear();
                }
            }
        }
        self.entries.push(entry);
    }

    /// Extend with many entries (one document's chunks)
    pub fn extend(&mut self, entries: Vec<NoteEntry>) {
        for entry in entries {
            self.push(entry);
        }
    }

    /// Resolve one task name to a note text
    pub fn retrieve(&self, task_name: &str) -> String {
        if let Some(hit) = self.embedding_lookup(task_name) {
            return hit;
        }
        if let Some(hit) = self.keyword_lookup(task_name) {
            return hit;
        }
        NO_NOTE_FOUND.to_string()
    }

    fn embedding_lookup(&self, task_name: &str) -> Option<String> {
        let engine = self.engine.as_ref()?;
        let query = engine.embed(task_name).ok()?;

        let mut best: Option<(usize, f32)> = None;
        for (idx, vector) in self.vectors.iter().enumerate() {
            let sim = cosine_similarity(&query, vector);
            if best.map_or(true, |(_, top)| sim > top) {
                best = Some((idx, sim));
            }
        }

        let (idx, sim) = best?;
        if sim < self.floor {
            debug!(
                task = task_name,
                similarity = sim,
                floor = self.floor,
                "best embedding match under floor, trying keywords"
            );
            return None;
        }
        Some(self.entries[idx].text.clone())
    }

    // First entry whose keyword appears inside the lowercased task name
    fn keyword_lookup(&self, task_name: &str) -> Option<String> {
        let needle = task_name.to_lowercase();
        self.entries
            .iter()
            .find(|e| !e.keyword.is_empty() && needle.contains(&e.keyword))
            .map(|e| e.text.clone())
    }
}

/// Build the session's note index: built-in notes plus the configured
/// corpus, with the bound strategy logged once.
///
/// Ingestion failures degrade to the built-in notes; they never abort
/// the session.
pub fn session_index(settings: &RetrievalSettings, logger: Option<&SessionLogger>) -> NoteIndex {
    let mut index = NoteIndex::build(
        builtin_notes(),
        settings.embeddings,
        settings.similarity_floor,
    );

    if let Some(path) = &settings.corpus_path {
        match ingest::load_path(path) {
            Ok(entries) if !entries.is_empty() => {
                let chunks = entries.len();
                index.extend(entries);
                if let Some(l) = logger {
                    let _ = l.log(SessionEvent::CorpusIngested {
                        source: path.display().to_string(),
                        chunks,
                    });
                }
            }
            Ok(_) => warn!(path = %path.display(), "corpus path held no ingestable text"),
            Err(err) => {
                warn!(error = %err, "corpus ingestion failed, continuing with built-in notes")
            }
        }
    }

    if let Some(l) = logger {
        let _ = l.log(SessionEvent::RetrievalBound {
            strategy: index.strategy().as_str().to_string(),
        });
    }
    index
}

fn embed_entries(engine: &HashEmbedding, entries: &[NoteEntry]) -> anyhow::Result<Vec<Vec<f32>>> {
    entries
        .iter()
        .map(|e| engine.embed(&embeddable_text(e)))
        .collect()
}

// Keyword plus text: short keyword-only entries still carry signal
fn embeddable_text(entry: &NoteEntry) -> String {
    format!("{} {}", entry.keyword, entry.text)
}
