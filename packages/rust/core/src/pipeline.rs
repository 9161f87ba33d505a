//! The RAG orchestrator: retrieval → refusal short-circuit → generation.

use tracing::{debug, info, instrument};

use askdocs_shared::{AskdocsError, GenerationClient, Result, SearchClient};

use crate::context;
use crate::prompt;

/// The pipeline controller.
///
/// Owns the two injected clients and the passage limit; holds no other
/// state, so one engine can serve any number of sequential questions.
/// Per question: search the index, return [`prompt::REFUSAL`] if nothing
/// comes back (the model is never asked to answer with no context),
/// otherwise assemble the context, build the closed-book prompt, and
/// return the model's output verbatim.
///
/// Known limitation: the engine trusts the model to obey the closed-book
/// instruction. It cannot detect an answer drawn from outside the supplied
/// context, nor verify that the model emits the refusal phrase when it
/// should.
pub struct Engine<S, G> {
    search: S,
    generation: G,
    passage_limit: usize,
}

impl<S: SearchClient, G: GenerationClient> Engine<S, G> {
    /// Create an engine from its collaborators.
    ///
    /// `passage_limit` is how many passages to retrieve per question;
    /// zero is rejected (it would refuse every question).
    pub fn new(search: S, generation: G, passage_limit: usize) -> Result<Self> {
        if passage_limit == 0 {
            return Err(AskdocsError::validation("passage_limit must be positive"));
        }
        Ok(Self {
            search,
            generation,
            passage_limit,
        })
    }

    /// Answer one question from the documentation corpus.
    ///
    /// Always yields a string on success — "no answer" is represented as
    /// the refusal sentence, not as an error. Retrieval and generation
    /// failures propagate as their respective error variants and are
    /// distinguishable from the no-context refusal.
    #[instrument(skip_all, fields(query_len = query.len()))]
    pub async fn answer(&self, query: &str) -> Result<String> {
        debug!(limit = self.passage_limit, "searching documentation");
        let passages = self.search.search(query, self.passage_limit).await?;

        if passages.is_empty() {
            info!("no passages retrieved, refusing");
            return Ok(prompt::REFUSAL.to_string());
        }

        info!(passages = passages.len(), "retrieved context");
        let context_block = context::assemble(&passages);
        let prompt_text = prompt::build(&context_block, query);

        debug!(prompt_len = prompt_text.len(), "generating answer");
        self.generation.generate(&prompt_text).await
    }
}
