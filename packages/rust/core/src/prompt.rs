//! Prompt construction: instruction template + context block + question.

/// The canonical refusal sentence.
///
/// Used verbatim in two places that must stay in sync: the prompt instructs
/// the model to emit it when the answer is not in context, and
/// [`crate::Engine`] returns it directly when retrieval finds nothing.
/// Downstream consumers can match on this one string to detect "no answer".
pub const REFUSAL: &str = "I cannot answer this question based on the provided documentation.";

/// Build the closed-book prompt for one question.
///
/// The prompt carries, in order: role framing, the strict context-only
/// rules (including the verbatim refusal phrase and the
/// reproduce-code-exactly rule), the literal context block, and the
/// literal user question. Pure string formatting — no I/O, no state.
pub fn build(context: &str, query: &str) -> String {
    format!(
        "You are a specialized technical support assistant for a documentation corpus.\n\
         Your task is to answer the user's question using ONLY the provided context snippets below.\n\
         \n\
         STRICT RULES:\n\
         1. Use ONLY the information present in the 'Context' section.\n\
         2. Do NOT use any prior knowledge, outside information, or training data.\n\
         3. If the answer is not explicitly found in the Context, you MUST reply exactly with: \"{REFUSAL}\"\n\
         4. Do not hallucinate or make up features that are not mentioned.\n\
         5. If providing code/config examples, use the exact format from the context.\n\
         \n\
         Context:\n\
         {context}\n\
         \n\
         User Question:\n\
         {query}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_contains_parts_in_order() {
        let context = "--- Source: commands.md ---\nUse mkdocs serve to preview.";
        let query = "How do I preview my site?";
        let prompt = build(context, query);

        let rules = prompt.find("STRICT RULES:").unwrap();
        let ctx = prompt.find(context).unwrap();
        let q = prompt.find(query).unwrap();
        assert!(rules < ctx, "constraints must precede the context");
        assert!(ctx < q, "context must precede the question");
    }

    #[test]
    fn prompt_embeds_refusal_phrase_verbatim() {
        let prompt = build("some context", "some question");
        assert!(prompt.contains(REFUSAL));
    }

    #[test]
    fn prompt_contains_exact_query_text() {
        let query = "What is `mkdocs build --strict`?";
        let prompt = build("ctx", query);
        assert!(prompt.contains(query));
    }

    #[test]
    fn build_is_idempotent() {
        assert_eq!(build("ctx", "q"), build("ctx", "q"));
    }
}
