//! Context assembly: retrieved passages → one provenance-annotated block.

use askdocs_shared::RetrievedPassage;

/// Format retrieved passages into a single context block.
///
/// Each passage becomes a labeled block — a `--- Source: ... ---` header
/// (falling back to `Unknown File` when metadata lacks a source) followed
/// by the passage text verbatim — and blocks are joined with a blank line,
/// preserving retrieval order.
///
/// Pure and lossless: no truncation, deduplication, or re-ranking happens
/// here. Any such policy belongs to the search client.
pub fn assemble(passages: &[RetrievedPassage]) -> String {
    let parts: Vec<String> = passages
        .iter()
        .map(|p| format!("--- Source: {} ---\n{}", p.source(), p.text))
        .collect();

    parts.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use askdocs_shared::UNKNOWN_SOURCE;

    #[test]
    fn single_passage_block() {
        let passages = vec![RetrievedPassage::with_source(
            "Use mkdocs serve to preview.",
            "commands.md",
        )];
        assert_eq!(
            assemble(&passages),
            "--- Source: commands.md ---\nUse mkdocs serve to preview."
        );
    }

    #[test]
    fn preserves_order_and_joins_with_blank_line() {
        let passages = vec![
            RetrievedPassage::with_source("First passage.", "a.md"),
            RetrievedPassage::with_source("Second passage.", "b.md"),
            RetrievedPassage::with_source("Third passage.", "c.md"),
        ];
        let block = assemble(&passages);

        let a = block.find("First passage.").unwrap();
        let b = block.find("Second passage.").unwrap();
        let c = block.find("Third passage.").unwrap();
        assert!(a < b && b < c);

        assert_eq!(block.matches("\n\n").count(), 2);
    }

    #[test]
    fn every_passage_text_and_source_appears_verbatim() {
        let passages = vec![
            RetrievedPassage::with_source("Install with pip install mkdocs.", "install.md"),
            RetrievedPassage::with_source("Themes live under theme:.", "themes.md"),
        ];
        let block = assemble(&passages);
        for p in &passages {
            assert!(block.contains(&p.text));
            assert!(block.contains(&format!("--- Source: {} ---", p.source())));
        }
    }

    #[test]
    fn empty_metadata_uses_fallback_label() {
        let passages = vec![RetrievedPassage {
            text: "orphaned content".into(),
            metadata: serde_json::Map::new(),
        }];
        assert_eq!(
            assemble(&passages),
            format!("--- Source: {UNKNOWN_SOURCE} ---\norphaned content")
        );
    }

    #[test]
    fn assemble_is_idempotent() {
        let passages = vec![
            RetrievedPassage::with_source("same input", "x.md"),
            RetrievedPassage::with_source("same output", "y.md"),
        ];
        assert_eq!(assemble(&passages), assemble(&passages));
    }
}
