//! The askdocs RAG pipeline core.
//!
//! Pure context assembly and prompt construction, plus the [`Engine`]
//! orchestrator that drives retrieval → refusal/generation. Network
//! clients are injected via the trait seams in `askdocs-shared`; this
//! crate does no I/O of its own.

pub mod context;
pub mod pipeline;
pub mod prompt;

pub use context::assemble;
pub use pipeline::Engine;
pub use prompt::{REFUSAL, build};
