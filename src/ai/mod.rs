//! AI persona comment drafting.
//!
//! Personas are operator-configured writing styles; the drafter turns a
//! post plus a persona into one discussion-starter comment via an
//! OpenAI-compatible chat-completions endpoint.

mod drafter;
mod openai;
mod persona;

pub use drafter::{CommentDrafter, DraftReport, draft_all};
pub use openai::{OpenAiCommentDrafter, OpenAiDrafterConfig};
pub use persona::{Persona, default_personas, load_personas};

#[cfg(test)]
pub use drafter::MockCommentDrafter;
