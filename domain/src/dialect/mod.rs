//! Dialect translation between the chat platform and the completion provider.
//!
//! The chat platform speaks a lightweight markup (`*bold*`, `_italic_`,
//! `~strike~`) and escapes `<`, `>` and `&` as HTML entities. The completion
//! provider speaks Markdown and sometimes decorates its output with artifacts
//! the platform would render literally.
//!
//! - [`to_internal`]: platform text → provider text
//! - [`to_external`]: provider text → platform text
//! - [`markup`]: the markup conversions both directions rely on

pub mod markup;
mod translator;

pub use markup::{chat_to_provider, provider_to_chat};
pub use translator::{FENCE_LANGUAGES, to_external, to_internal, unescape_entities};
