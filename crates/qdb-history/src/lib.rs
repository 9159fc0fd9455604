//! Conversation extraction over a `.qdb` container.
//!
//! [`History`] is the core: it lists participants and assembles a
//! participant's decoded, date-ordered messages. Presentation layers talk to
//! it through [`ConversationSource`] and keep the currently displayed
//! conversation in a [`Session`].

pub mod assembler;
pub mod directory;
pub mod session;
pub mod source;

pub use assembler::{DEFAULT_ME_LABEL, History};
pub use session::Session;
pub use source::ConversationSource;
