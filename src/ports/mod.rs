//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! triage core and the outside world. The collaborators themselves - the
//! vector-search backend, the LLM classifier, the ticket template engine and
//! the chat platforms - live outside this crate; adapters implement these
//! ports and the application layer consumes them.

mod channel;
mod classifier;
mod renderer;
mod retriever;

pub use channel::{ChannelError, ChannelSender, InboundMessage};
pub use classifier::{Classification, Classifier, ClassifierError, TicketCategory};
pub use renderer::{RenderError, TicketRenderer};
pub use retriever::{Passage, Retriever, RetrieverError};
