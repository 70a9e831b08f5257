//! Model invocation boundary
//!
//! Every role node talks to the model through the same narrow interface:
//! send an ordered conversation, receive one text reply. The five roles
//! differ only in the fixed system instruction they prepend, not in the
//! provider they call.

pub mod openai;
pub mod provider;

pub use openai::OpenAIProvider;
pub use provider::{build_provider, LLMProvider, LLMResponse, UnavailableProvider};
