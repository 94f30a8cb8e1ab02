//! Service modules for the quest matcher

pub mod matcher;
pub mod openai_client;
pub mod prompt_builder;

pub use matcher::{MatchError, Matcher, MAX_IMAGE_BYTES};
pub use openai_client::OpenAiClient;
pub use prompt_builder::build_system_instruction;
