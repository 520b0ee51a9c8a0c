mod client;
mod quiz_generator;

pub use client::{AiConfig, ChatClient};
pub use quiz_generator::{AiQuizGenerator, build_prompt, parse_quiz};
