use async_trait::async_trait;
use serde::Deserialize;
use std::fmt::Write as _;

use coach_core::model::{CareerProfile, QUIZ_LENGTH, Question, Quiz};

use crate::ai::ChatClient;
use crate::error::GenerationError;
use crate::quiz::QuizGenerator;

const TEMPERATURE: f32 = 0.7;

/// Generates interview quizzes through the chat completions client.
#[derive(Clone)]
pub struct AiQuizGenerator {
    chat: ChatClient,
    profile: Option<CareerProfile>,
    question_count: usize,
}

impl AiQuizGenerator {
    #[must_use]
    pub fn new(chat: ChatClient, profile: Option<CareerProfile>) -> Self {
        Self {
            chat,
            profile,
            question_count: QUIZ_LENGTH,
        }
    }

    #[must_use]
    pub fn profile(&self) -> Option<&CareerProfile> {
        self.profile.as_ref()
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.chat.enabled()
    }
}

#[async_trait]
impl QuizGenerator for AiQuizGenerator {
    async fn generate_quiz(&self) -> Result<Quiz, GenerationError> {
        let prompt = build_prompt(self.profile.as_ref(), self.question_count);
        let raw = self.chat.complete(&prompt, TEMPERATURE).await?;
        parse_quiz(&raw, self.question_count)
    }
}

/// Instruction sent to the model. Falls back to general interview questions
/// when no profile is configured.
#[must_use]
pub fn build_prompt(profile: Option<&CareerProfile>, count: usize) -> String {
    let mut prompt = String::new();
    match profile {
        Some(profile) => {
            let _ = write!(
                prompt,
                "Generate {count} technical interview questions for a {} professional",
                profile.industry()
            );
            if !profile.skills().is_empty() {
                let _ = write!(
                    prompt,
                    " with expertise in {}",
                    profile.skills().join(", ")
                );
            }
            prompt.push_str(".\n\n");
        }
        None => {
            let _ = write!(
                prompt,
                "Generate {count} general professional interview questions.\n\n"
            );
        }
    }
    prompt.push_str(
        "Each question should be multiple choice with 4 options.\n\n\
         Return the response in this JSON format only, no additional text:\n\
         {\n  \"questions\": [\n    {\n      \"question\": \"string\",\n      \
         \"options\": [\"string\", \"string\", \"string\", \"string\"],\n      \
         \"correctAnswer\": \"string\",\n      \"explanation\": \"string\"\n    }\n  ]\n}\n",
    );
    prompt
}

#[derive(Debug, Deserialize)]
struct QuizPayload {
    questions: Vec<QuestionPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionPayload {
    question: String,
    options: Vec<String>,
    correct_answer: String,
    #[serde(default)]
    explanation: String,
}

/// Parse a model reply into a validated quiz.
///
/// Tolerates prose or Markdown fences around the JSON object.
///
/// # Errors
///
/// Returns `GenerationError` when the JSON is malformed, a question fails
/// validation, or the question count is not `expected`.
pub fn parse_quiz(raw: &str, expected: usize) -> Result<Quiz, GenerationError> {
    let payload: QuizPayload = serde_json::from_str(json_object(raw))?;

    if payload.questions.len() != expected {
        return Err(GenerationError::UnexpectedQuestionCount {
            expected,
            actual: payload.questions.len(),
        });
    }

    let questions = payload
        .questions
        .into_iter()
        .enumerate()
        .map(|(index, q)| {
            Question::new(q.question, q.options, q.correct_answer, q.explanation)
                .map_err(|source| GenerationError::InvalidQuestion { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Quiz::new(questions)?)
}

fn json_object(raw: &str) -> &str {
    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if end > start => &raw[start..=end],
        _ => raw.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(count: usize) -> String {
        let questions: Vec<String> = (0..count)
            .map(|i| {
                format!(
                    r#"{{"question":"Q{i}?","options":["a","b","c","d"],"correctAnswer":"b","explanation":"because"}}"#
                )
            })
            .collect();
        format!(r#"{{"questions":[{}]}}"#, questions.join(","))
    }

    #[test]
    fn prompt_mentions_industry_and_skills() {
        let profile = CareerProfile::from_csv("Fintech", "rust, sql").unwrap();
        let prompt = build_prompt(Some(&profile), 10);
        assert!(prompt.contains("Generate 10 technical interview questions for a Fintech"));
        assert!(prompt.contains("expertise in rust, sql"));
        assert!(prompt.contains("\"correctAnswer\""));
    }

    #[test]
    fn prompt_without_profile_is_general() {
        let prompt = build_prompt(None, 10);
        assert!(prompt.starts_with("Generate 10 general professional interview questions."));
    }

    #[test]
    fn parses_plain_reply() {
        let quiz = parse_quiz(&reply(3), 3).unwrap();
        assert_eq!(quiz.len(), 3);
        assert_eq!(quiz.questions()[0].correct_answer(), "b");
        assert_eq!(quiz.questions()[2].prompt(), "Q2?");
    }

    #[test]
    fn parses_fenced_reply() {
        let raw = format!("```json\n{}\n```", reply(2));
        assert_eq!(parse_quiz(&raw, 2).unwrap().len(), 2);
    }

    #[test]
    fn each_parse_yields_a_fresh_quiz_id() {
        let a = parse_quiz(&reply(1), 1).unwrap();
        let b = parse_quiz(&reply(1), 1).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn wrong_question_count_is_rejected() {
        let err = parse_quiz(&reply(9), 10).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::UnexpectedQuestionCount {
                expected: 10,
                actual: 9
            }
        ));
    }

    #[test]
    fn answer_outside_options_is_rejected() {
        let raw = r#"{"questions":[{"question":"Q","options":["a","b"],"correctAnswer":"z"}]}"#;
        let err = parse_quiz(raw, 1).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::InvalidQuestion { index: 0, .. }
        ));
    }

    #[test]
    fn garbage_is_malformed() {
        let err = parse_quiz("sorry, I can't do that", 10).unwrap_err();
        assert!(matches!(err, GenerationError::Malformed(_)));
    }
}
