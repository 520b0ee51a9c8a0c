use dioxus::prelude::*;
use dioxus_router::Link;

use coach_core::model::QuizResultId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuestionReviewVm, ResultDetailVm};

#[component]
pub fn ResultView(result_id: i64) -> Element {
    let ctx = use_context::<AppContext>();
    let results = ctx.quiz_results();

    let resource = use_resource(move || {
        let results = results.clone();
        async move {
            let result = results
                .get_result(QuizResultId::new(result_id))
                .await
                .map_err(|err| {
                    if err.is_not_found() {
                        ViewError::NotFound
                    } else {
                        ViewError::Unknown
                    }
                })?;
            Ok::<_, ViewError>(ResultDetailVm::from(&result))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            Link { class: "back-link", to: Route::History {}, "Back to history" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(detail) => rsx! {
                    QuizResultPanel { detail }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}

/// Score summary plus per-question review, shared by the quiz and history pages.
#[component]
pub fn QuizResultPanel(detail: ResultDetailVm) -> Element {
    rsx! {
        section { class: "result",
            h2 { "Quiz Results" }
            div { class: "score",
                span { class: "score-value", "{detail.score_label}" }
                div { class: "progress",
                    div { class: "progress-fill", style: "width: {detail.score_percent:.0}%" }
                }
                p { "{detail.correct} of {detail.total} correct" }
                p { class: "verdict", "{detail.verdict}" }
                p { class: "meta", "Completed {detail.completed_at_str} in {detail.duration_label}" }
            }

            h3 { "Question Review" }
            ol { class: "review",
                for question in detail.questions {
                    QuestionReview { key: "{question.number}", question }
                }
            }
        }
    }
}

#[component]
fn QuestionReview(question: QuestionReviewVm) -> Element {
    let class = if question.is_correct {
        "review-item correct"
    } else {
        "review-item incorrect"
    };
    rsx! {
        li { class,
            p { class: "review-question", "{question.number}. {question.question}" }
            p { "Your answer: {question.user_answer}" }
            if !question.is_correct {
                p { "Correct answer: {question.correct_answer}" }
            }
            if !question.explanation.is_empty() {
                p { class: "explanation", "{question.explanation}" }
            }
        }
    }
}
