use dioxus::prelude::*;
use tracing::warn;

use crate::context::AppContext;
use crate::views::{QuizResultPanel, ViewError};
use crate::vm::{
    NextStep, OptionVm, QuestionVm, QuizIntent, QuizPhase, QuizVm, ResultDetailVm,
    map_session_error,
};

const COMPLETED_NOTICE: &str = "Quiz Completed!";

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let sessions = ctx.quiz_sessions();

    let vm = use_signal(QuizVm::new);
    let error = use_signal(|| None::<ViewError>);
    let notice = use_signal(|| None::<&'static str>);
    let generating = use_signal(|| false);
    let last_intent = use_signal(|| None::<QuizIntent>);

    let start_quiz = {
        let sessions = sessions.clone();
        use_callback(move |()| {
            let mut vm = vm;
            let mut error = error;
            let mut notice = notice;
            let mut generating = generating;
            if generating() || vm.read().phase() == QuizPhase::Submitting {
                return;
            }
            generating.set(true);
            error.set(None);
            notice.set(None);

            let sessions = sessions.clone();
            spawn(async move {
                match sessions.generate().await {
                    Ok(quiz) => {
                        vm.write().begin(quiz, sessions.clock().now());
                    }
                    Err(err) => {
                        error.set(Some(map_session_error(err)));
                    }
                }
                generating.set(false);
            });
        })
    };

    let dispatch = {
        let sessions = sessions.clone();
        use_callback(move |intent: QuizIntent| {
            let mut vm = vm;
            let mut error = error;
            let mut notice = notice;
            let mut last_intent = last_intent;
            last_intent.set(Some(intent.clone()));

            match intent {
                QuizIntent::Start => start_quiz.call(()),
                QuizIntent::Restart => {
                    let cleared = vm.write().restart();
                    match cleared {
                        Ok(()) => start_quiz.call(()),
                        Err(err) => error.set(Some(err)),
                    }
                }
                QuizIntent::Select(value) => {
                    let outcome = vm.write().select(value);
                    error.set(outcome.err());
                }
                QuizIntent::Reveal => {
                    let outcome = vm.write().reveal();
                    error.set(outcome.err());
                }
                QuizIntent::Next => {
                    let step = vm.write().next();
                    match step {
                        Ok(NextStep::Moved) => error.set(None),
                        Ok(NextStep::Submit(submission)) => {
                            error.set(None);
                            let sessions = sessions.clone();
                            spawn(async move {
                                let outcome = sessions.submit(&submission).await;
                                let settled = vm.write().settle(outcome);
                                match settled {
                                    Ok(_) => notice.set(Some(COMPLETED_NOTICE)),
                                    Err(err) => {
                                        warn!(?err, "quiz submission failed");
                                        error.set(Some(err));
                                    }
                                }
                            });
                        }
                        Err(err) => error.set(Some(err)),
                    }
                }
            }
        })
    };

    let retry = use_callback(move |()| {
        let intent = last_intent().unwrap_or(QuizIntent::Start);
        dispatch.call(intent);
    });

    let vm_guard = vm.read();
    let phase = vm_guard.phase();
    let question = vm_guard.question();
    let detail = vm_guard.result().map(ResultDetailVm::from);
    drop(vm_guard);

    let error_message = error().map(|err| err.message());
    let retryable = matches!(
        error(),
        Some(ViewError::GenerationFailed(_) | ViewError::SaveFailed(_))
    );

    rsx! {
        div { class: "page quiz",
            h2 { "Interview Prep" }

            if let Some(message) = notice() {
                p { class: "notice success", "{message}" }
            }
            if let Some(message) = error_message {
                div { class: "error",
                    p { "{message}" }
                    if retryable {
                        button { class: "btn", onclick: move |_| retry.call(()), "Retry" }
                    }
                }
            }

            if generating() {
                p { class: "loading", "Generating your quiz..." }
            } else {
                match (phase, question, detail) {
                    (QuizPhase::Finished, _, Some(detail)) => rsx! {
                        QuizResultPanel { detail }
                        button {
                            class: "btn primary",
                            onclick: move |_| dispatch.call(QuizIntent::Restart),
                            "Start New Quiz"
                        }
                    },
                    (QuizPhase::Answering | QuizPhase::Submitting, Some(question), _) => rsx! {
                        QuestionCard {
                            question,
                            submitting: phase == QuizPhase::Submitting,
                            on_intent: dispatch,
                        }
                    },
                    _ => rsx! {
                        div { class: "card intro",
                            h3 { "Ready to test your knowledge?" }
                            p {
                                "This quiz contains 10 questions specific to your industry and skills. "
                                "Take your time and choose the best answer for each question."
                            }
                            button {
                                class: "btn primary",
                                onclick: move |_| dispatch.call(QuizIntent::Start),
                                "Start Quiz"
                            }
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn QuestionCard(question: QuestionVm, submitting: bool, on_intent: Callback<QuizIntent>) -> Element {
    let next_label = if submitting {
        "Saving..."
    } else {
        question.next_label()
    };
    let can_advance = question.can_advance && !submitting;

    rsx! {
        div { class: "card question",
            div { class: "question-header",
                span { "Question {question.number} of {question.total}" }
            }
            div { class: "progress",
                div { class: "progress-fill", style: "width: {question.progress_percent:.0}%" }
            }
            p { class: "prompt", "{question.prompt}" }

            div { class: "options",
                for option in question.options {
                    OptionButton {
                        key: "{option.key}",
                        option,
                        disabled: submitting,
                        on_select: move |value: String| on_intent.call(QuizIntent::Select(value)),
                    }
                }
            }

            if let Some(explanation) = question.explanation {
                div { class: "explanation",
                    p { class: "explanation-title", "Explanation:" }
                    p { "{explanation}" }
                }
            }

            div { class: "actions",
                if question.can_reveal && !submitting {
                    button {
                        class: "btn",
                        onclick: move |_| on_intent.call(QuizIntent::Reveal),
                        "Show Explanation"
                    }
                }
                button {
                    class: "btn primary",
                    disabled: !can_advance,
                    onclick: move |_| on_intent.call(QuizIntent::Next),
                    "{next_label}"
                }
            }
        }
    }
}

#[component]
fn OptionButton(option: OptionVm, disabled: bool, on_select: Callback<String>) -> Element {
    let class = if option.selected {
        "option selected"
    } else {
        "option"
    };
    let value = option.label.clone();
    rsx! {
        button {
            class,
            disabled,
            onclick: move |_| on_select.call(value.clone()),
            span { class: "option-key", "{option.key}" }
            span { class: "option-label", "{option.label}" }
        }
    }
}
