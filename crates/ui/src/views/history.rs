use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ResultCardVm, map_result_cards};

const HISTORY_LIMIT: u32 = 20;

#[component]
pub fn HistoryView() -> Element {
    let ctx = use_context::<AppContext>();
    let results = ctx.quiz_results();

    let resource = use_resource(move || {
        let results = results.clone();
        async move {
            let items = results
                .list_recent(HISTORY_LIMIT)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(map_result_cards(&items))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Assessment History" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(cards) => rsx! {
                    if cards.is_empty() {
                        p { "No quizzes taken yet. Start one from Interview Prep." }
                    } else {
                        ul { class: "history",
                            for card in cards {
                                ResultCard { key: "{card.id}", card }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn ResultCard(card: ResultCardVm) -> Element {
    rsx! {
        li {
            Link { class: "result-link", to: Route::Attempt { result_id: card.id },
                span { class: "result-date", "{card.completed_at_str}" }
                span { class: "result-cta", "View" }
            }
            p { class: "result-score", "Score: {card.score_label} | {card.correct_label}" }
        }
    }
}
