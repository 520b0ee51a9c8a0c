use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{HistoryStatsVm, summarize_results};

const STATS_WINDOW: u32 = 50;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let results = ctx.quiz_results();
    let generation_enabled = ctx.generation_enabled();
    let disabled_notice = ViewError::GenerationDisabled.message();

    let resource = use_resource(move || {
        let results = results.clone();
        async move {
            let items = results
                .list_recent(STATS_WINDOW)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(summarize_results(&items))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Interview Preparation" }
            p { class: "lead",
                "Test your knowledge with quizzes tailored to your industry and skills, then polish your resume."
            }

            if !generation_enabled {
                p { class: "notice warning", "{disabled_notice}" }
            }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(None) => rsx! {
                    p { "No quizzes taken yet." }
                },
                ViewState::Ready(Some(stats)) => rsx! {
                    StatsPanel { stats }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                    button {
                        class: "btn",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
            }

            div { class: "actions",
                Link { class: "btn primary", to: Route::Interview {}, "Start Quiz" }
                Link { class: "btn", to: Route::Resume {}, "Build Resume" }
            }
        }
    }
}

#[component]
fn StatsPanel(stats: HistoryStatsVm) -> Element {
    rsx! {
        div { class: "stats",
            div { class: "stat",
                span { class: "stat-label", "Average Score" }
                span { class: "stat-value", "{stats.average_label}" }
            }
            div { class: "stat",
                span { class: "stat-label", "Quizzes Taken" }
                span { class: "stat-value", "{stats.attempts}" }
            }
            div { class: "stat",
                span { class: "stat-label", "Latest Score" }
                span { class: "stat-value", "{stats.latest_label}" }
            }
            div { class: "stat",
                span { class: "stat-label", "Best Score" }
                span { class: "stat-value", "{stats.best_label}" }
            }
        }
    }
}
