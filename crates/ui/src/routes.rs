use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{HistoryView, HomeView, QuizView, ResultView, ResumeView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/interview", QuizView)] Interview {},
        #[route("/history", HistoryView)] History {},
        #[route("/history/:result_id", ResultView)] Attempt { result_id: i64 },
        #[route("/resume", ResumeView)] Resume {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Career Coach" }
            ul {
                li { Link { to: Route::Home {}, "Home" } }
                li { Link { to: Route::Interview {}, "Interview Prep" } }
                li { Link { to: Route::History {}, "History" } }
                li { Link { to: Route::Resume {}, "Resume Builder" } }
            }
        }
    }
}
