mod history;
mod home;
mod quiz;
mod result;
mod resume;
mod state;

pub use history::HistoryView;
pub use home::HomeView;
pub use quiz::QuizView;
pub use result::{QuizResultPanel, ResultView};
pub use resume::ResumeView;
pub use state::{ViewError, ViewState, view_state_from_resource};

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
