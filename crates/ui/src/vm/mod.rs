mod markdown_vm;
mod quiz_vm;
mod result_vm;
mod resume_vm;
mod time_fmt;

pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use quiz_vm::{
    NextStep, OptionVm, QuestionVm, QuizIntent, QuizPhase, QuizVm, map_session_error,
};
pub use result_vm::{
    HistoryStatsVm, QuestionReviewVm, ResultCardVm, ResultDetailVm, map_result_cards,
    summarize_results,
};
pub use resume_vm::{ContactField, EntryField, ResumeFormVm, ResumeTab, entry_field_path};
pub use time_fmt::{format_datetime, format_duration};
