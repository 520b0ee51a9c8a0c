use std::borrow::Cow;

use dioxus::prelude::*;

/// User-facing failure. Collaborator failures carry the cause's text so a
/// bad API key reads differently from a full disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    NotFound,
    Unanswered,
    Busy,
    GenerationDisabled,
    GenerationFailed(String),
    SaveFailed(String),
    Invalid,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> Cow<'static, str> {
        match self {
            Self::GenerationFailed(cause) => with_cause("Could not generate a quiz", cause),
            Self::SaveFailed(cause) => with_cause("Could not save", cause),
            _ => Cow::Borrowed(self.fixed_message()),
        }
    }

    fn fixed_message(&self) -> &'static str {
        match self {
            Self::Unknown => "Something went wrong. Please try again.",
            Self::NotFound => "That quiz result could not be found.",
            Self::Unanswered => "Choose an answer first.",
            Self::Busy => "Still saving your results. Please wait.",
            Self::GenerationDisabled => {
                "Quiz generation is not configured. Set COACH_AI_API_KEY and restart."
            }
            Self::GenerationFailed(_) => "Could not generate a quiz. Please try again.",
            Self::SaveFailed(_) => "Could not save. Please try again.",
            Self::Invalid => "Please fix the highlighted fields.",
        }
    }
}

fn with_cause(prefix: &str, cause: &str) -> Cow<'static, str> {
    let cause = cause.trim();
    if cause.is_empty() {
        return Cow::Owned(format!("{prefix}. Please try again."));
    }
    Cow::Owned(format!("{prefix}: {cause}. Please try again."))
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collaborator_failures_show_their_cause() {
        let err = ViewError::GenerationFailed("request failed with status 401".into());
        assert_eq!(
            err.message(),
            "Could not generate a quiz: request failed with status 401. Please try again."
        );
        assert_eq!(
            ViewError::SaveFailed(String::new()).message(),
            "Could not save. Please try again."
        );
        assert_eq!(
            ViewError::NotFound.message(),
            "That quiz result could not be found."
        );
    }
}
