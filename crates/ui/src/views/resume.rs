use dioxus::prelude::*;
use tracing::warn;

use coach_core::model::{EntryKind, ResumeEntry};
use services::ResumeServiceError;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ContactField, EntryField, ResumeFormVm, ResumeTab, entry_field_path};

const SAVED_NOTICE: &str = "Resume saved successfully!";

#[component]
pub fn ResumeView() -> Element {
    let ctx = use_context::<AppContext>();
    let resumes = ctx.resumes();

    let vm = use_signal(ResumeFormVm::default);
    let error = use_signal(|| None::<ViewError>);
    let notice = use_signal(|| None::<&'static str>);
    let saving = use_signal(|| false);

    let resource = {
        let resumes = resumes.clone();
        use_resource(move || {
            let resumes = resumes.clone();
            let mut vm = vm;
            async move {
                let record = resumes.load().await.map_err(|_| ViewError::Unknown)?;
                if let Some(record) = record {
                    vm.set(ResumeFormVm::new(record.draft));
                }
                Ok::<_, ViewError>(())
            }
        })
    };
    let state = view_state_from_resource(&resource);

    let save = use_callback(move |()| {
        let mut vm = vm;
        let mut error = error;
        let mut notice = notice;
        let mut saving = saving;
        if saving() {
            return;
        }
        saving.set(true);
        notice.set(None);

        let draft = vm.read().draft().clone();
        let resumes = resumes.clone();
        spawn(async move {
            match resumes.save(draft).await {
                Ok(record) => {
                    vm.write().mark_saved(record.draft);
                    error.set(None);
                    notice.set(Some(SAVED_NOTICE));
                }
                Err(ResumeServiceError::Validation(err)) => {
                    vm.write().apply_errors(&err);
                    error.set(Some(ViewError::Invalid));
                }
                Err(err) => {
                    warn!(%err, "saving resume failed");
                    error.set(Some(ViewError::SaveFailed(err.to_string())));
                }
            }
            saving.set(false);
        });
    });

    let mut vm = vm;
    let tab = vm.read().tab();
    let save_label = if saving() { "Saving..." } else { "Save" };
    let error_message = error().map(|err| err.message());

    rsx! {
        div { class: "page resume",
            div { class: "resume-header",
                h2 { "Resume Builder" }
                button {
                    class: "btn primary",
                    disabled: saving(),
                    onclick: move |_| save.call(()),
                    "{save_label}"
                }
            }

            if let Some(message) = notice() {
                p { class: "notice success", "{message}" }
            }
            if let Some(message) = error_message {
                p { class: "error", "{message}" }
            }

            match state {
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
                ViewState::Idle | ViewState::Ready(()) => rsx! {
                    div { class: "tabs",
                        button {
                            class: if tab == ResumeTab::Edit { "tab active" } else { "tab" },
                            onclick: move |_| vm.write().set_tab(ResumeTab::Edit),
                            "Form"
                        }
                        button {
                            class: if tab == ResumeTab::Preview { "tab active" } else { "tab" },
                            onclick: move |_| vm.write().set_tab(ResumeTab::Preview),
                            "Markdown"
                        }
                    }
                    if tab == ResumeTab::Edit {
                        ResumeForm { vm }
                    } else {
                        ResumePreview { vm }
                    }
                },
            }
        }
    }
}

#[component]
fn ResumePreview(vm: Signal<ResumeFormVm>) -> Element {
    let html = vm.read().preview_html();
    rsx! {
        div { class: "preview", dangerous_inner_html: "{html}" }
    }
}

#[component]
fn ResumeForm(vm: Signal<ResumeFormVm>) -> Element {
    let mut vm = vm;
    let (summary, skills, summary_error, skills_error) = {
        let guard = vm.read();
        (
            guard.draft().summary.clone(),
            guard.draft().skills.clone(),
            guard.error_for("summary").map(str::to_string),
            guard.error_for("skills").map(str::to_string),
        )
    };

    rsx! {
        section { class: "form-section",
            h3 { "Contact Information" }
            div { class: "grid",
                ContactInput { vm, field: ContactField::Email, label: "Email", input_type: "email", placeholder: "your@email.com" }
                ContactInput { vm, field: ContactField::Mobile, label: "Mobile Number", input_type: "tel", placeholder: "+1 234 567 8900" }
                ContactInput { vm, field: ContactField::Linkedin, label: "LinkedIn URL", input_type: "url", placeholder: "https://linkedin.com/in/your-profile" }
                ContactInput { vm, field: ContactField::Twitter, label: "Twitter/X Profile", input_type: "url", placeholder: "https://twitter.com/your-handle" }
            }
        }

        section { class: "form-section",
            h3 { "Professional Summary" }
            textarea {
                rows: "4",
                placeholder: "Write a compelling professional summary...",
                value: "{summary}",
                oninput: move |evt: FormEvent| vm.write().set_summary(evt.value()),
            }
            FieldErrorText { message: summary_error }
        }

        section { class: "form-section",
            h3 { "Skills" }
            textarea {
                rows: "3",
                placeholder: "List your key skills...",
                value: "{skills}",
                oninput: move |evt: FormEvent| vm.write().set_skills(evt.value()),
            }
            FieldErrorText { message: skills_error }
        }

        for kind in EntryKind::ALL {
            EntrySection { key: "{kind.field()}", vm, kind }
        }
    }
}

#[component]
fn ContactInput(
    vm: Signal<ResumeFormVm>,
    field: ContactField,
    label: &'static str,
    input_type: &'static str,
    placeholder: &'static str,
) -> Element {
    let mut vm = vm;
    let (value, message) = {
        let guard = vm.read();
        (
            guard.contact_value(field).to_string(),
            guard.error_for(field.path()).map(str::to_string),
        )
    };
    rsx! {
        label { class: "field",
            span { "{label}" }
            input {
                r#type: input_type,
                placeholder,
                value: "{value}",
                oninput: move |evt: FormEvent| vm.write().set_contact(field, evt.value()),
            }
            FieldErrorText { message }
        }
    }
}

#[component]
fn EntrySection(vm: Signal<ResumeFormVm>, kind: EntryKind) -> Element {
    let mut vm = vm;
    let entries = vm.read().draft().entries(kind).to_vec();
    rsx! {
        section { class: "form-section",
            h3 { "{kind.heading()}" }
            for (index, entry) in entries.into_iter().enumerate() {
                EntryEditor { key: "{index}", vm, kind, index, entry }
            }
            button {
                class: "btn",
                onclick: move |_| vm.write().add_entry(kind),
                "Add {kind.label()}"
            }
        }
    }
}

#[component]
fn EntryEditor(
    vm: Signal<ResumeFormVm>,
    kind: EntryKind,
    index: usize,
    entry: ResumeEntry,
) -> Element {
    let mut vm = vm;
    let error = |field: EntryField| {
        vm.read()
            .error_for(&entry_field_path(kind, index, field))
            .map(str::to_string)
    };
    let title_error = error(EntryField::Title);
    let organization_error = error(EntryField::Organization);
    let start_error = error(EntryField::StartDate);
    let end_error = error(EntryField::EndDate);
    let description_error = error(EntryField::Description);
    let end_date = entry.end_date.clone().unwrap_or_default();
    let current = entry.current;

    rsx! {
        div { class: "entry",
            div { class: "grid",
                label { class: "field",
                    span { "Title/Position" }
                    input {
                        value: "{entry.title}",
                        oninput: move |evt: FormEvent| {
                            vm.write().set_entry_field(kind, index, EntryField::Title, evt.value());
                        },
                    }
                    FieldErrorText { message: title_error }
                }
                label { class: "field",
                    span { "Organization/Company" }
                    input {
                        value: "{entry.organization}",
                        oninput: move |evt: FormEvent| {
                            vm.write().set_entry_field(kind, index, EntryField::Organization, evt.value());
                        },
                    }
                    FieldErrorText { message: organization_error }
                }
                label { class: "field",
                    span { "Start Date" }
                    input {
                        r#type: "month",
                        value: "{entry.start_date}",
                        oninput: move |evt: FormEvent| {
                            vm.write().set_entry_field(kind, index, EntryField::StartDate, evt.value());
                        },
                    }
                    FieldErrorText { message: start_error }
                }
                label { class: "field",
                    span { "End Date" }
                    input {
                        r#type: "month",
                        disabled: entry.current,
                        value: "{end_date}",
                        oninput: move |evt: FormEvent| {
                            vm.write().set_entry_field(kind, index, EntryField::EndDate, evt.value());
                        },
                    }
                    FieldErrorText { message: end_error }
                }
            }
            button {
                class: if entry.current { "toggle toggle--on" } else { "toggle" },
                r#type: "button",
                role: "switch",
                aria_checked: "{entry.current}",
                onclick: move |_| vm.write().set_entry_current(kind, index, !current),
                "Current {kind.label()}"
            }
            label { class: "field",
                span { "Description" }
                textarea {
                    rows: "3",
                    value: "{entry.description}",
                    oninput: move |evt: FormEvent| {
                        vm.write().set_entry_field(kind, index, EntryField::Description, evt.value());
                    },
                }
                FieldErrorText { message: description_error }
            }
            button {
                class: "btn danger",
                onclick: move |_| vm.write().remove_entry(kind, index),
                "Remove"
            }
        }
    }
}

#[component]
fn FieldErrorText(message: Option<String>) -> Element {
    rsx! {
        if let Some(message) = message {
            p { class: "field-error", "{message}" }
        }
    }
}
