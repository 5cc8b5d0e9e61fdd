use dioxus::prelude::*;
use store::{Priority, PriorityFilter};

use super::dashboard::use_panels;

fn filter_label(filter: PriorityFilter) -> &'static str {
    match filter {
        PriorityFilter::All => "All",
        PriorityFilter::Only(Priority::Normal) => "Normal",
        PriorityFilter::Only(Priority::Important) => "Important",
        PriorityFilter::Only(Priority::Urgent) => "Urgent",
    }
}

#[component]
pub fn AnnouncementsPanel() -> Element {
    let panels = use_panels();
    let view = panels.announcements_view;
    let controller = panels.announcements;

    let mut title = use_signal(String::new);
    let mut content = use_signal(String::new);
    let mut priority = use_signal(Priority::default);

    let current = (view.filter)();
    let can_delete = (view.can_delete)();

    let post = {
        let controller = controller.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            if controller.create(&title(), &content(), priority()).is_ok() {
                title.set(String::new());
                content.set(String::new());
                priority.set(Priority::default());
            }
        }
    };

    rsx! {
        h2 { "Announcements" }

        if (view.composer)() {
            form {
                class: "composer",
                onsubmit: post,
                input {
                    placeholder: "Title",
                    value: "{title}",
                    oninput: move |evt| title.set(evt.value()),
                }
                textarea {
                    placeholder: "What do attendees need to know?",
                    value: "{content}",
                    oninput: move |evt| content.set(evt.value()),
                }
                select {
                    value: "{priority().as_str()}",
                    onchange: move |evt| {
                        if let Ok(p) = evt.value().parse() {
                            priority.set(p);
                        }
                    },
                    for p in Priority::ALL {
                        option { key: "{p.as_str()}", value: p.as_str(), "{p}" }
                    }
                }
                button { class: "btn primary", r#type: "submit", "Post Announcement" }
            }
        }

        div {
            class: "filters",
            for filter in PriorityFilter::ALL {
                button {
                    key: "{filter.as_str()}",
                    class: if filter == current { "filter active" } else { "filter" },
                    onclick: {
                        let controller = controller.clone();
                        move |_| controller.show(filter)
                    },
                    "{filter_label(filter)}"
                }
            }
        }

        if let Some(message) = (view.empty)() {
            p { class: "empty-state", "{message}" }
        }

        ul {
            class: "announcement-list",
            for item in (view.items)() {
                li {
                    key: "{item.id}",
                    class: "announcement priority-{item.priority.as_str()}",
                    div {
                        class: "announcement-head",
                        h3 { "{item.title}" }
                        span { class: "badge", "{item.priority}" }
                    }
                    p { "{item.content}" }
                    div {
                        class: "announcement-meta",
                        span {
                            "{item.author} · "
                            {item.timestamp.with_timezone(&chrono::Local).format("%b %e, %H:%M").to_string()}
                        }
                        if can_delete {
                            button {
                                class: "btn danger small",
                                onclick: {
                                    let controller = controller.clone();
                                    let id = item.id.clone();
                                    move |_| {
                                        let _ = controller.delete(&id);
                                    }
                                },
                                "Delete"
                            }
                        }
                    }
                }
            }
        }
    }
}
