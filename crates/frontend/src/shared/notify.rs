//! Transient toast notifications.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use uuid::Uuid;

use crate::shared::config::config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast--success",
            ToastKind::Info => "toast toast--info",
            ToastKind::Error => "toast toast--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
}

/// Visible toasts, oldest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastQueue {
    items: Vec<Toast>,
}

impl ToastQueue {
    pub const MAX_VISIBLE: usize = 5;

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> Uuid {
        let id = Uuid::new_v4();
        self.items.push(Toast {
            id,
            kind,
            message: message.into(),
        });
        if self.items.len() > Self::MAX_VISIBLE {
            self.items.remove(0);
        }
        id
    }

    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

#[derive(Clone, Copy)]
pub struct Notifier {
    queue: RwSignal<ToastQueue>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::default()),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(ToastKind::Success, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(ToastKind::Info, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        log::error!("{}", message);
        self.show(ToastKind::Error, message);
    }

    fn show(&self, kind: ToastKind, message: String) {
        let mut id = Uuid::nil();
        self.queue.update(|q| id = q.push(kind, message));
        let queue = self.queue;
        Timeout::new(config().app.toast_ms, move || {
            let _ = queue.try_update(|q| q.dismiss(id));
        })
        .forget();
    }

    pub fn dismiss(&self, id: Uuid) {
        self.queue.update(|q| {
            q.dismiss(id);
        });
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().expect("Notifier not provided")
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let notifier = use_notifier();

    view! {
        <div class="toast-host">
            <For
                each=move || notifier.queue.get().items().to_vec()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.class() on:click=move |_| notifier.dismiss(id)>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oldest_toast_is_evicted_past_capacity() {
        let mut q = ToastQueue::default();
        let first = q.push(ToastKind::Info, "first");
        for i in 0..ToastQueue::MAX_VISIBLE {
            q.push(ToastKind::Success, format!("n{}", i));
        }
        assert_eq!(q.items().len(), ToastQueue::MAX_VISIBLE);
        assert!(q.items().iter().all(|t| t.id != first));
    }

    #[test]
    fn dismiss_is_by_id_and_reports_misses() {
        let mut q = ToastQueue::default();
        let a = q.push(ToastKind::Error, "a");
        let b = q.push(ToastKind::Error, "b");
        assert!(q.dismiss(a));
        assert!(!q.dismiss(a));
        assert_eq!(q.items()[0].id, b);
    }
}
