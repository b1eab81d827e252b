use contracts::system::auth::VerificationPurpose;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::config::config;
use crate::shared::notify::use_notifier;
use crate::shared::validation::validate_mobile;
use crate::system::auth::context::use_auth_service;

pub fn countdown_label(remaining: u32) -> String {
    if remaining == 0 {
        "Send code".to_string()
    } else {
        format!("Resend in {}s", remaining)
    }
}

/// Requests an SMS code for `mobile`, then locks itself for the resend
/// interval.
#[component]
pub fn SendCodeButton(mobile: RwSignal<String>, purpose: VerificationPurpose) -> impl IntoView {
    let service = StoredValue::new(use_auth_service());
    let notifier = use_notifier();
    let remaining = RwSignal::new(0u32);
    let sending = RwSignal::new(false);

    let start_countdown = move || {
        remaining.set(config().auth.resend_seconds);
        spawn_local(async move {
            loop {
                TimeoutFuture::new(1_000).await;
                // the component is gone once the signal is
                let left = remaining.try_update(|r| {
                    *r = r.saturating_sub(1);
                    *r
                });
                match left {
                    Some(0) | None => break,
                    Some(_) => {}
                }
            }
        });
    };

    let on_click = move |_: leptos::ev::MouseEvent| {
        if remaining.get_untracked() > 0 || sending.get_untracked() {
            return;
        }
        let number = mobile.get_untracked();
        if let Err(e) = validate_mobile(&number) {
            notifier.error(e.to_string());
            return;
        }
        sending.set(true);
        let service = service.get_value();
        spawn_local(async move {
            match service.send_verification_code(&number, purpose).await {
                Ok(data) => {
                    if data.verify_code.is_empty() {
                        notifier.success("Verification code sent");
                    } else {
                        // development servers echo the code back
                        notifier.info(format!("Verification code: {}", data.verify_code));
                    }
                    start_countdown();
                }
                Err(e) => notifier.error(format!("Failed to send code: {}", e)),
            }
            let _ = sending.try_set(false);
        });
    };

    view! {
        <button
            type="button"
            class="btn-secondary btn-code"
            disabled=move || remaining.get() > 0 || sending.get()
            on:click=on_click
        >
            {move || countdown_label(remaining.get())}
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_reflects_gate() {
        assert_eq!(countdown_label(0), "Send code");
        assert_eq!(countdown_label(42), "Resend in 42s");
    }
}
