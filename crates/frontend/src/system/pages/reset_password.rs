use contracts::system::auth::{ResetPasswordRequest, VerificationPurpose};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use super::code_button::SendCodeButton;
use crate::routes::definitions::LOGIN_PATH;
use crate::shared::notify::use_notifier;
use crate::shared::validation::{validate_code, validate_mobile, validate_new_password};
use crate::system::auth::context::use_auth_service;

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let service = StoredValue::new(use_auth_service());
    let notifier = use_notifier();
    let navigate = StoredValue::new(use_navigate());

    let mobile = RwSignal::new(String::new());
    let code = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let is_saving = RwSignal::new(false);
    let error_message = RwSignal::new(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let request = ResetPasswordRequest {
            mobile: mobile.get_untracked(),
            verification_code: code.get_untracked(),
            new_password: password.get_untracked(),
        };
        let checked = validate_mobile(&request.mobile)
            .and_then(|_| validate_code(&request.verification_code))
            .and_then(|_| validate_new_password(&request.new_password, &confirm.get_untracked()));
        if let Err(e) = checked {
            error_message.set(Some(e.to_string()));
            return;
        }

        is_saving.set(true);
        error_message.set(None);
        let service = service.get_value();
        spawn_local(async move {
            match service.reset_password(&request).await {
                Ok(()) => {
                    notifier.success("Password updated, please sign in");
                    navigate.with_value(|nav| nav(LOGIN_PATH, NavigateOptions::default()));
                }
                Err(e) => {
                    let _ = error_message.try_set(Some(format!("Reset failed: {}", e)));
                }
            }
            let _ = is_saving.try_set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h2>"Reset password"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="mobile">"Mobile number"</label>
                        <input
                            type="tel"
                            id="mobile"
                            prop:value=move || mobile.get()
                            on:input=move |ev| mobile.set(event_target_value(&ev))
                            disabled=move || is_saving.get()
                        />
                    </div>

                    <div class="form-group form-group--inline">
                        <label for="code">"Verification code"</label>
                        <input
                            type="text"
                            id="code"
                            maxlength="6"
                            prop:value=move || code.get()
                            on:input=move |ev| code.set(event_target_value(&ev))
                            disabled=move || is_saving.get()
                        />
                        <SendCodeButton mobile=mobile purpose=VerificationPurpose::Reset />
                    </div>

                    <div class="form-group">
                        <label for="password">"New password"</label>
                        <input
                            type="password"
                            id="password"
                            autocomplete="new-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            disabled=move || is_saving.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="confirm">"Confirm password"</label>
                        <input
                            type="password"
                            id="confirm"
                            autocomplete="new-password"
                            prop:value=move || confirm.get()
                            on:input=move |ev| confirm.set(event_target_value(&ev))
                            disabled=move || is_saving.get()
                        />
                    </div>

                    <button type="submit" class="btn-primary" disabled=move || is_saving.get()>
                        {move || if is_saving.get() { "Saving..." } else { "Reset password" }}
                    </button>
                </form>

                <div class="login-info">
                    <A href=LOGIN_PATH>"Back to sign in"</A>
                </div>
            </div>
        </div>
    }
}
