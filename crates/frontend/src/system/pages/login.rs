use contracts::system::auth::{LoginRequest, QrCodeStatus, VerificationPurpose};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::NavigateOptions;
use thaw::*;

use super::code_button::SendCodeButton;
use crate::layout::global_context::use_config;
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::notify::use_notifier;
use crate::shared::validation::{require, validate_code, validate_mobile};
use crate::system::auth::context::{complete_login, use_auth, use_auth_service};
use crate::system::auth::guard::redirect_target;

const TAB_ACCOUNT: &str = "account";
const TAB_MOBILE: &str = "mobile";
const TAB_QRCODE: &str = "qrcode";

#[derive(Clone, Debug, PartialEq)]
enum QrView {
    Idle,
    Loading,
    Waiting { url: String },
    Expired,
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let service = StoredValue::new(use_auth_service());
    let (auth_state, set_auth_state) = use_auth();
    let notifier = use_notifier();
    let config_ctx = use_config();
    let location = use_location();
    let navigate = StoredValue::new(use_navigate());

    let selected_tab = RwSignal::new(TAB_ACCOUNT.to_string());
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let mobile = RwSignal::new(String::new());
    let code = RwSignal::new(String::new());
    let remember = RwSignal::new(true);
    let is_loading = RwSignal::new(false);
    let error_message = RwSignal::new(Option::<String>::None);

    let qr_view = RwSignal::new(QrView::Idle);
    // bumped to stop a running poll loop
    let qr_generation = RwSignal::new(0u32);

    let go_back = move || {
        let target = redirect_target(&location.search.get_untracked());
        navigate.with_value(|nav| {
            nav(
                &target,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            )
        });
    };

    // Already signed in: nothing to do here
    Effect::new(move |_| {
        if auth_state.with(|s| s.access_token.is_some()) {
            go_back();
        }
    });

    let submit = move || {
        let request = if selected_tab.get_untracked() == TAB_MOBILE {
            let (m, c) = (mobile.get_untracked(), code.get_untracked());
            if let Err(e) = validate_mobile(&m).and_then(|_| validate_code(&c)) {
                error_message.set(Some(e.to_string()));
                return;
            }
            LoginRequest::mobile(m, c, remember.get_untracked())
        } else {
            let (u, p) = (username.get_untracked(), password.get_untracked());
            if let Err(e) = require(&u, "username").and_then(|_| require(&p, "password")) {
                error_message.set(Some(e.to_string()));
                return;
            }
            LoginRequest::account(u.trim(), p, remember.get_untracked())
        };

        is_loading.set(true);
        error_message.set(None);
        let service = service.get_value();
        spawn_local(async move {
            match service.login(&request).await {
                Ok(response) => {
                    notifier.success(format!("Welcome back, {}", response.user.username));
                    complete_login(set_auth_state, response);
                }
                Err(e) => {
                    error_message.set(Some(format!("Login failed: {}", e)));
                }
            }
            let _ = is_loading.try_set(false);
        });
    };

    let poll_qr = move |qr_token: String, generation: u32| {
        let service = service.get_value();
        spawn_local(async move {
            loop {
                TimeoutFuture::new(config().auth.qr_poll_ms).await;
                let still_current = qr_generation.try_get_untracked() == Some(generation);
                if !still_current {
                    break;
                }
                match service
                    .check_qr_code_status(&qr_token, remember.get_untracked())
                    .await
                {
                    Ok(QrCodeStatus::Confirmed(response)) => {
                        complete_login(set_auth_state, response);
                        break;
                    }
                    Ok(status) if status.is_expired() => {
                        let _ = qr_view.try_set(QrView::Expired);
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => log::warn!("qr status check failed: {}", e),
                }
            }
        });
    };

    let load_qr = move || {
        qr_generation.update(|g| *g += 1);
        let generation = qr_generation.get_untracked();
        qr_view.set(QrView::Loading);
        let service = service.get_value();
        spawn_local(async move {
            match service.get_qr_code().await {
                Ok(qr) => {
                    if qr_view.try_set(QrView::Waiting { url: qr.qr_url }).is_none() {
                        poll_qr(qr.qr_token, generation);
                    }
                }
                Err(e) => {
                    notifier.error(format!("Failed to load QR code: {}", e));
                    let _ = qr_view.try_set(QrView::Idle);
                }
            }
        });
    };

    // Start polling when the QR tab opens, stop when it closes
    Effect::new(move |_| {
        if selected_tab.get() == TAB_QRCODE {
            load_qr();
        } else {
            qr_generation.update(|g| *g += 1);
            qr_view.set(QrView::Idle);
        }
    });
    on_cleanup(move || {
        let _ = qr_generation.try_update(|g| *g += 1);
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        submit();
    };

    let is_dark = move || config_ctx.state.with(|s| s.is_dark_mode);
    let store = config_ctx.store.clone();
    let toggle_theme = move |_| store.toggle_dark_mode();

    view! {
        <div class="login-container">
            <button class="login-theme-toggle" on:click=toggle_theme title="Toggle dark mode">
                {move || if is_dark() { icon("sun") } else { icon("moon") }}
            </button>

            <div class="login-box">
                <h1>{config().app.title.clone()}</h1>
                <h2>"Sign in"</h2>

                <TabList selected_value=selected_tab>
                    <Tab value=TAB_ACCOUNT>"Account"</Tab>
                    <Tab value=TAB_MOBILE>"Mobile"</Tab>
                    <Tab value=TAB_QRCODE>"QR code"</Tab>
                </TabList>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <Show
                    when=move || selected_tab.get() != TAB_QRCODE
                    fallback=move || view! {
                        <div class="qr-panel">
                            {move || match qr_view.get() {
                                QrView::Idle | QrView::Loading => view! { <Spinner /> }.into_any(),
                                QrView::Waiting { url } => view! {
                                    <img class="qr-panel__image" src=url alt="Login QR code" />
                                    <p>"Scan with the mobile app to sign in"</p>
                                }.into_any(),
                                QrView::Expired => view! {
                                    <p>"The QR code has expired"</p>
                                    <Button appearance=ButtonAppearance::Primary on_click=move |_| load_qr()>
                                        "Refresh"
                                    </Button>
                                }.into_any(),
                            }}
                        </div>
                    }
                >
                    <form on:submit=on_submit>
                        <Show
                            when=move || selected_tab.get() == TAB_MOBILE
                            fallback=move || view! {
                                <div class="form-group">
                                    <label for="username">"Username"</label>
                                    <input
                                        type="text"
                                        id="username"
                                        autocomplete="username"
                                        prop:value=move || username.get()
                                        on:input=move |ev| username.set(event_target_value(&ev))
                                        disabled=move || is_loading.get()
                                    />
                                </div>
                                <div class="form-group">
                                    <label for="password">"Password"</label>
                                    <input
                                        type="password"
                                        id="password"
                                        autocomplete="current-password"
                                        prop:value=move || password.get()
                                        on:input=move |ev| password.set(event_target_value(&ev))
                                        disabled=move || is_loading.get()
                                    />
                                </div>
                            }
                        >
                            <div class="form-group">
                                <label for="mobile">"Mobile number"</label>
                                <input
                                    type="tel"
                                    id="mobile"
                                    prop:value=move || mobile.get()
                                    on:input=move |ev| mobile.set(event_target_value(&ev))
                                    disabled=move || is_loading.get()
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
                                    disabled=move || is_loading.get()
                                />
                                <SendCodeButton mobile=mobile purpose=VerificationPurpose::Login />
                            </div>
                        </Show>

                        <div class="form-row">
                            <label>
                                <input
                                    type="checkbox"
                                    prop:checked=move || remember.get()
                                    on:change=move |ev| remember.set(event_target_checked(&ev))
                                />
                                " Remember me"
                            </label>
                            <A href="/auth/reset-password">"Forgot password?"</A>
                        </div>

                        <button type="submit" class="btn-primary" disabled=move || is_loading.get()>
                            {move || if is_loading.get() { "Signing in..." } else { "Sign in" }}
                        </button>
                    </form>
                </Show>

                <div class="login-info">
                    "No account yet? "
                    <A href="/auth/register">"Create one"</A>
                </div>
            </div>
        </div>
    }
}
