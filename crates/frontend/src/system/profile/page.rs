use chrono::Utc;
use contracts::system::profile::{
    ApiToken, CreatedApiToken, Device, NotificationMode, NotificationSettings, UpdateProfileRequest,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api::ProfileService;
use crate::shared::date_utils::{format_datetime, format_relative};
use crate::shared::http::GlooTransport;
use crate::shared::notify::use_notifier;
use crate::shared::validation::{password_strength, require, validate_email, validate_mobile, validate_new_password};
use crate::system::auth::context::{use_auth, use_auth_service};

type Service = StoredValue<ProfileService<GlooTransport>>;

fn use_profile_service() -> Service {
    StoredValue::new(ProfileService::new(use_auth_service()))
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let selected_tab = RwSignal::new("basic".to_string());
    let (auth_state, _) = use_auth();

    view! {
        <div class="page page-profile">
            <div class="profile-header">
                {move || {
                    let avatar = auth_state.get().user_info.map(|u| u.avatar).unwrap_or_default();
                    if avatar.is_empty() {
                        view! { <div class="avatar avatar--placeholder">{crate::shared::icons::icon("user")}</div> }.into_any()
                    } else {
                        view! { <img class="avatar" src=avatar alt="avatar" /> }.into_any()
                    }
                }}
                <div>
                    <h1>{move || auth_state.get().username().unwrap_or_default()}</h1>
                    <p class="page__muted">
                        {move || auth_state.get().user_info.map(|u| u.email).unwrap_or_default()}
                    </p>
                </div>
            </div>

            <TabList selected_value=selected_tab>
                <Tab value="basic">"Basic info"</Tab>
                <Tab value="security">"Security"</Tab>
                <Tab value="notifications">"Notifications"</Tab>
                <Tab value="api">"API tokens"</Tab>
            </TabList>

            <div class="profile-body">
                {move || match selected_tab.get().as_str() {
                    "security" => view! { <SecurityTab /> }.into_any(),
                    "notifications" => view! { <NotificationsTab /> }.into_any(),
                    "api" => view! { <ApiTokensTab /> }.into_any(),
                    _ => view! { <BasicInfoTab /> }.into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
fn BasicInfoTab() -> impl IntoView {
    let service = use_profile_service();
    let notifier = use_notifier();
    let (auth_state, set_auth_state) = use_auth();

    let user = auth_state.get_untracked().user_info.unwrap_or_default();
    let username = RwSignal::new(user.username);
    let email = RwSignal::new(user.email);
    let mobile = RwSignal::new(String::new());
    let is_saving = RwSignal::new(false);
    let is_uploading = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let request = UpdateProfileRequest {
            username: username.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            mobile: mobile.get_untracked(),
        };
        let checked = require(&request.username, "username")
            .and_then(|_| validate_email(&request.email))
            .and_then(|_| {
                if request.mobile.is_empty() {
                    Ok(())
                } else {
                    validate_mobile(&request.mobile)
                }
            });
        if let Err(e) = checked {
            notifier.error(e.to_string());
            return;
        }

        is_saving.set(true);
        let service = service.get_value();
        spawn_local(async move {
            match service.update_profile(&request).await {
                Ok(user) => {
                    set_auth_state.update(|s| s.user_info = Some(user));
                    notifier.success("Profile saved");
                }
                Err(e) => notifier.error(format!("Failed to save profile: {}", e)),
            }
            let _ = is_saving.try_set(false);
        });
    };

    let on_avatar = move |ev: leptos::ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        is_uploading.set(true);
        let service = service.get_value();
        spawn_local(async move {
            match service.upload_avatar(&file).await {
                Ok(avatar) => {
                    set_auth_state.update(|s| {
                        if let Some(user) = s.user_info.as_mut() {
                            user.avatar = avatar.url;
                        }
                    });
                    notifier.success("Avatar updated");
                }
                Err(e) => notifier.error(format!("Failed to upload avatar: {}", e)),
            }
            let _ = is_uploading.try_set(false);
        });
    };

    view! {
        <form class="profile-form" on:submit=on_submit>
            <div class="form-group">
                <label for="avatar">"Avatar"</label>
                <input
                    type="file"
                    id="avatar"
                    accept="image/*"
                    on:change=on_avatar
                    disabled=move || is_uploading.get()
                />
            </div>
            <div class="form-group">
                <label for="username">"Username"</label>
                <input
                    type="text"
                    id="username"
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label for="email">"Email"</label>
                <input
                    type="email"
                    id="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label for="mobile">"Mobile number"</label>
                <input
                    type="tel"
                    id="mobile"
                    prop:value=move || mobile.get()
                    on:input=move |ev| mobile.set(event_target_value(&ev))
                />
            </div>
            <button type="submit" class="btn-primary" disabled=move || is_saving.get()>
                {move || if is_saving.get() { "Saving..." } else { "Save" }}
            </button>
        </form>
    }
}

#[component]
fn SecurityTab() -> impl IntoView {
    let service = use_profile_service();
    let auth = StoredValue::new(use_auth_service());
    let notifier = use_notifier();

    let old_password = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let is_saving = RwSignal::new(false);
    let devices = RwSignal::new(Option::<Vec<Device>>::None);

    let load_devices = move || {
        let service = service.get_value();
        spawn_local(async move {
            match service.list_devices().await {
                Ok(list) => {
                    let _ = devices.try_set(Some(list));
                }
                Err(e) => notifier.error(format!("Failed to load devices: {}", e)),
            }
        });
    };
    load_devices();

    let revoke = move |id: String| {
        let service = service.get_value();
        spawn_local(async move {
            match service.revoke_device(&id).await {
                Ok(()) => {
                    let _ = devices.try_update(|d| {
                        if let Some(list) = d.as_mut() {
                            list.retain(|dev| dev.id != id);
                        }
                    });
                    notifier.success("Device signed out");
                }
                Err(e) => notifier.error(format!("Failed to sign out device: {}", e)),
            }
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let (old, new) = (old_password.get_untracked(), new_password.get_untracked());
        let checked = require(&old, "current password")
            .and_then(|_| validate_new_password(&new, &confirm.get_untracked()));
        if let Err(e) = checked {
            notifier.error(e.to_string());
            return;
        }
        is_saving.set(true);
        let auth = auth.get_value();
        spawn_local(async move {
            match auth.change_password(&old, &new).await {
                Ok(()) => {
                    notifier.success("Password changed");
                    for field in [old_password, new_password, confirm] {
                        let _ = field.try_set(String::new());
                    }
                }
                Err(e) => notifier.error(format!("Failed to change password: {}", e)),
            }
            let _ = is_saving.try_set(false);
        });
    };

    let strength = move || {
        let pw = new_password.get();
        (!pw.is_empty()).then(|| password_strength(&pw))
    };

    view! {
        <section class="profile-section">
            <h3>"Change password"</h3>
            <form class="profile-form" on:submit=on_submit>
                <div class="form-group">
                    <label for="old-password">"Current password"</label>
                    <input
                        type="password"
                        id="old-password"
                        autocomplete="current-password"
                        prop:value=move || old_password.get()
                        on:input=move |ev| old_password.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="new-password">"New password"</label>
                    <input
                        type="password"
                        id="new-password"
                        autocomplete="new-password"
                        prop:value=move || new_password.get()
                        on:input=move |ev| new_password.set(event_target_value(&ev))
                    />
                    {move || strength().map(|s| view! {
                        <div class="strength-meter">
                            {(1..=3).map(|i| view! {
                                <span class="strength-meter__bar" class:strength-meter__bar--on={i <= s.level()}></span>
                            }).collect_view()}
                            <span class="strength-meter__label">{s.label()}</span>
                        </div>
                    })}
                </div>
                <div class="form-group">
                    <label for="confirm-password">"Confirm new password"</label>
                    <input
                        type="password"
                        id="confirm-password"
                        autocomplete="new-password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                </div>
                <button type="submit" class="btn-primary" disabled=move || is_saving.get()>
                    "Update password"
                </button>
            </form>
        </section>

        <section class="profile-section">
            <h3>"Signed-in devices"</h3>
            {move || match devices.get() {
                None => view! { <Spinner /> }.into_any(),
                Some(list) if list.is_empty() => view! { <p class="page__muted">"No other devices."</p> }.into_any(),
                Some(list) => view! {
                    <ul class="device-list">
                        {list.into_iter().map(|device| {
                            let id = device.id.clone();
                            view! {
                                <li class="device-list__item">
                                    {crate::shared::icons::icon("monitor")}
                                    <div>
                                        <strong>{device.name}</strong>
                                        <p class="page__muted">
                                            {format!("{} · {} · {}", device.location, device.ip, format_relative(&device.last_active, Utc::now()))}
                                        </p>
                                    </div>
                                    {if device.current {
                                        view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"This device"</Badge> }.into_any()
                                    } else {
                                        view! {
                                            <button class="btn-secondary" on:click=move |_| revoke(id.clone())>"Sign out"</button>
                                        }.into_any()
                                    }}
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                }.into_any(),
            }}
        </section>
    }
}

#[component]
fn NotificationsTab() -> impl IntoView {
    let service = use_profile_service();
    let notifier = use_notifier();

    let defaults = NotificationSettings::default();
    let email = RwSignal::new(defaults.email);
    let sms = RwSignal::new(defaults.sms);
    let push = RwSignal::new(defaults.push);
    let security_alerts = RwSignal::new(defaults.security_alerts);
    let product_updates = RwSignal::new(defaults.product_updates);
    let mode = RwSignal::new(defaults.mode);
    let loaded = RwSignal::new(false);

    {
        let service = service.get_value();
        spawn_local(async move {
            match service.get_notification_settings().await {
                Ok(settings) => {
                    let _ = email.try_set(settings.email);
                    let _ = sms.try_set(settings.sms);
                    let _ = push.try_set(settings.push);
                    let _ = security_alerts.try_set(settings.security_alerts);
                    let _ = product_updates.try_set(settings.product_updates);
                    let _ = mode.try_set(settings.mode);
                }
                Err(e) => notifier.error(format!("Failed to load notification settings: {}", e)),
            }
            let _ = loaded.try_set(true);
        });
    }

    let save = move |_: leptos::ev::MouseEvent| {
        let settings = NotificationSettings {
            email: email.get_untracked(),
            sms: sms.get_untracked(),
            push: push.get_untracked(),
            security_alerts: security_alerts.get_untracked(),
            product_updates: product_updates.get_untracked(),
            mode: mode.get_untracked(),
        };
        let service = service.get_value();
        spawn_local(async move {
            match service.update_notification_settings(&settings).await {
                Ok(()) => notifier.success("Notification settings saved"),
                Err(e) => notifier.error(format!("Failed to save notification settings: {}", e)),
            }
        });
    };

    view! {
        <Show when=move || loaded.get() fallback=|| view! { <Spinner /> }>
            <section class="profile-section">
                <h3>"Channels"</h3>
                <Flex vertical=true gap=FlexGap::Medium>
                    <Switch checked=email label="Email" />
                    <Switch checked=sms label="SMS" />
                    <Switch checked=push label="Push" />
                </Flex>

                <h3>"Topics"</h3>
                <Flex vertical=true gap=FlexGap::Medium>
                    <Checkbox checked=security_alerts label="Security alerts" />
                    <Checkbox checked=product_updates label="Product updates" />
                </Flex>

                <h3>"Delivery"</h3>
                <div class="segmented">
                    {[
                        (NotificationMode::All, "Everything"),
                        (NotificationMode::Important, "Important only"),
                        (NotificationMode::None, "Nothing"),
                    ]
                        .into_iter()
                        .map(|(value, label)| view! {
                            <button
                                class="segmented__item"
                                class:segmented__item--active=move || mode.get() == value
                                on:click=move |_| mode.set(value)
                            >
                                {label}
                            </button>
                        })
                        .collect_view()}
                </div>

                <div class="form-actions">
                    <Button appearance=ButtonAppearance::Primary on_click=save>"Save"</Button>
                </div>
            </section>
        </Show>
    }
}

#[component]
fn ApiTokensTab() -> impl IntoView {
    let service = use_profile_service();
    let notifier = use_notifier();

    let tokens = RwSignal::new(Option::<Vec<ApiToken>>::None);
    let new_name = RwSignal::new(String::new());
    let created = RwSignal::new(Option::<CreatedApiToken>::None);

    {
        let service = service.get_value();
        spawn_local(async move {
            match service.list_api_tokens().await {
                Ok(list) => {
                    let _ = tokens.try_set(Some(list));
                }
                Err(e) => notifier.error(format!("Failed to load API tokens: {}", e)),
            }
        });
    }

    let create = move |_: leptos::ev::MouseEvent| {
        let name = new_name.get_untracked();
        if let Err(e) = require(&name, "token name") {
            notifier.error(e.to_string());
            return;
        }
        let service = service.get_value();
        spawn_local(async move {
            match service.create_api_token(&name).await {
                Ok(token) => {
                    let _ = tokens.try_update(|t| t.get_or_insert_with(Vec::new).insert(0, token.meta.clone()));
                    let _ = created.try_set(Some(token));
                    let _ = new_name.try_set(String::new());
                }
                Err(e) => notifier.error(format!("Failed to create token: {}", e)),
            }
        });
    };

    let revoke = move |id: String| {
        let service = service.get_value();
        spawn_local(async move {
            match service.revoke_api_token(&id).await {
                Ok(()) => {
                    let _ = tokens.try_update(|t| {
                        if let Some(list) = t.as_mut() {
                            list.retain(|tok| tok.id != id);
                        }
                    });
                    notifier.success("Token revoked");
                }
                Err(e) => notifier.error(format!("Failed to revoke token: {}", e)),
            }
        });
    };

    view! {
        <section class="profile-section">
            <h3>"Create token"</h3>
            <Flex gap=FlexGap::Small>
                <Input value=new_name placeholder="Token name" />
                <Button appearance=ButtonAppearance::Primary on_click=create>"Create"</Button>
            </Flex>

            {move || created.get().map(|token| view! {
                <div class="token-created">
                    <p>"Copy this token now. It will not be shown again."</p>
                    <code>{token.token}</code>
                    <button class="btn-secondary" on:click=move |_| created.set(None)>"Done"</button>
                </div>
            })}
        </section>

        <section class="profile-section">
            <h3>"Active tokens"</h3>
            {move || match tokens.get() {
                None => view! { <Spinner /> }.into_any(),
                Some(list) if list.is_empty() => view! { <p class="page__muted">"No API tokens."</p> }.into_any(),
                Some(list) => view! {
                    <table class="table">
                        <thead>
                            <tr><th>"Name"</th><th>"Token"</th><th>"Created"</th><th>"Last used"</th><th></th></tr>
                        </thead>
                        <tbody>
                            {list.into_iter().map(|token| {
                                let id = token.id.clone();
                                view! {
                                    <tr>
                                        <td>{token.name}</td>
                                        <td><code>{token.token_preview}</code></td>
                                        <td>{format_datetime(&token.created_at)}</td>
                                        <td>{token.last_used.map(|t| format_relative(&t, Utc::now())).unwrap_or_else(|| "never".to_string())}</td>
                                        <td><button class="btn-secondary" on:click=move |_| revoke(id.clone())>"Revoke"</button></td>
                                    </tr>
                                }
                            }).collect_view()}
                        </tbody>
                    </table>
                }.into_any(),
            }}
        </section>
    }
}
