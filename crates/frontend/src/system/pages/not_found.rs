use leptos::prelude::*;
use leptos_router::components::A;

use crate::routes::definitions::HOME_PATH;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="page page-not-found">
            <h1>"404"</h1>
            <p>"The page you are looking for does not exist."</p>
            <A href=HOME_PATH>"Back to dashboard"</A>
        </div>
    }
}
