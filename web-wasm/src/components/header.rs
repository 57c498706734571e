//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"🌿 Plant Doctor"</h1>
            <p class="text-muted">"Upload a leaf photo to diagnose your plant"</p>
        </header>
    }
}
