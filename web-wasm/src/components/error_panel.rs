//! エラー表示

use leptos::prelude::*;
use plant_doctor_common::SessionView;

#[component]
pub fn ErrorPanel(view_state: Memo<SessionView>) -> impl IntoView {
    let banner = move || {
        view_state.with(|v| {
            v.error_banner
                .as_ref()
                .map(|b| format!("⚠️ {}", b))
                .unwrap_or_default()
        })
    };

    view! {
        <div
            class="error-container"
            class:hidden=move || view_state.with(|v| v.error_banner.is_none())
        >
            {banner}
        </div>
    }
}
