//! アップロードエリアコンポーネント
//!
//! 画像は1枚だけ。選択し直すと前の画像は置き換わる。

use leptos::html;
use leptos::prelude::*;
use plant_doctor_common::{DataUrlDecoder, Error, ImageFile, Session, SessionView};
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, File, FileReader};

#[component]
pub fn UploadArea(session: RwSignal<Session>, view_state: Memo<SessionView>) -> impl IntoView {
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref = NodeRef::<html::Input>::new();

    let on_change = move |_: web_sys::Event| {
        let Some(input) = input_ref.get_untracked() else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            read_file(file, session);
        }
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);

        if let Some(file) = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
        {
            read_file(file, session);
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    // ファイル選択ダイアログを開く
    let on_click = move |_| {
        if let Some(input) = input_ref.get_untracked() {
            input.click();
        }
    };

    let on_remove = move |_| {
        // 同じファイルを選び直しても change が発火するように
        if let Some(input) = input_ref.get_untracked() {
            input.set_value("");
        }
        session.update(Session::remove_image);
    };

    let preview_src = move || view_state.with(|v| v.preview.clone().unwrap_or_default());
    let file_name = move || view_state.with(|v| v.file_name.clone().unwrap_or_default());

    view! {
        <div class="upload-section">
            <input
                type="file"
                accept="image/*"
                class="hidden"
                node_ref=input_ref
                on:change=on_change
            />

            <div
                class="upload-area"
                class:dragover=move || is_dragover.get()
                class:hidden=move || !view_state.with(|v| v.upload_prompt_visible)
                on:drop=on_drop
                on:dragover=on_dragover
                on:dragleave=on_dragleave
                on:click=on_click
            >
                <div class="upload-icon">"📷"</div>
                <p>"Drop a photo of the affected leaf here or click to choose"</p>
                <p class="text-muted">"Any image your browser can display"</p>
            </div>

            <div
                class="preview-container"
                class:hidden=move || view_state.with(|v| v.preview.is_none())
            >
                <img class="image-preview" src=preview_src alt=file_name />
                <button class="remove-btn" title="Remove image" on:click=on_remove>
                    "✕"
                </button>
            </div>
        </div>
    }
}

/// 読み込み失敗をエラーパネルに出す
fn reject(session: RwSignal<Session>, file_name: &str, reason: &str) {
    gloo::console::warn!(format!("{}: {}", file_name, reason));
    let err = Error::Preview(format!("{}: {}", file_name, reason));
    session.update(|s| s.reject_selection(&err));
}

/// FileReaderでデータURLにしてからセッションに渡す
fn read_file(file: File, session: RwSignal<Session>) {
    let file_name = file.name();

    let Ok(reader) = FileReader::new() else {
        reject(session, &file_name, "FileReader is not available");
        return;
    };

    let declared_type = file.type_();
    let reader_clone = reader.clone();
    let onload_name = file_name.clone();
    let onload = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        let Some(data_url) = reader_clone.result().ok().and_then(|r| r.as_string()) else {
            reject(session, &onload_name, "could not read file");
            return;
        };

        let image = match ImageFile::from_data_url(&onload_name, &declared_type, &data_url) {
            Ok(image) => image,
            Err(err) => {
                gloo::console::warn!(err.to_string());
                session.update(|s| s.reject_selection(&err));
                return;
            }
        };
        // デコード失敗時のバナーは select_image が出す
        if let Some(Err(err)) =
            session.try_update(|s| s.select_image(image, &DataUrlDecoder).map(|_| ()))
        {
            gloo::console::warn!(err.to_string());
        }
    }) as Box<dyn FnMut(_)>);

    let onerror_name = file_name.clone();
    let onerror = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        reject(session, &onerror_name, "could not read file");
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onload.forget();
    onerror.forget();

    if reader.read_as_data_url(&file).is_err() {
        reject(session, &file_name, "could not read file");
    }
}
