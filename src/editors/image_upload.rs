use crate::api::{ApiError, HttpUploader, UploadService};
use crate::components::hooks::is_mounted;
use crate::components::ui::{Input, Label, Spinner};
use crate::state::{AppContext, ToastKind};
use leptos::logging::error;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

async fn read_file(file: &web_sys::File) -> Result<Vec<u8>, ApiError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ApiError::parse(format!("could not read file: {:?}", e)))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

async fn upload_file(file: web_sys::File) -> Result<String, ApiError> {
    let bytes = read_file(&file).await?;
    HttpUploader::from_session().upload(&file.name(), bytes).await
}

/// Image URL field with a file picker that uploads and fills in the hosted URL.
#[component]
pub fn ImageUploadField(
    #[prop(into)] label: String,
    #[prop(optional)] required: bool,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_value: Callback<String>,
) -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let uploading = RwSignal::new(false);
    let mounted = StoredValue::new(());

    let on_file = move |ev: web_sys::Event| {
        let Some(file) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
        else {
            return;
        };
        if !file.type_().starts_with("image/") {
            app_state.notify(ToastKind::Error, "Please select an image file");
            return;
        }

        uploading.set(true);
        spawn_local(async move {
            match upload_file(file).await {
                Ok(url) => {
                    if !is_mounted(mounted) {
                        return;
                    }
                    on_value.run(url);
                    app_state.notify(ToastKind::Success, "Image uploaded successfully");
                }
                Err(e) => {
                    error!("image upload failed: {}", e);
                    app_state.notify(ToastKind::Error, format!("Image upload failed: {}", e));
                }
            }
            uploading.try_set(false);
        });
    };

    view! {
        <div class="flex flex-col gap-1.5">
            <Label required=required>{label}</Label>
            <div class="flex items-center gap-2">
                <Input value=value on_value=on_value placeholder="https://..." />
                <input
                    type="file"
                    accept="image/*"
                    class="max-w-56 text-xs"
                    disabled=move || uploading.get()
                    on:change=on_file
                />
                <Show when=move || uploading.get()>
                    <Spinner />
                </Show>
            </div>
            <Show when=move || !value.get().trim().is_empty()>
                <img src=move || value.get() alt="preview" class="mt-1 max-h-40 w-fit rounded-md border object-cover" />
            </Show>
        </div>
    }
}
