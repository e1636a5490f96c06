use super::{use_editor_document, LoadingGate, TextField};
use crate::api::Collection;
use crate::components::hooks::{use_submit, SaveNotice};
use crate::components::ui::{Button, ButtonVariant, Spinner};
use crate::drafts::AuthorDraft;
use crate::editors::{bind_text, ImageUploadField};
use crate::submit::SaveMode;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

fn author_notice(is_edit: bool) -> SaveNotice {
    let message = if is_edit {
        "Author updated successfully!"
    } else {
        "Author created successfully!"
    };
    SaveNotice {
        message: message.to_string(),
        links: vec![],
        redirect_to: "/authors",
    }
}

#[component]
pub fn AuthorEditorPage() -> impl IntoView {
    let editor = use_editor_document(Collection::Authors, "Author", |raw| {
        AuthorDraft::hydrate(raw).map_err(|e| e.to_string())
    });
    let doc = editor.doc;
    let submitter = use_submit();
    let navigate = StoredValue::new(use_navigate());

    let (title, set_title) = bind_text(doc, |d| d.author_title.clone(), |d, v| d.author_title = v);
    let (name, set_name) = bind_text(doc, |d| d.author_name.clone(), |d, v| d.author_name = v);
    let (industry, set_industry) =
        bind_text(doc, |d| d.author_industry.clone(), |d, v| d.author_industry = v);
    let (profile, set_profile) = bind_text(
        doc,
        |d| d.author_view_profile_url.clone(),
        |d, v| d.author_view_profile_url = v,
    );
    let (description, set_description) =
        bind_text(doc, |d| d.author_description.clone(), |d, v| d.author_description = v);
    let (image, set_image) =
        bind_text(doc, |d| d.author_image_url.clone(), |d, v| d.author_image_url = v);
    let (x_account, set_x_account) =
        bind_text(doc, |d| d.author_x_account.clone(), |d, v| d.author_x_account = v);
    let (ig_account, set_ig_account) =
        bind_text(doc, |d| d.author_ig_account.clone(), |d, v| d.author_ig_account = v);
    let (linkedin, set_linkedin) = bind_text(
        doc,
        |d| d.author_linkedin_account.clone(),
        |d, v| d.author_linkedin_account = v,
    );

    // Authors have no draft state; every save is validated.
    let save = move |_| {
        let notice = author_notice(editor.record_id.get_untracked().is_some());
        submitter.save(doc.get_untracked(), SaveMode::Publish, notice);
    };
    let heading = move || if editor.is_edit() { "Edit Author" } else { "Add Author" };

    view! {
        <div class="flex flex-col gap-6">
            <h1 class="text-xl font-semibold">{heading}</h1>
            <LoadingGate loaded=editor.loaded>
                <div class="flex flex-col gap-4">
                    <div class="grid grid-cols-2 gap-3">
                        <TextField label="Title" required=true placeholder="e.g. Senior Editor" value=title on_value=set_title />
                        <TextField label="Name" required=true value=name on_value=set_name />
                        <TextField label="Industry" required=true value=industry on_value=set_industry />
                        <TextField label="Profile URL" required=true value=profile on_value=set_profile />
                    </div>
                    <TextField label="Description" required=true multiline=true value=description on_value=set_description />
                    <ImageUploadField label="Author Image" value=image on_value=set_image />
                    <div class="grid grid-cols-3 gap-3">
                        <TextField label="X Account" value=x_account on_value=set_x_account />
                        <TextField label="Instagram Account" value=ig_account on_value=set_ig_account />
                        <TextField label="LinkedIn Account" value=linkedin on_value=set_linkedin />
                    </div>
                    <div class="sticky bottom-0 flex justify-end gap-2 border-t bg-background py-3">
                        <Button
                            variant=ButtonVariant::Outline
                            on:click=move |_| navigate.with_value(|nav| nav("/authors", Default::default()))
                        >
                            "Cancel"
                        </Button>
                        <Button attr:disabled=move || submitter.busy.get() on:click=save>
                            <Show when=move || submitter.busy.get()>
                                <Spinner />
                            </Show>
                            "Save Author"
                        </Button>
                    </div>
                </div>
            </LoadingGate>
        </div>
    }
}
