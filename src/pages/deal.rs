use super::{use_editor_document, LoadingGate, SaveBar, TextField};
use crate::api::Collection;
use crate::components::hooks::{use_submit, SaveNotice};
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Input};
use crate::drafts::DealDraft;
use crate::editors::{bind_text, ImageUploadField};
use crate::submit::SaveMode;
use icons::X;
use leptos::prelude::*;

fn deal_notice(mode: SaveMode, is_edit: bool) -> SaveNotice {
    let message = match (mode, is_edit) {
        (SaveMode::Draft, _) => "Deal saved as draft successfully!",
        (SaveMode::Publish, true) => "Deal updated successfully!",
        (SaveMode::Publish, false) => "Deal created successfully!",
    };
    SaveNotice {
        message: message.to_string(),
        links: vec![],
        redirect_to: "/deals",
    }
}

#[component]
fn FeatureInput(doc: RwSignal<DealDraft>, idx: usize) -> impl IntoView {
    let value =
        Signal::derive(move || doc.with(|d| d.features.get(idx).cloned().unwrap_or_default()));
    let on_value = Callback::new(move |v: String| {
        doc.update(|d| {
            if let Some(feature) = d.features.get_mut(idx) {
                *feature = v;
            }
        })
    });

    view! {
        <div class="flex items-center gap-2">
            <Input placeholder="Feature" value=value on_value=on_value />
            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Icon
                on:click=move |_| doc.update(|d| d.remove_feature(idx))
            >
                <X />
            </Button>
        </div>
    }
}

#[component]
pub fn DealEditorPage() -> impl IntoView {
    let editor = use_editor_document(Collection::Deals, "Deal", |raw| Ok(DealDraft::hydrate(&raw)));
    let doc = editor.doc;
    let submitter = use_submit();

    let (name, set_name) = bind_text(doc, |d| d.tool_name.clone(), |d, v| d.tool_name = v);
    let (category, set_category) =
        bind_text(doc, |d| d.tool_category.clone(), |d, v| d.tool_category = v);
    let (description, set_description) =
        bind_text(doc, |d| d.tool_description.clone(), |d, v| d.tool_description = v);
    let (badge, set_badge) = bind_text(doc, |d| d.deal_badge.clone(), |d, v| d.deal_badge = v);
    let (rating, set_rating) = bind_text(doc, |d| d.rating.clone(), |d, v| d.rating = v);
    let (savings, set_savings) =
        bind_text(doc, |d| d.save_upto_amount.clone(), |d, v| d.save_upto_amount = v);
    let (discount, set_discount) =
        bind_text(doc, |d| d.discount_value.clone(), |d, v| d.discount_value = v);
    let (logo, set_logo) = bind_text(doc, |d| d.logo_uri.clone(), |d, v| d.logo_uri = v);
    let (primary_text, set_primary_text) =
        bind_text(doc, |d| d.primary_cta_text.clone(), |d, v| d.primary_cta_text = v);
    let (primary_link, set_primary_link) =
        bind_text(doc, |d| d.primary_cta_link.clone(), |d, v| d.primary_cta_link = v);
    let (secondary_text, set_secondary_text) =
        bind_text(doc, |d| d.secondary_cta_text.clone(), |d, v| d.secondary_cta_text = v);
    let (secondary_link, set_secondary_link) =
        bind_text(doc, |d| d.secondary_cta_link.clone(), |d, v| d.secondary_cta_link = v);

    let feature_count = Memo::new(move |_| doc.with(|d| d.features.len()));

    let save = move |mode: SaveMode| {
        let notice = deal_notice(mode, editor.record_id.get_untracked().is_some());
        submitter.save(doc.get_untracked(), mode, notice);
    };

    let title = move || if editor.is_edit() { "Edit Deal" } else { "New Deal" };
    let publish_label = Signal::derive(move || {
        if editor.is_edit() { "Update Deal" } else { "Publish" }.to_string()
    });

    view! {
        <div class="flex flex-col gap-6">
            <h1 class="text-xl font-semibold">{title}</h1>
            <LoadingGate loaded=editor.loaded>
                <div class="flex flex-col gap-4">
                    <div class="grid grid-cols-2 gap-3">
                        <TextField label="Tool Name" required=true value=name on_value=set_name />
                        <TextField label="Category" required=true value=category on_value=set_category />
                    </div>
                    <TextField label="Description" required=true multiline=true value=description on_value=set_description />
                    <ImageUploadField label="Logo" value=logo on_value=set_logo />
                    <div class="grid grid-cols-2 gap-3">
                        <TextField label="Deal Badge" placeholder="e.g. Exclusive" value=badge on_value=set_badge />
                        <TextField label="Rating" placeholder="4.5" value=rating on_value=set_rating />
                        <TextField label="Save Up To ($)" placeholder="250" value=savings on_value=set_savings />
                        <TextField label="Discount (%)" placeholder="30" value=discount on_value=set_discount />
                    </div>

                    <section class="flex flex-col gap-2 rounded-lg border p-4">
                        <h2 class="text-sm font-semibold">"Features"</h2>
                        {move || {
                            (0..feature_count.get())
                                .map(|idx| view! { <FeatureInput doc=doc idx=idx /> })
                                .collect_view()
                        }}
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            on:click=move |_| doc.update(DealDraft::add_feature)
                        >
                            "Add Feature"
                        </Button>
                    </section>

                    <div class="grid grid-cols-2 gap-3">
                        <TextField label="Primary CTA Text" value=primary_text on_value=set_primary_text />
                        <TextField label="Primary CTA Link" value=primary_link on_value=set_primary_link />
                        <TextField label="Secondary CTA Text" value=secondary_text on_value=set_secondary_text />
                        <TextField label="Secondary CTA Link" value=secondary_link on_value=set_secondary_link />
                    </div>

                    <SaveBar
                        busy=submitter.busy
                        on_draft=move |_: ()| save(SaveMode::Draft)
                        on_publish=move |_: ()| save(SaveMode::Publish)
                        publish_label=publish_label
                    />
                </div>
            </LoadingGate>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deal_notice() {
        assert_eq!(deal_notice(SaveMode::Publish, false).message, "Deal created successfully!");
        assert_eq!(deal_notice(SaveMode::Draft, true).message, "Deal saved as draft successfully!");
        assert_eq!(deal_notice(SaveMode::Publish, true).redirect_to, "/deals");
    }
}
