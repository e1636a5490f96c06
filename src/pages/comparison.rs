use super::{use_editor_document, LoadingGate, SaveBar, TextField};
use crate::api::Collection;
use crate::components::hooks::{use_submit, SaveNotice};
use crate::drafts::ComparisonDraft;
use crate::editors::{
    bind_text, AuthorSelect, BlogModulesEditor, FeaturesEditor, ImageUploadField,
    MoreComparisonsEditor, ProsConsEditor, ToolBlogCardsEditor, ToolsMentionedEditor,
};
use crate::models::{
    BlogModuleEntry, BlogSection, ComparisonSummary, FeaturesData, ProsConsCard, ToolChip,
};
use crate::submit::SaveMode;
use leptos::prelude::*;

fn comparison_notice(mode: SaveMode, is_edit: bool) -> SaveNotice {
    let message = match (mode, is_edit) {
        (SaveMode::Draft, true) => "Comparison draft updated successfully!",
        (SaveMode::Draft, false) => "Comparison draft saved successfully!",
        (SaveMode::Publish, true) => "Comparison updated successfully!",
        (SaveMode::Publish, false) => "Comparison created successfully!",
    };
    SaveNotice {
        message: message.to_string(),
        links: vec![],
        redirect_to: "/comparisons",
    }
}

#[component]
fn Section(#[prop(into)] title: String, children: Children) -> impl IntoView {
    view! {
        <section class="flex flex-col gap-3 rounded-lg border p-4">
            <h2 class="text-sm font-semibold">{title}</h2>
            {children()}
        </section>
    }
}

#[component]
pub fn ComparisonEditorPage() -> impl IntoView {
    let editor = use_editor_document(Collection::Comparisons, "Comparison", |raw| {
        ComparisonDraft::hydrate(raw).map_err(|e| e.to_string())
    });
    let doc = editor.doc;
    let submitter = use_submit();

    let (heading, set_heading) =
        bind_text(doc, |d| d.hero_heading.clone(), |d, v| d.set_heading(&v));
    let (hero_body, set_hero_body) =
        bind_text(doc, |d| d.hero_body.clone(), |d, v| d.hero_body = v);
    let (hero_image, set_hero_image) = bind_text(
        doc,
        |d| d.comparison_hero_image.clone(),
        |d, v| d.comparison_hero_image = v,
    );
    let (page_type, set_page_type) =
        bind_text(doc, |d| d.page_type.clone(), |d, v| d.page_type = v);
    let (headline, set_headline) =
        bind_text(doc, |d| d.section_headline.clone(), |d, v| d.section_headline = v);
    let (tip, set_tip) = bind_text(doc, |d| d.tip_bulb_text.clone(), |d, v| d.tip_bulb_text = v);
    let (author, set_author) = bind_text(doc, |d| d.author_id.clone(), |d, v| d.author_id = v);
    let (category, set_category) =
        bind_text(doc, |d| d.blog_category.clone(), |d, v| d.blog_category = v);
    let (reading_time, set_reading_time) =
        bind_text(doc, |d| d.reading_time.clone(), |d, v| d.reading_time = v);
    let (more_title, set_more_title) = bind_text(
        doc,
        |d| d.more_comparisons_section_title.clone(),
        |d, v| d.more_comparisons_section_title = v,
    );
    let slug = move || doc.with(|d| d.slug.clone());

    let save = move |mode: SaveMode| {
        let notice = comparison_notice(mode, editor.record_id.get_untracked().is_some());
        submitter.save(doc.get_untracked(), mode, notice);
    };

    let title = move || if editor.is_edit() { "Edit Comparison" } else { "New Comparison" };
    let publish_label = Signal::derive(move || {
        if editor.is_edit() { "Update & Publish" } else { "Publish" }.to_string()
    });

    let tools = editor.slice(ComparisonDraft::tool_chips);
    let set_tools = editor.setter(|d, tools: Vec<ToolChip>| d.set_tools(&tools));
    let cards = editor.slice(|d| d.tool_blog_cards.clone());
    let set_cards = editor.setter(|d, cards: Vec<BlogSection>| d.tool_blog_cards = cards);
    let features = editor.slice(|d| d.features_comparison.clone());
    let set_features = editor.setter(|d, f: FeaturesData| d.features_comparison = f);
    let pros_cons = editor.slice(|d| d.pros_cons_cards.clone());
    let set_pros_cons = editor.setter(|d, cards: Vec<ProsConsCard>| d.pros_cons_cards = cards);
    let modules = editor.slice(|d| d.blog_modules.clone());
    let set_modules = editor.setter(|d, modules: Vec<BlogModuleEntry>| d.blog_modules = modules);
    let more = editor.slice(|d| d.more_comparisons.clone());
    let set_more = editor.setter(|d, picked: Vec<ComparisonSummary>| d.more_comparisons = picked);

    view! {
        <div class="flex flex-col gap-6">
            <h1 class="text-xl font-semibold">{title}</h1>
            <LoadingGate loaded=editor.loaded>
                <div class="flex flex-col gap-4">
                    <Section title="Hero">
                        <TextField label="Page Type" value=page_type on_value=set_page_type />
                        <TextField label="Hero Heading" required=true value=heading on_value=set_heading />
                        <p class="text-xs text-muted-foreground">"Slug: " {slug}</p>
                        <TextField label="Hero Body" required=true multiline=true value=hero_body on_value=set_hero_body />
                        <ImageUploadField label="Hero Image" value=hero_image on_value=set_hero_image />
                        <TextField label="Section Headline" required=true value=headline on_value=set_headline />
                        <TextField label="Tip Bulb Text" required=true value=tip on_value=set_tip />
                        <AuthorSelect value=author on_value=set_author />
                        <div class="grid grid-cols-2 gap-3">
                            <TextField label="Blog Category" required=true value=category on_value=set_category />
                            <TextField label="Reading Time" required=true value=reading_time on_value=set_reading_time />
                        </div>
                    </Section>
                    <Section title="Tools Mentioned">
                        <ToolsMentionedEditor initial=tools on_change=set_tools />
                    </Section>
                    <Section title="Tool Blog Cards">
                        <ToolBlogCardsEditor initial=cards on_change=set_cards />
                    </Section>
                    <Section title="Features Comparison">
                        <FeaturesEditor initial=features on_change=set_features />
                    </Section>
                    <Section title="Pros & Cons">
                        <ProsConsEditor initial=pros_cons on_change=set_pros_cons />
                    </Section>
                    <Section title="Modules">
                        <BlogModulesEditor initial=modules on_change=set_modules />
                    </Section>
                    <Section title="More Comparisons">
                        <TextField label="Section Title" value=more_title on_value=set_more_title />
                        <MoreComparisonsEditor initial=more on_change=set_more exclude_id=editor.record_id />
                    </Section>
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
    fn test_notice_distinguishes_create_and_update() {
        assert_eq!(
            comparison_notice(SaveMode::Publish, false).message,
            "Comparison created successfully!"
        );
        assert_eq!(
            comparison_notice(SaveMode::Publish, true).message,
            "Comparison updated successfully!"
        );
        assert_eq!(comparison_notice(SaveMode::Draft, true).redirect_to, "/comparisons");
    }
}
