use super::{use_editor_document, LoadingGate, SaveBar, TextField};
use crate::api::{Collection, EnvConfig};
use crate::components::hooks::{use_submit, SaveNotice};
use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::drafts::BlogDraft;
use crate::editors::{
    bind_text, AuthorSelect, BenefitModulesEditor, ImageUploadField, ToolBlogCardsEditor,
    ToolsMentionedEditor,
};
use crate::models::{BenefitModule, BlogSection, ToolChip};
use crate::state::ToastLink;
use crate::submit::SaveMode;
use leptos::prelude::*;

fn blog_notice(env: &EnvConfig, draft: &BlogDraft, mode: SaveMode, is_edit: bool) -> SaveNotice {
    let message = match (mode, is_edit) {
        (SaveMode::Draft, _) => "Blog saved as draft successfully!",
        (SaveMode::Publish, true) => "Blog updated and published successfully!",
        (SaveMode::Publish, false) => "Blog published successfully!",
    };
    let links = env
        .blog_url(&draft.blog_slug)
        .map(|url| ToastLink {
            text: "View Blog".to_string(),
            url,
            external: true,
        })
        .into_iter()
        .collect();
    SaveNotice {
        message: message.to_string(),
        links,
        redirect_to: "/blogs",
    }
}

#[component]
pub fn BlogEditorPage() -> impl IntoView {
    let editor = use_editor_document(Collection::Blogs, "Blog", |raw| {
        BlogDraft::hydrate(raw).map_err(|e| e.to_string())
    });
    let doc = editor.doc;
    let submitter = use_submit();

    let (heading, set_heading) =
        bind_text(doc, |d| d.blog_heading.clone(), |d, v| d.set_heading(&v));
    let (body, set_body) = bind_text(doc, |d| d.blog_body.clone(), |d, v| d.blog_body = v);
    let (hero, set_hero) =
        bind_text(doc, |d| d.blog_hero_image.clone(), |d, v| d.blog_hero_image = v);
    let (headline, set_headline) =
        bind_text(doc, |d| d.section_headline.clone(), |d, v| d.section_headline = v);
    let (tip, set_tip) = bind_text(doc, |d| d.tip_bulb_text.clone(), |d, v| d.tip_bulb_text = v);
    let (author, set_author) = bind_text(doc, |d| d.blog_author.clone(), |d, v| d.blog_author = v);
    let (category, set_category) =
        bind_text(doc, |d| d.blog_category.clone(), |d, v| d.blog_category = v);
    let (reading_time, set_reading_time) =
        bind_text(doc, |d| d.blog_reading_time.clone(), |d, v| d.blog_reading_time = v);
    let (more_title, set_more_title) = bind_text(
        doc,
        |d| d.more_blogs_section_title.clone(),
        |d, v| d.more_blogs_section_title = v,
    );
    let slug = move || doc.with(|d| d.blog_slug.clone());

    let save = move |mode: SaveMode| {
        let draft = doc.get_untracked();
        let is_edit = editor.record_id.get_untracked().is_some();
        let notice = blog_notice(&EnvConfig::new(), &draft, mode, is_edit);
        submitter.save(draft, mode, notice);
    };

    let title = move || if editor.is_edit() { "Edit Blog" } else { "New Blog" };
    let publish_label = Signal::derive(move || {
        if editor.is_edit() { "Update & Publish" } else { "Publish" }.to_string()
    });

    let tools = editor.slice(BlogDraft::tool_chips);
    let set_tools = editor.setter(|d, tools: Vec<ToolChip>| d.set_tools(&tools));
    let modules = editor.slice(|d| d.modules.clone());
    let set_modules = editor.setter(|d, modules: Vec<BenefitModule>| d.modules = modules);
    let cards = editor.slice(|d| d.blog_tool_blog_cards.clone());
    let set_cards = editor.setter(|d, cards: Vec<BlogSection>| d.blog_tool_blog_cards = cards);

    view! {
        <div class="flex flex-col gap-6">
            <h1 class="text-xl font-semibold">{title}</h1>
            <LoadingGate loaded=editor.loaded>
                <div class="flex flex-col gap-4">
                    <ImageUploadField label="Hero Image" required=true value=hero on_value=set_hero />
                    <TextField label="Blog Heading" required=true value=heading on_value=set_heading />
                    <p class="text-xs text-muted-foreground">"Slug: " {slug}</p>
                    <TextField label="Blog Body" required=true multiline=true value=body on_value=set_body />
                    <TextField label="Section Headline" required=true value=headline on_value=set_headline />
                    <TextField label="Tip Bulb Text" required=true value=tip on_value=set_tip />
                    <AuthorSelect value=author on_value=set_author />
                    <div class="grid grid-cols-2 gap-3">
                        <TextField label="Category" required=true value=category on_value=set_category />
                        <TextField label="Reading Time" required=true value=reading_time on_value=set_reading_time />
                    </div>
                    <ToolsMentionedEditor initial=tools on_change=set_tools />
                    <BenefitModulesEditor initial=modules on_change=set_modules />
                    <h2 class="text-sm font-semibold">"Tool Blog Cards"</h2>
                    <ToolBlogCardsEditor initial=cards on_change=set_cards />
                    <div class="flex items-end gap-2">
                        <div class="flex-1">
                            <TextField label="More Blogs Section Title" value=more_title on_value=set_more_title />
                        </div>
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            on:click=move |_| doc.update(BlogDraft::clear_more_blogs)
                        >
                            "Clear Section"
                        </Button>
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
    fn test_notice_messages_follow_mode() {
        let env = EnvConfig::from_parts(None, None);
        let draft = BlogDraft::default();
        assert_eq!(
            blog_notice(&env, &draft, SaveMode::Draft, true).message,
            "Blog saved as draft successfully!"
        );
        assert_eq!(
            blog_notice(&env, &draft, SaveMode::Publish, true).message,
            "Blog updated and published successfully!"
        );
        let created = blog_notice(&env, &draft, SaveMode::Publish, false);
        assert_eq!(created.redirect_to, "/blogs");
        assert!(created.links.is_empty());
    }

    #[test]
    fn test_notice_links_to_public_blog_page() {
        let env = EnvConfig::from_parts(None, None).with_site_url(Some("https://perkpilot.io/"));
        let mut draft = BlogDraft::default();
        draft.set_heading("Best Notes Apps");

        let notice = blog_notice(&env, &draft, SaveMode::Publish, false);
        assert_eq!(notice.links.len(), 1);
        assert_eq!(notice.links[0].text, "View Blog");
        assert_eq!(notice.links[0].url, "https://perkpilot.io/blog/best-notes-apps");
        assert!(notice.links[0].external);
    }
}
