use super::{use_editor_document, LoadingGate, SaveBar, TextField};
use crate::api::Collection;
use crate::components::hooks::{use_submit, SaveNotice};
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Input, Label};
use crate::drafts::{PricingPlan, ReviewDraft, ReviewFeature};
use crate::editors::bind_text;
use crate::models::{AlternativeReview, Faq, UseCase};
use crate::state::{AppContext, ToastKind};
use crate::submit::SaveMode;
use crate::util::parse_number;
use icons::X;
use leptos::prelude::*;

const DRAFT_NOT_STORED: &str = "Review drafts are not stored yet. Publish to save your changes.";

fn review_notice(is_edit: bool) -> SaveNotice {
    let message = if is_edit {
        "Review updated successfully!"
    } else {
        "Review published successfully!"
    };
    SaveNotice {
        message: message.to_string(),
        links: vec![],
        redirect_to: "/reviews",
    }
}

fn number_text(n: f64) -> String {
    if n == 0.0 {
        String::new()
    } else {
        n.to_string()
    }
}

fn optional_text(s: &Option<String>) -> String {
    s.clone().unwrap_or_default()
}

fn some_text(s: String) -> Option<String> {
    (!s.trim().is_empty()).then_some(s)
}

/// A list field of the review, addressed by a pair of accessors.
struct Rows<T: 'static> {
    doc: RwSignal<ReviewDraft>,
    read: fn(&ReviewDraft) -> &Vec<T>,
    write: fn(&mut ReviewDraft) -> &mut Vec<T>,
}

impl<T: 'static> Clone for Rows<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for Rows<T> {}

impl<T: Default + Clone + Send + Sync + 'static> Rows<T> {
    /// Row count; keystrokes inside a row do not change it, so rows are not rebuilt.
    fn len(&self) -> Memo<usize> {
        let (doc, read) = (self.doc, self.read);
        Memo::new(move |_| doc.with(|d| read(d).len()))
    }

    fn text(
        &self,
        idx: usize,
        get: fn(&T) -> String,
        set: fn(&mut T, String),
    ) -> (Signal<String>, Callback<String>) {
        let (doc, read, write) = (self.doc, self.read, self.write);
        (
            Signal::derive(move || doc.with(|d| read(d).get(idx).map(get).unwrap_or_default())),
            Callback::new(move |v: String| {
                doc.update(|d| {
                    if let Some(item) = write(d).get_mut(idx) {
                        set(item, v);
                    }
                })
            }),
        )
    }

    fn push(&self) {
        let write = self.write;
        self.doc.update(|d| write(d).push(T::default()));
    }

    fn remove(&self, idx: usize) {
        let write = self.write;
        self.doc.update(|d| {
            let items = write(d);
            if idx < items.len() {
                items.remove(idx);
            }
        });
    }
}

/// One text input per list entry, plus add/remove.
fn list_section<T>(
    rows: Rows<T>,
    title: &'static str,
    add_label: &'static str,
    render: fn(Rows<T>, usize) -> AnyView,
) -> impl IntoView
where
    T: Default + Clone + Send + Sync + 'static,
{
    let len = rows.len();
    view! {
        <section class="flex flex-col gap-2 rounded-lg border p-4">
            <h2 class="text-sm font-semibold">{title}</h2>
            {move || {
                (0..len.get())
                    .map(|idx| {
                        view! {
                            <div class="flex items-start gap-2">
                                <div class="flex flex-1 flex-col gap-2">{render(rows, idx)}</div>
                                <Button
                                    variant=ButtonVariant::Ghost
                                    size=ButtonSize::Icon
                                    on:click=move |_| rows.remove(idx)
                                >
                                    <X />
                                </Button>
                            </div>
                        }
                    })
                    .collect_view()
            }}
            <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=move |_| rows.push()>
                {add_label}
            </Button>
        </section>
    }
}

fn row_input<T>(
    rows: Rows<T>,
    idx: usize,
    placeholder: &'static str,
    get: fn(&T) -> String,
    set: fn(&mut T, String),
) -> impl IntoView
where
    T: Default + Clone + Send + Sync + 'static,
{
    let (value, on_value) = rows.text(idx, get, set);
    view! { <Input placeholder=placeholder value=value on_value=on_value /> }
}

fn string_row(rows: Rows<String>, idx: usize) -> AnyView {
    row_input(rows, idx, "Entry", |s| s.clone(), |s, v| *s = v).into_any()
}

fn feature_row(rows: Rows<ReviewFeature>, idx: usize) -> AnyView {
    view! {
        {row_input(rows, idx, "Feature title", |f| f.title.clone(), |f, v| f.title = v)}
        {row_input(rows, idx, "Description", |f| f.description.clone(), |f, v| f.description = v)}
    }
    .into_any()
}

fn pricing_row(rows: Rows<PricingPlan>, idx: usize) -> AnyView {
    view! {
        <div class="grid grid-cols-3 gap-2">
            {row_input(rows, idx, "Plan", |p| p.plan.clone(), |p, v| p.plan = v)}
            {row_input(rows, idx, "Amount", |p| p.amount.clone(), |p, v| p.amount = v)}
            {row_input(rows, idx, "Note", |p| p.note.clone(), |p, v| p.note = v)}
        </div>
    }
    .into_any()
}

fn faq_row(rows: Rows<Faq>, idx: usize) -> AnyView {
    view! {
        {row_input(rows, idx, "Question", |f| f.question.clone(), |f, v| f.question = v)}
        {row_input(rows, idx, "Answer", |f| f.answer.clone(), |f, v| f.answer = v)}
    }
    .into_any()
}

fn use_case_row(rows: Rows<UseCase>, idx: usize) -> AnyView {
    view! {
        {row_input(rows, idx, "Use case", |u| u.title.clone(), |u, v| u.title = v)}
        {row_input(rows, idx, "Description", |u| optional_text(&u.description), |u, v| u.description = some_text(v))}
        {row_input(
            rows,
            idx,
            "Rating (1-5)",
            |u| u.rating.map(number_text).unwrap_or_default(),
            |u, v| u.rating = parse_number(&v),
        )}
    }
    .into_any()
}

fn alternative_row(rows: Rows<AlternativeReview>, idx: usize) -> AnyView {
    view! {
        <div class="grid grid-cols-2 gap-2">
            {row_input(rows, idx, "Name", |a| a.name.clone(), |a, v| a.name = v)}
            {row_input(rows, idx, "Type", |a| optional_text(&a.kind), |a, v| a.kind = some_text(v))}
            {row_input(rows, idx, "Price", |a| optional_text(&a.price), |a, v| a.price = some_text(v))}
            {row_input(
                rows,
                idx,
                "Rating (1-5)",
                |a| a.rating.map(number_text).unwrap_or_default(),
                |a, v| a.rating = parse_number(&v),
            )}
        </div>
        {row_input(rows, idx, "Compare note", |a| optional_text(&a.compare_note), |a, v| a.compare_note = some_text(v))}
    }
    .into_any()
}

/// Numeric input that keeps the raw text while typing; the document gets the parsed value.
#[component]
fn NumberField(
    #[prop(into)] label: String,
    #[prop(optional)] required: bool,
    doc: RwSignal<ReviewDraft>,
    get: fn(&ReviewDraft) -> f64,
    set: fn(&mut ReviewDraft, f64),
) -> impl IntoView {
    let text = RwSignal::new(doc.with_untracked(|d| number_text(get(d))));
    let on_value = Callback::new(move |v: String| {
        let parsed = parse_number(&v).unwrap_or(0.0);
        text.set(v);
        doc.update(|d| set(d, parsed));
    });

    view! {
        <div class="flex flex-col gap-1.5">
            <Label required=required>{label}</Label>
            <Input r#type="number" value=text on_value=on_value />
        </div>
    }
}

#[component]
pub fn ReviewEditorPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let editor = use_editor_document(Collection::Reviews, "Review", |raw| {
        ReviewDraft::hydrate(raw).map_err(|e| e.to_string())
    });
    let doc = editor.doc;
    let submitter = use_submit();

    let (product_name, set_product_name) =
        bind_text(doc, |d| d.product_name.clone(), |d, v| d.product_name = v);
    let (product_type, set_product_type) =
        bind_text(doc, |d| d.product_type.clone(), |d, v| d.product_type = v);
    let (avatar, set_avatar) = bind_text(doc, |d| d.avatar_url.clone(), |d, v| d.avatar_url = v);
    let (description, set_description) =
        bind_text(doc, |d| d.description.clone(), |d, v| d.description = v);
    let (overview, set_overview) = bind_text(doc, |d| d.overview.clone(), |d, v| d.overview = v);
    let (user_name, set_user_name) =
        bind_text(doc, |d| d.user_name.clone(), |d, v| d.user_name = v);
    let (review_text, set_review_text) =
        bind_text(doc, |d| d.review_text.clone(), |d, v| d.review_text = v);

    let features = Rows { doc, read: |d| &d.features, write: |d| &mut d.features };
    let pricing = Rows { doc, read: |d| &d.pricing, write: |d| &mut d.pricing };
    let pros = Rows { doc, read: |d| &d.pros, write: |d| &mut d.pros };
    let cons = Rows { doc, read: |d| &d.cons, write: |d| &mut d.cons };
    let faqs = Rows { doc, read: |d| &d.faqs, write: |d| &mut d.faqs };
    let use_cases = Rows { doc, read: |d| &d.use_cases, write: |d| &mut d.use_cases };
    let alternatives = Rows { doc, read: |d| &d.alternatives, write: |d| &mut d.alternatives };
    let integrations = Rows { doc, read: |d| &d.integrations, write: |d| &mut d.integrations };

    let on_draft = move |_: ()| app_state.notify(ToastKind::Info, DRAFT_NOT_STORED);
    let on_publish = move |_: ()| {
        let notice = review_notice(editor.record_id.get_untracked().is_some());
        submitter.save(doc.get_untracked(), SaveMode::Publish, notice);
    };

    let title = move || if editor.is_edit() { "Edit Review" } else { "New Review" };
    let publish_label = Signal::derive(move || {
        if editor.is_edit() { "Update Review" } else { "Publish" }.to_string()
    });

    view! {
        <div class="flex flex-col gap-6">
            <h1 class="text-xl font-semibold">{title}</h1>
            <LoadingGate loaded=editor.loaded>
                <div class="flex flex-col gap-4">
                    <div class="grid grid-cols-2 gap-3">
                        <TextField label="Product Name" required=true value=product_name on_value=set_product_name />
                        <TextField label="Product Type" value=product_type on_value=set_product_type />
                    </div>
                    <TextField label="Avatar URL" value=avatar on_value=set_avatar />
                    <TextField label="Description" multiline=true value=description on_value=set_description />
                    <TextField label="Overview" multiline=true value=overview on_value=set_overview />
                    <div class="grid grid-cols-2 gap-3">
                        <NumberField
                            label="Aggregate Rating"
                            required=true
                            doc=doc
                            get=|d| d.aggregate_rating
                            set=|d, v| d.aggregate_rating = v
                        />
                        <NumberField label="Rating" doc=doc get=|d| d.rating set=|d, v| d.rating = v />
                    </div>
                    <div class="grid grid-cols-2 gap-3">
                        <TextField label="Reviewer" value=user_name on_value=set_user_name />
                        <TextField label="Review Text" value=review_text on_value=set_review_text />
                    </div>
                    {list_section(features, "Features", "Add Feature", feature_row)}
                    {list_section(pricing, "Pricing", "Add Plan", pricing_row)}
                    {list_section(pros, "Pros", "Add Pro", string_row)}
                    {list_section(cons, "Cons", "Add Con", string_row)}
                    {list_section(alternatives, "Alternatives", "Add Alternative", alternative_row)}
                    {list_section(use_cases, "Use Cases", "Add Use Case", use_case_row)}
                    {list_section(faqs, "FAQs", "Add FAQ", faq_row)}
                    {list_section(integrations, "Integrations", "Add Integration", string_row)}
                    <SaveBar
                        busy=submitter.busy
                        on_draft=on_draft
                        on_publish=on_publish
                        publish_label=publish_label
                    />
                </div>
            </LoadingGate>
        </div>
    }
}
