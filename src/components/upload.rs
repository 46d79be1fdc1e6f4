//! Model upload form.

use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::AppContext;
use crate::core::ProgressFn;
use crate::models::{CoinMetadata, Route, UploadResponse};

stylance::import_crate_style!(css, "src/components/upload.module.css");

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn measurement(label: &str, value: &str) -> Result<Option<f64>, String> {
    let Some(text) = non_empty(value) else {
        return Ok(None);
    };
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => Ok(Some(n)),
        _ => Err(format!("{} must be a positive number", label)),
    }
}

/// Raw text of every form input, before validation.
#[derive(Clone, Debug, Default)]
struct UploadFields {
    name: String,
    description: String,
    year: String,
    mint: String,
    denomination: String,
    metal: String,
    weight_grams: String,
    diameter_mm: String,
    grade: String,
    catalog_reference: String,
    ruler: String,
    obverse_description: String,
    reverse_description: String,
    obverse_legend: String,
    reverse_legend: String,
}

impl UploadFields {
    /// Blank optional fields become `None`; measurements must parse.
    fn to_metadata(&self) -> Result<CoinMetadata, String> {
        Ok(CoinMetadata {
            year: non_empty(&self.year),
            mint: non_empty(&self.mint),
            denomination: non_empty(&self.denomination),
            metal: non_empty(&self.metal),
            weight_grams: measurement("Weight", &self.weight_grams)?,
            diameter_mm: measurement("Diameter", &self.diameter_mm)?,
            grade: non_empty(&self.grade),
            catalog_reference: non_empty(&self.catalog_reference),
            ruler: non_empty(&self.ruler),
            obverse_description: non_empty(&self.obverse_description),
            reverse_description: non_empty(&self.reverse_description),
            obverse_legend: non_empty(&self.obverse_legend),
            reverse_legend: non_empty(&self.reverse_legend),
            ..CoinMetadata::new(self.name.trim(), self.description.trim())
        })
    }
}

#[component]
fn TextField(label: &'static str, value: RwSignal<String>) -> impl IntoView {
    view! {
        <label class=css::field>
            {label}
            <input
                type="text"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
pub fn UploadForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let file_input: NodeRef<Input> = NodeRef::new();
    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let year = RwSignal::new(String::new());
    let mint = RwSignal::new(String::new());
    let denomination = RwSignal::new(String::new());
    let metal = RwSignal::new(String::new());
    let weight = RwSignal::new(String::new());
    let diameter = RwSignal::new(String::new());
    let grade = RwSignal::new(String::new());
    let catalog_reference = RwSignal::new(String::new());
    let ruler = RwSignal::new(String::new());
    let obverse_description = RwSignal::new(String::new());
    let reverse_description = RwSignal::new(String::new());
    let obverse_legend = RwSignal::new(String::new());
    let reverse_legend = RwSignal::new(String::new());
    let (progress, set_progress) = signal(None::<f64>);
    let (outcome, set_outcome) = signal(None::<UploadResponse>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let Some(file) = file_input
            .get()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
        else {
            set_outcome.set(Some(UploadResponse::failed("Choose a model file first")));
            return;
        };

        let fields = UploadFields {
            name: name.get_untracked(),
            description: description.get_untracked(),
            year: year.get_untracked(),
            mint: mint.get_untracked(),
            denomination: denomination.get_untracked(),
            metal: metal.get_untracked(),
            weight_grams: weight.get_untracked(),
            diameter_mm: diameter.get_untracked(),
            grade: grade.get_untracked(),
            catalog_reference: catalog_reference.get_untracked(),
            ruler: ruler.get_untracked(),
            obverse_description: obverse_description.get_untracked(),
            reverse_description: reverse_description.get_untracked(),
            obverse_legend: obverse_legend.get_untracked(),
            reverse_legend: reverse_legend.get_untracked(),
        };
        let metadata = match fields.to_metadata() {
            Ok(metadata) => metadata,
            Err(error) => {
                set_outcome.set(Some(UploadResponse::failed(error)));
                return;
            }
        };

        set_outcome.set(None);
        set_progress.set(Some(0.0));

        let ctx = ctx.clone();
        spawn_local(async move {
            let on_progress: ProgressFn = Box::new(move |percent| {
                set_progress.set(Some(percent));
            });
            let result = ctx.api.upload_coin(&file, &metadata, Some(on_progress)).await;
            set_progress.set(None);

            if let Some(coin) = &result.coin {
                log::info!("uploaded coin {}", coin.id);
                ctx.router.navigate(&Route::coin(coin.id.clone()).to_path());
            }
            set_outcome.set(Some(result));
        });
    };

    view! {
        <section>
            <h2>"Upload a coin"</h2>
            <form class=css::form on:submit=on_submit>
                <label class=css::field>
                    "Model (.glb)"
                    <input type="file" accept=".glb,model/gltf-binary" node_ref=file_input />
                </label>
                <label class=css::field>
                    "Name"
                    <input
                        type="text"
                        required
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </label>
                <label class=css::field>
                    "Description"
                    <textarea
                        required
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <TextField label="Year" value=year />
                <TextField label="Mint" value=mint />
                <TextField label="Denomination" value=denomination />
                <TextField label="Metal" value=metal />
                <TextField label="Weight (g)" value=weight />
                <TextField label="Diameter (mm)" value=diameter />
                <TextField label="Grade" value=grade />
                <TextField label="Catalog reference" value=catalog_reference />
                <TextField label="Ruler" value=ruler />
                <TextField label="Obverse description" value=obverse_description />
                <TextField label="Obverse legend" value=obverse_legend />
                <TextField label="Reverse description" value=reverse_description />
                <TextField label="Reverse legend" value=reverse_legend />
                <button type="submit" disabled=move || progress.get().is_some()>"Upload"</button>
            </form>
            {move || progress.get().map(|percent| view! {
                <progress max="100" value=percent.to_string()></progress>
            })}
            {move || outcome.get().map(|result| {
                if result.success {
                    let name = result.coin.map(|coin| coin.name).unwrap_or_default();
                    view! { <p class=css::success>"Uploaded " {name}</p> }.into_any()
                } else {
                    let error = result.error.unwrap_or_else(|| "Upload failed".to_string());
                    view! { <p class=css::error>{error}</p> }.into_any()
                }
            })}
        </section>
    }
}
