use base64::{Engine as _, engine::general_purpose};
use payloads::{MAX_IMAGE_SIZE, MAX_UPLOAD_FILES, requests::UploadFile};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, HtmlInputElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Called with every selected file once all of them are read.
    pub on_files: Callback<Vec<UploadFile>>,
    #[prop_or(true)]
    pub multiple: bool,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_else(|| AttrValue::from("Subir imágenes"))]
    pub label: AttrValue,
}

async fn read_file(file: &File) -> Result<Vec<u8>, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| format!("No se pudo leer {}", file.name()))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

fn check_selection(files: &[File]) -> Result<(), String> {
    if files.len() > MAX_UPLOAD_FILES {
        return Err(format!(
            "Selecciona como máximo {MAX_UPLOAD_FILES} imágenes"
        ));
    }
    if let Some(file) = files.iter().find(|f| f.size() as usize > MAX_IMAGE_SIZE)
    {
        return Err(format!(
            "{} pesa {:.1} MB; el máximo es 5 MB",
            file.name(),
            file.size() / 1_048_576.0
        ));
    }
    Ok(())
}

/// File picker for images. Checks count and size, reads the files in the
/// browser and shows small previews; the upload itself is up to the parent.
#[function_component]
pub fn ImageUpload(props: &Props) -> Html {
    let input_ref = use_node_ref();
    let previews = use_state(Vec::<String>::new);
    let error_message = use_state(|| None::<String>);

    let on_change = {
        let on_files = props.on_files.clone();
        let previews = previews.clone();
        let error_message = error_message.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(list) = input.files() else {
                return;
            };
            let files: Vec<File> =
                (0..list.length()).filter_map(|i| list.get(i)).collect();
            input.set_value("");
            if files.is_empty() {
                return;
            }
            if let Err(message) = check_selection(&files) {
                error_message.set(Some(message));
                return;
            }

            let on_files = on_files.clone();
            let previews = previews.clone();
            let error_message = error_message.clone();
            yew::platform::spawn_local(async move {
                let mut uploads = Vec::with_capacity(files.len());
                let mut urls = Vec::with_capacity(files.len());
                for file in &files {
                    match read_file(file).await {
                        Ok(data) => {
                            urls.push(format!(
                                "data:{};base64,{}",
                                file.type_(),
                                general_purpose::STANDARD.encode(&data)
                            ));
                            uploads.push(UploadFile {
                                name: file.name(),
                                data,
                            });
                        }
                        Err(message) => {
                            error_message.set(Some(message));
                            return;
                        }
                    }
                }
                previews.set(urls);
                error_message.set(None);
                on_files.emit(uploads);
            });
        })
    };

    let on_pick = {
        let input_ref = input_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    html! {
        <div class="space-y-2">
            <input
                ref={input_ref}
                type="file"
                accept="image/*"
                multiple={props.multiple}
                class="hidden"
                onchange={on_change}
            />
            <button
                type="button"
                onclick={on_pick}
                disabled={props.disabled}
                class="px-3 py-2 text-sm border border-dashed
                       border-neutral-400 rounded-md hover:bg-neutral-50
                       disabled:opacity-50"
            >
                {&props.label}
            </button>
            if !previews.is_empty() {
                <div class="flex flex-wrap gap-2">
                    {for previews.iter().map(|src| html! {
                        <img src={src.clone()} class="h-16 w-16 object-cover rounded" />
                    })}
                </div>
            }
            if let Some(error) = &*error_message {
                <p class="text-sm text-red-600">{error}</p>
            }
        </div>
    }
}
