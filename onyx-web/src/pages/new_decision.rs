use crate::api::OnyxClient;
use crate::components::{Flash, FlashKind};
use crate::session::{MIN_DECISION_CHARS, navigate_to};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

/// Where a freshly created decision sends the browser.
const DECISION_PATH: &str = "/app/decision";

fn can_submit(content: &str) -> bool {
    content.trim().chars().count() >= MIN_DECISION_CHARS
}

/// Form for starting a new decision from a free-form description.
#[function_component(NewDecisionPage)]
pub fn new_decision_page() -> Html {
    let content = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let oninput = {
        let content = content.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlTextAreaElement>() {
                content.set(input.value());
            }
        })
    };

    let onsubmit = {
        let content_handle = content.clone();
        let error_handle = error.clone();
        let loading_handle = loading.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let content_value = (*content_handle).clone();
            loading_handle.set(true);
            error_handle.set(None);
            let error_ref = error_handle.clone();
            let loading_ref = loading_handle.clone();
            spawn_local(async move {
                match OnyxClient::shared().create_decision(&content_value).await {
                    Ok(_) => navigate_to(DECISION_PATH),
                    Err(err) => {
                        error_ref.set(Some(err.to_string()));
                        loading_ref.set(false);
                    }
                }
            });
        })
    };

    let on_dismiss = {
        let error_handle = error.clone();
        Callback::from(move |()| error_handle.set(None))
    };

    let char_count = content.chars().count();
    let is_busy = *loading;
    let ready = can_submit(&content);

    html! {
        <div class="flex justify-center p-4">
            <div class="card w-full max-w-2xl shadow-lg bg-base-100">
                <form class="card-body" onsubmit={onsubmit}>
                    <h2 class="card-title text-2xl">{"What are you deciding?"}</h2>
                    <p class="text-sm text-base-content/70">
                        {"Describe the decision in your own words. The more context you give, the better the analysis."}
                    </p>
                    <Flash message={(*error).clone()} kind={FlashKind::Error} {on_dismiss} />
                    <textarea
                        class="textarea textarea-bordered h-40"
                        placeholder="We need to decide whether to..."
                        value={(*content).clone()}
                        oninput={oninput}
                    />
                    <div class="text-xs text-base-content/60 text-right">
                        { format!("{char_count} / {MIN_DECISION_CHARS} characters minimum") }
                    </div>
                    <div class="form-control mt-4">
                        <button class="btn btn-primary" type="submit" disabled={is_busy || !ready}>
                            { if is_busy { "Analyzing..." } else { "Start analysis" } }
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_gated_on_description_length() {
        assert!(!can_submit(""));
        assert!(!can_submit("Too short"));
        // Padding does not count toward the minimum.
        assert!(!can_submit(&format!("{}{}", " ".repeat(60), "hire?")));
        assert!(can_submit(
            "Should we hire a second engineer now or wait until the seed round closes?"
        ));
    }
}
