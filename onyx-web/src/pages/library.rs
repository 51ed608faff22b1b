use crate::api::OnyxClient;
use crate::components::{Flash, FlashKind};
use crate::routes::MainRoute;
use crate::session::ApiError;
use shared::models::{Decision, DecisionDetailResponse};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Link;

/// Date shown on a library card.
fn committed_date_label(decision: &Decision) -> String {
    decision
        .committed_at
        .map_or_else(|| "Not committed yet".to_string(), |at| {
            at.format("%b %d, %Y").to_string()
        })
}

fn fragility_class(score: &str) -> &'static str {
    match score {
        "robust" => "badge badge-success badge-sm",
        "fragile" => "badge badge-error badge-sm",
        _ => "badge badge-warning badge-sm",
    }
}

fn detail_panel(detail: &DecisionDetailResponse, on_close: Callback<MouseEvent>) -> Html {
    let Some(decision) = &detail.decision else {
        return html! {};
    };
    html! {
        <div class="card bg-base-100 shadow-lg p-4 space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-xl font-semibold">{ decision.title_label() }</h2>
                <button class="btn btn-ghost btn-sm" onclick={on_close}>{"Close"}</button>
            </div>
            <div>
                <h3 class="font-semibold mb-1">{"Understanding"}</h3>
                <ul class="text-sm space-y-1">
                    <li><span class="font-medium">{"Goal: "}</span>{ decision.goal.clone().unwrap_or_else(|| "-".to_string()) }</li>
                    <li><span class="font-medium">{"Time horizon: "}</span>{ decision.time_horizon.clone().unwrap_or_else(|| "-".to_string()) }</li>
                    <li>
                        <span class="font-medium">{"Constraints: "}</span>
                        { if decision.constraints.is_empty() { "-".to_string() } else { decision.constraints.join(", ") } }
                    </li>
                    <li><span class="font-medium">{"Primary metric: "}</span>{ decision.primary_metric.clone().unwrap_or_else(|| "-".to_string()) }</li>
                    <li><span class="font-medium">{"Risk tolerance: "}</span>{ decision.risk_tolerance.clone().unwrap_or_else(|| "-".to_string()) }</li>
                </ul>
            </div>
            if !detail.options.is_empty() {
                <div>
                    <h3 class="font-semibold mb-1">{"Options analyzed"}</h3>
                    <div class="space-y-2">
                        {
                            for detail.options.iter().map(|option| html! {
                                <div class="border border-base-300 rounded p-2" key={option.id.clone()}>
                                    <div class="flex items-center justify-between">
                                        <span class="font-medium">{ &option.name }</span>
                                        <span class={fragility_class(option.fragility_label())}>
                                            { option.fragility_label() }
                                        </span>
                                    </div>
                                    <div class="text-sm"><span class="font-medium">{"Upside: "}</span>{ option.upside.clone().unwrap_or_else(|| "-".to_string()) }</div>
                                    <div class="text-sm"><span class="font-medium">{"Downside: "}</span>{ option.downside.clone().unwrap_or_else(|| "-".to_string()) }</div>
                                </div>
                            })
                        }
                    </div>
                </div>
            }
            {
                detail.recommendation.as_ref().map_or_else(|| html! {}, |recommendation| {
                    let name = recommendation
                        .recommended_in(&detail.options)
                        .map_or("Unknown", |option| option.name.as_str());
                    html! {
                        <div>
                            <h3 class="font-semibold mb-1">{"Analysis"}</h3>
                            <div class="bg-base-200 rounded p-3">
                                <div class="text-sm text-base-content/70">{"Most robust option:"}</div>
                                <div class="font-semibold">{ name }</div>
                                <p class="text-sm mt-1">
                                    { recommendation.reasoning.clone().unwrap_or_else(|| "-".to_string()) }
                                </p>
                            </div>
                        </div>
                    }
                })
            }
        </div>
    }
}

/// Library of committed decisions.
#[function_component(LibraryPage)]
pub fn library_page() -> Html {
    let decisions = use_state(Vec::<Decision>::new);
    let selected = use_state(|| None::<DecisionDetailResponse>);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    {
        let decisions = decisions.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match OnyxClient::shared().get_library().await {
                    Ok(response) => decisions.set(response.decisions),
                    Err(ApiError::Auth) => return,
                    Err(err) => error.set(Some(err.to_string())),
                }
                loading.set(false);
            });
            || ()
        });
    }

    let on_open = {
        let selected = selected.clone();
        let error = error.clone();
        Callback::from(move |decision_id: String| {
            let selected = selected.clone();
            let error = error.clone();
            spawn_local(async move {
                match OnyxClient::shared().get_decision(&decision_id).await {
                    Ok(detail) => selected.set(Some(detail)),
                    Err(ApiError::Auth) => {}
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        })
    };

    let on_close = {
        let selected = selected.clone();
        Callback::from(move |_: MouseEvent| selected.set(None))
    };

    let on_dismiss = {
        let error = error.clone();
        Callback::from(move |()| error.set(None))
    };

    html! {
        <div class="p-4 space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold">{ "Decision library" }</h1>
                <Link<MainRoute> to={MainRoute::NewDecision} classes="btn btn-sm btn-primary">
                    { "New decision" }
                </Link<MainRoute>>
            </div>

            <Flash message={(*error).clone()} kind={FlashKind::Error} {on_dismiss} />

            {
                selected.as_ref().map_or_else(|| html! {}, |detail| {
                    detail_panel(detail, on_close.clone())
                })
            }

            if *loading {
                <p class="text-base-content/60">{ "Loading..." }</p>
            } else if decisions.is_empty() {
                <div class="card bg-base-200 p-6 text-center space-y-2">
                    <p class="font-medium">{ "No committed decisions yet" }</p>
                    <p class="text-sm text-base-content/70">
                        { "Decisions you commit from the workspace land here." }
                    </p>
                </div>
            } else {
                <div class="space-y-2">
                    {
                        for decisions.iter().map(|decision| {
                            let on_open = on_open.clone();
                            let id = decision.id.clone();
                            let onclick = Callback::from(move |_: MouseEvent| on_open.emit(id.clone()));
                            html! {
                                <div class="card bg-base-100 shadow-sm p-3 cursor-pointer hover:bg-base-200"
                                     key={decision.id.clone()} {onclick}>
                                    <div class="flex items-center justify-between">
                                        <h3 class="font-semibold">{ decision.title_label() }</h3>
                                        <span class="text-xs text-base-content/60">
                                            { committed_date_label(decision) }
                                        </span>
                                    </div>
                                    <div class="text-sm text-base-content/70">
                                        { decision.goal.clone().unwrap_or_else(|| "No goal specified".to_string()) }
                                    </div>
                                </div>
                            }
                        })
                    }
                </div>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn committed_date_renders_or_falls_back() {
        let mut decision = Decision {
            id: "d-1".to_string(),
            ..Decision::default()
        };
        assert_eq!(committed_date_label(&decision), "Not committed yet");

        decision.committed_at = Some(Utc.with_ymd_and_hms(2026, 8, 27, 10, 0, 0).unwrap());
        assert_eq!(committed_date_label(&decision), "Aug 27, 2026");
    }

    #[test]
    fn fragility_maps_to_badge_class() {
        assert_eq!(fragility_class("robust"), "badge badge-success badge-sm");
        assert_eq!(fragility_class("fragile"), "badge badge-error badge-sm");
        assert_eq!(fragility_class("balanced"), "badge badge-warning badge-sm");
        assert_eq!(fragility_class("anything"), "badge badge-warning badge-sm");
    }
}
