use crate::api::OnyxClient;
use crate::components::{Flash, FlashKind};
use crate::routes::MainRoute;
use crate::session::{ApiError, navigate_to};
use shared::models::{
    Decision, DecisionDetailResponse, FollowupMessage, UnderstandingUpdate,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::Link;

/// Where a deleted decision sends the browser.
const LIBRARY_PATH: &str = "/app/library";

type Notice = Option<(FlashKind, String)>;

/// One constraint per non-empty line of the edit textarea.
fn constraint_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn or_dash(value: Option<&str>) -> String {
    value.filter(|text| !text.is_empty()).unwrap_or("-").to_string()
}

fn fragility_class(score: &str) -> &'static str {
    match score {
        "robust" => "badge badge-success",
        "fragile" => "badge badge-error",
        _ => "badge badge-warning",
    }
}

fn load_detail(detail: UseStateHandle<Option<DecisionDetailResponse>>, notice: UseStateHandle<Notice>) {
    spawn_local(async move {
        let client = OnyxClient::shared();
        let search = web_sys::window()
            .and_then(|window| window.location().search().ok())
            .unwrap_or_default();
        let result = match crate::routes::query_param(&search, "decision_id") {
            Some(id) => client.get_decision(&id).await,
            None => client.get_active_decision().await,
        };
        match result {
            Ok(response) => detail.set(Some(response)),
            Err(ApiError::Auth) => {}
            Err(err) => {
                notice.set(Some((FlashKind::Error, err.to_string())));
                detail.set(Some(DecisionDetailResponse::default()));
            }
        }
    });
}

fn followup_message(msg: &FollowupMessage) -> Html {
    html! {
        <div class="bg-base-200 rounded p-2">
            <div class="text-xs font-semibold text-base-content/70">{ msg.author_label() }</div>
            <div class="text-sm">{ &msg.content }</div>
        </div>
    }
}

/// The decision workspace: understanding, stress-tested options, the
/// recommendation, and the follow-up thread for one decision.
#[function_component(DecisionPage)]
pub fn decision_page() -> Html {
    let detail = use_state(|| None::<DecisionDetailResponse>);
    let notice = use_state(|| Notice::None);
    let editing = use_state(|| false);
    let edit_goal = use_state(String::new);
    let edit_horizon = use_state(String::new);
    let edit_constraints = use_state(String::new);
    let edit_risk = use_state(|| "balanced".to_string());
    let note = use_state(String::new);
    let followup_input = use_state(String::new);
    let sending = use_state(|| false);
    let show_alternatives = use_state(|| false);
    let confirm_delete = use_state(|| false);

    {
        let detail = detail.clone();
        let notice = notice.clone();
        use_effect_with((), move |_| {
            load_detail(detail, notice);
            || ()
        });
    }

    let begin_edit = {
        let detail = detail.clone();
        let editing = editing.clone();
        let edit_goal = edit_goal.clone();
        let edit_horizon = edit_horizon.clone();
        let edit_constraints = edit_constraints.clone();
        let edit_risk = edit_risk.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(decision) = detail.as_ref().and_then(|d| d.decision.as_ref()) {
                edit_goal.set(decision.goal.clone().unwrap_or_default());
                edit_horizon.set(decision.time_horizon.clone().unwrap_or_default());
                edit_constraints.set(decision.constraints.join("\n"));
                edit_risk.set(
                    decision
                        .risk_tolerance
                        .clone()
                        .unwrap_or_else(|| "balanced".to_string()),
                );
                editing.set(true);
            }
        })
    };

    let cancel_edit = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(false))
    };

    let save_understanding = {
        let detail = detail.clone();
        let notice = notice.clone();
        let editing = editing.clone();
        let edit_goal = edit_goal.clone();
        let edit_horizon = edit_horizon.clone();
        let edit_constraints = edit_constraints.clone();
        let edit_risk = edit_risk.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(current) = detail.as_ref().cloned() else {
                return;
            };
            let Some(decision) = current.decision.clone() else {
                return;
            };
            let update = UnderstandingUpdate {
                goal: Some((*edit_goal).clone()),
                time_horizon: Some((*edit_horizon).clone()),
                constraints: constraint_lines(&edit_constraints),
                risk_tolerance: Some((*edit_risk).clone()),
                primary_metric: decision.primary_metric.clone(),
            };
            let detail = detail.clone();
            let notice = notice.clone();
            let editing = editing.clone();
            spawn_local(async move {
                match OnyxClient::shared()
                    .confirm_understanding(&decision.id, &update)
                    .await
                {
                    Ok(()) => {
                        let mut next = current;
                        if let Some(decision) = next.decision.as_mut() {
                            decision.goal = update.goal.clone();
                            decision.time_horizon = update.time_horizon.clone();
                            decision.constraints = update.constraints.clone();
                            decision.risk_tolerance = update.risk_tolerance.clone();
                        }
                        detail.set(Some(next));
                        editing.set(false);
                    }
                    Err(ApiError::Auth) => {}
                    Err(err) => notice.set(Some((FlashKind::Error, err.to_string()))),
                }
            });
        })
    };

    let on_commit = {
        let detail = detail.clone();
        let notice = notice.clone();
        let note = note.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(decision) = detail.as_ref().and_then(|d| d.decision.clone()) else {
                return;
            };
            let note_value = (*note).clone();
            let detail = detail.clone();
            let notice = notice.clone();
            spawn_local(async move {
                match OnyxClient::shared()
                    .commit_decision(&decision.id, &note_value)
                    .await
                {
                    Ok(()) => {
                        notice.set(Some((
                            FlashKind::Success,
                            "Decision committed to your library.".to_string(),
                        )));
                        load_detail(detail, notice);
                    }
                    Err(ApiError::Auth) => {}
                    Err(err) => notice.set(Some((FlashKind::Error, err.to_string()))),
                }
            });
        })
    };

    let on_delete = {
        let detail = detail.clone();
        let notice = notice.clone();
        let confirm_delete = confirm_delete.clone();
        Callback::from(move |_: MouseEvent| {
            if !*confirm_delete {
                confirm_delete.set(true);
                return;
            }
            let Some(decision) = detail.as_ref().and_then(|d| d.decision.clone()) else {
                return;
            };
            let notice = notice.clone();
            let confirm_delete = confirm_delete.clone();
            spawn_local(async move {
                match OnyxClient::shared().delete_decision(&decision.id).await {
                    Ok(()) => navigate_to(LIBRARY_PATH),
                    Err(ApiError::Auth) => {}
                    Err(err) => {
                        confirm_delete.set(false);
                        notice.set(Some((FlashKind::Error, err.to_string())));
                    }
                }
            });
        })
    };

    let on_followup = {
        let detail = detail.clone();
        let notice = notice.clone();
        let followup_input = followup_input.clone();
        let sending = sending.clone();
        Callback::from(move |_: MouseEvent| {
            let question = followup_input.trim().to_string();
            if question.is_empty() || *sending {
                return;
            }
            let Some(decision) = detail.as_ref().and_then(|d| d.decision.clone()) else {
                return;
            };
            sending.set(true);
            let detail = detail.clone();
            let notice = notice.clone();
            let followup_input = followup_input.clone();
            let sending = sending.clone();
            spawn_local(async move {
                match OnyxClient::shared().ask_followup(&decision.id, &question).await {
                    Ok(answer) => {
                        if let Some(mut next) = (*detail).clone() {
                            next.followups.push(FollowupMessage {
                                author_type: "user".to_string(),
                                content: question,
                            });
                            next.followups.push(answer);
                            detail.set(Some(next));
                        }
                        followup_input.set(String::new());
                    }
                    Err(ApiError::Auth) => {}
                    Err(err) => notice.set(Some((FlashKind::Error, err.to_string()))),
                }
                sending.set(false);
            });
        })
    };

    let toggle_alternatives = {
        let show_alternatives = show_alternatives.clone();
        Callback::from(move |_: MouseEvent| show_alternatives.set(!*show_alternatives))
    };

    let text_input = |handle: UseStateHandle<String>| {
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                handle.set(input.value());
            }
        })
    };
    let on_goal_input = text_input(edit_goal.clone());
    let on_horizon_input = text_input(edit_horizon.clone());
    let on_note_input = text_input(note.clone());
    let on_followup_input = text_input(followup_input.clone());
    let on_constraints_input = {
        let edit_constraints = edit_constraints.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlTextAreaElement>() {
                edit_constraints.set(input.value());
            }
        })
    };
    let on_risk_change = {
        let edit_risk = edit_risk.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                edit_risk.set(select.value());
            }
        })
    };

    let on_dismiss = {
        let notice = notice.clone();
        Callback::from(move |()| notice.set(None))
    };
    let (notice_kind, notice_message) = match &*notice {
        Some((kind, message)) => (*kind, Some(message.clone())),
        None => (FlashKind::Error, None),
    };

    let body = match &*detail {
        None => html! { <p class="text-base-content/60 p-4">{ "Loading..." }</p> },
        Some(loaded) => match &loaded.decision {
            None => html! {
                <div class="card bg-base-200 p-6 text-center space-y-3">
                    <p class="font-medium">{ "No decision in progress" }</p>
                    <p class="text-sm text-base-content/70">
                        { "Start one and Onyx will stress-test your options." }
                    </p>
                    <div>
                        <Link<MainRoute> to={MainRoute::NewDecision} classes="btn btn-primary btn-sm">
                            { "New decision" }
                        </Link<MainRoute>>
                    </div>
                </div>
            },
            Some(decision) => decision_view(
                decision,
                loaded,
                *editing,
                *show_alternatives,
                *confirm_delete,
                *sending,
                &edit_goal,
                &edit_horizon,
                &edit_constraints,
                &edit_risk,
                &note,
                &followup_input,
                DecisionCallbacks {
                    begin_edit,
                    cancel_edit,
                    save_understanding,
                    on_commit,
                    on_delete,
                    on_followup,
                    toggle_alternatives,
                    on_goal_input,
                    on_horizon_input,
                    on_constraints_input,
                    on_risk_change,
                    on_note_input,
                    on_followup_input,
                },
            ),
        },
    };

    html! {
        <div class="p-4 space-y-4">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold">{ "Decision workspace" }</h1>
                <Link<MainRoute> to={MainRoute::Library} classes="btn btn-ghost btn-sm">
                    { "Library" }
                </Link<MainRoute>>
            </div>
            <Flash message={notice_message} kind={notice_kind} {on_dismiss} />
            { body }
        </div>
    }
}

struct DecisionCallbacks {
    begin_edit: Callback<MouseEvent>,
    cancel_edit: Callback<MouseEvent>,
    save_understanding: Callback<MouseEvent>,
    on_commit: Callback<MouseEvent>,
    on_delete: Callback<MouseEvent>,
    on_followup: Callback<MouseEvent>,
    toggle_alternatives: Callback<MouseEvent>,
    on_goal_input: Callback<InputEvent>,
    on_horizon_input: Callback<InputEvent>,
    on_constraints_input: Callback<InputEvent>,
    on_risk_change: Callback<Event>,
    on_note_input: Callback<InputEvent>,
    on_followup_input: Callback<InputEvent>,
}

#[allow(clippy::too_many_arguments)]
fn decision_view(
    decision: &Decision,
    loaded: &DecisionDetailResponse,
    editing: bool,
    show_alternatives: bool,
    confirm_delete: bool,
    sending: bool,
    edit_goal: &str,
    edit_horizon: &str,
    edit_constraints: &str,
    edit_risk: &str,
    note: &str,
    followup_input: &str,
    callbacks: DecisionCallbacks,
) -> Html {
    let committed = decision.is_committed();
    let option_names = loaded
        .options
        .iter()
        .map(|option| option.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    html! {
        <div class="grid grid-cols-1 lg:grid-cols-3 gap-4">
            <div class="lg:col-span-2 space-y-4">
                <div class="card bg-base-100 shadow p-4 space-y-2">
                    <div class="flex items-center justify-between">
                        <h2 class="font-semibold text-lg">{ "Understanding" }</h2>
                        if !editing && !committed {
                            <button class="btn btn-ghost btn-sm" onclick={callbacks.begin_edit}>
                                { "Edit" }
                            </button>
                        }
                    </div>
                    if editing {
                        <div class="space-y-2">
                            <div class="form-control">
                                <label class="label"><span class="label-text">{"Goal"}</span></label>
                                <input class="input input-bordered input-sm" type="text"
                                    value={edit_goal.to_string()} oninput={callbacks.on_goal_input} />
                            </div>
                            <div class="form-control">
                                <label class="label"><span class="label-text">{"Time horizon"}</span></label>
                                <input class="input input-bordered input-sm" type="text"
                                    value={edit_horizon.to_string()} oninput={callbacks.on_horizon_input} />
                            </div>
                            <div class="form-control">
                                <label class="label"><span class="label-text">{"Constraints (one per line)"}</span></label>
                                <textarea class="textarea textarea-bordered"
                                    value={edit_constraints.to_string()} oninput={callbacks.on_constraints_input} />
                            </div>
                            <div class="form-control">
                                <label class="label"><span class="label-text">{"Risk tolerance"}</span></label>
                                <select class="select select-bordered select-sm"
                                        value={edit_risk.to_string()} onchange={callbacks.on_risk_change}>
                                    <option value="cautious" selected={edit_risk == "cautious"}>{"Cautious"}</option>
                                    <option value="balanced" selected={edit_risk == "balanced"}>{"Balanced"}</option>
                                    <option value="bold" selected={edit_risk == "bold"}>{"Bold"}</option>
                                </select>
                            </div>
                            <div class="flex gap-2">
                                <button class="btn btn-primary btn-sm" onclick={callbacks.save_understanding}>
                                    { "Save" }
                                </button>
                                <button class="btn btn-ghost btn-sm" onclick={callbacks.cancel_edit}>
                                    { "Cancel" }
                                </button>
                            </div>
                        </div>
                    } else {
                        <ul class="text-sm space-y-1">
                            <li><span class="font-medium">{"Goal: "}</span>{ or_dash(decision.goal.as_deref()) }</li>
                            <li><span class="font-medium">{"Time horizon: "}</span>{ or_dash(decision.time_horizon.as_deref()) }</li>
                            <li>
                                <span class="font-medium">{"Constraints: "}</span>
                                { if decision.constraints.is_empty() { "-".to_string() } else { decision.constraints.join(", ") } }
                            </li>
                            <li><span class="font-medium">{"Options: "}</span>{ or_dash(Some(option_names.as_str())) }</li>
                        </ul>
                    }
                </div>

                <div class="card bg-base-100 shadow p-4 space-y-3">
                    <h2 class="font-semibold text-lg">{ "Stress tests" }</h2>
                    if loaded.options.is_empty() {
                        <p class="text-sm text-base-content/60">{ "No options analyzed yet." }</p>
                    } else {
                        {
                            for loaded.options.iter().map(|option| html! {
                                <div class="border border-base-300 rounded p-3 space-y-1" key={option.id.clone()}>
                                    <div class="flex items-center justify-between">
                                        <h3 class="font-medium">{ &option.name }</h3>
                                        <span class={fragility_class(option.fragility_label())}>
                                            { option.fragility_label() }
                                        </span>
                                    </div>
                                    <div class="text-sm"><span class="font-medium">{"Upside: "}</span>{ or_dash(option.upside.as_deref()) }</div>
                                    <div class="text-sm"><span class="font-medium">{"Downside: "}</span>{ or_dash(option.downside.as_deref()) }</div>
                                    if !option.key_assumptions.is_empty() {
                                        <div class="text-sm">
                                            <span class="font-medium">{"Key assumptions"}</span>
                                            <ul class="list-disc list-inside">
                                                { for option.key_assumptions.iter().map(|assumption| html! {
                                                    <li>{ assumption }</li>
                                                }) }
                                            </ul>
                                        </div>
                                    }
                                </div>
                            })
                        }
                    }
                </div>

                {
                    loaded.recommendation.as_ref().map_or_else(|| html! {}, |recommendation| {
                        let name = recommendation
                            .recommended_in(&loaded.options)
                            .map_or("-", |option| option.name.as_str());
                        html! {
                            <div class="card bg-base-100 shadow p-4 space-y-2">
                                <h2 class="font-semibold text-lg">{ "Recommendation" }</h2>
                                <div class="text-sm text-base-content/70">{ "Most robust option:" }</div>
                                <div class="font-semibold">{ name }</div>
                                <p class="text-sm">{ or_dash(recommendation.reasoning.as_deref()) }</p>
                                <button class="btn btn-ghost btn-xs self-start" onclick={callbacks.toggle_alternatives}>
                                    { if show_alternatives { "Hide alternatives" } else { "Why not the alternatives?" } }
                                </button>
                                if show_alternatives {
                                    <p class="text-sm bg-base-200 rounded p-2">
                                        { or_dash(recommendation.why_not_alternatives.as_deref()) }
                                    </p>
                                }
                            </div>
                        }
                    })
                }

                <div class="card bg-base-100 shadow p-4 space-y-2">
                    <h2 class="font-semibold text-lg">{ "Follow-up" }</h2>
                    if loaded.followups.is_empty() {
                        <p class="text-sm text-base-content/60">{ "Ask about trade-offs, assumptions or anything unclear." }</p>
                    } else {
                        <div class="space-y-2">
                            { for loaded.followups.iter().map(followup_message) }
                        </div>
                    }
                    <div class="flex gap-2">
                        <input class="input input-bordered input-sm flex-grow" type="text"
                            placeholder="Ask a question about this decision"
                            value={followup_input.to_string()} oninput={callbacks.on_followup_input} />
                        <button class="btn btn-primary btn-sm" onclick={callbacks.on_followup} disabled={sending}>
                            { if sending { "Sending..." } else { "Send" } }
                        </button>
                    </div>
                </div>
            </div>

            <div class="space-y-4">
                <div class="card bg-base-100 shadow p-4 space-y-1 text-sm">
                    <h2 class="font-semibold text-lg">{ "Summary" }</h2>
                    <div><span class="font-medium">{"Goal: "}</span>{ or_dash(decision.goal.as_deref()) }</div>
                    <div><span class="font-medium">{"Time horizon: "}</span>{ or_dash(decision.time_horizon.as_deref()) }</div>
                    <div><span class="font-medium">{"Primary metric: "}</span>{ or_dash(decision.primary_metric.as_deref()) }</div>
                    <div><span class="font-medium">{"Risk tolerance: "}</span>{ or_dash(decision.risk_tolerance.as_deref()) }</div>
                    <div class="text-base-content/60">
                        {
                            decision.committed_at.map_or_else(
                                || "Not committed yet".to_string(),
                                |at| format!("Committed: {}", at.format("%b %d, %Y")),
                            )
                        }
                    </div>
                </div>

                if committed {
                    <Link<MainRoute> to={MainRoute::Library} classes="btn btn-block">
                        { "Back to library" }
                    </Link<MainRoute>>
                } else {
                    <div class="card bg-base-100 shadow p-4 space-y-2">
                        <h2 class="font-semibold">{ "Commit this decision" }</h2>
                        <input class="input input-bordered input-sm" type="text"
                            placeholder="Add a note (optional)"
                            value={note.to_string()} oninput={callbacks.on_note_input} />
                        <button class="btn btn-primary btn-sm" onclick={callbacks.on_commit}>
                            { "Commit to library" }
                        </button>
                    </div>
                }
                <button class="btn btn-outline btn-error btn-sm btn-block" onclick={callbacks.on_delete}>
                    { if confirm_delete { "Click again to delete" } else { "Delete decision" } }
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraints_split_on_lines_and_trim() {
        assert_eq!(
            constraint_lines("runway\n  team morale  \n\nno relocation"),
            vec!["runway", "team morale", "no relocation"]
        );
        assert!(constraint_lines("").is_empty());
        assert!(constraint_lines("\n  \n").is_empty());
    }

    #[test]
    fn missing_text_renders_as_dash() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("")), "-");
        assert_eq!(or_dash(Some("18 months")), "18 months");
    }

    #[test]
    fn fragility_maps_to_badge_class() {
        assert_eq!(fragility_class("robust"), "badge badge-success");
        assert_eq!(fragility_class("fragile"), "badge badge-error");
        assert_eq!(fragility_class("balanced"), "badge badge-warning");
    }
}
