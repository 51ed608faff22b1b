use crate::api::OnyxClient;
use crate::components::{Flash, FlashKind};
use crate::poll::PollHandle;
use crate::session::ApiError;
use chrono::{DateTime, Utc};
use shared::models::{
    ActivityItem, DashboardResponse, NewProspect, Pipeline, Prospect, ProspectUpdate,
    SettingsUpdate,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_icons::{Icon, IconId};

/// Dashboard re-fetch cadence.
const POLL_PERIOD_SECS: u32 = 30;

const LOAD_FAILED: &str = "Unable to load dashboard data. Please refresh the page.";

/// Backend stage identifiers in board order, aligned with
/// [`Pipeline::stages`].
const STAGE_KEYS: [&str; 4] = ["found", "contacted", "talking", "ready"];

type Notice = Option<(FlashKind, String)>;

/// Split a free-form name into the first/last pair the backend expects.
fn split_name(full: &str) -> (String, String) {
    match full.trim().split_once(' ') {
        Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
        None => (full.trim().to_string(), String::new()),
    }
}

/// Badge class for a prospect's priority marker.
fn priority_class(priority: Option<&str>) -> &'static str {
    match priority {
        Some("high") => "badge badge-error badge-xs",
        Some("medium") => "badge badge-warning badge-xs",
        _ => "badge badge-ghost badge-xs",
    }
}

/// Relative timestamp for the activity stream, mirroring what the rest of
/// the product shows ("Just now", "5 min ago", ...).
fn format_time_ago(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(created_at);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes} min ago");
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{hours} hour{} ago", if hours > 1 { "s" } else { "" });
    }
    let days = elapsed.num_days();
    if days < 7 {
        return format!("{days} day{} ago", if days > 1 { "s" } else { "" });
    }
    created_at.format("%Y-%m-%d").to_string()
}

fn spawn_refresh(
    dashboard: UseStateHandle<DashboardResponse>,
    pipeline: UseStateHandle<Pipeline>,
    activities: UseStateHandle<Vec<ActivityItem>>,
    notice: UseStateHandle<Notice>,
) {
    spawn_local(async move {
        let client = OnyxClient::shared();
        let mut failed = false;
        // Each widget owns its own state handle, so whichever response
        // lands last simply overwrites its own target.
        match client.get_dashboard().await {
            Ok(response) => dashboard.set(response),
            Err(ApiError::Auth) => return,
            Err(_) => failed = true,
        }
        match client.get_pipeline().await {
            Ok(response) => pipeline.set(response.pipeline),
            Err(ApiError::Auth) => return,
            Err(_) => failed = true,
        }
        match client.get_activity().await {
            Ok(response) => activities.set(response.activities),
            Err(ApiError::Auth) => return,
            Err(_) => failed = true,
        }
        if failed {
            notice.set(Some((FlashKind::Error, LOAD_FAILED.to_string())));
        }
    });
}

fn prospect_card(
    prospect: &Prospect,
    next_stage: Option<&'static str>,
    on_advance: &Callback<(String, &'static str)>,
    on_remove: &Callback<String>,
) -> Html {
    let advance = next_stage.map(|stage| {
        let on_advance = on_advance.clone();
        let id = prospect.id.clone();
        Callback::from(move |_: MouseEvent| on_advance.emit((id.clone(), stage)))
    });
    let remove = {
        let on_remove = on_remove.clone();
        let id = prospect.id.clone();
        Callback::from(move |_: MouseEvent| on_remove.emit(id.clone()))
    };
    html! {
        <div class="card bg-base-100 shadow-sm p-2 mb-2" key={prospect.id.clone()}>
            <div class="flex items-center justify-between">
                <div>
                    <div class="font-medium">{ &prospect.first_name }</div>
                    <div class="text-xs text-base-content/70">{ &prospect.company }</div>
                </div>
                <div class="flex items-center gap-1">
                    <span class={priority_class(prospect.priority.as_deref())}></span>
                    {
                        advance.map_or_else(|| html! {}, |onclick| html! {
                            <button class="btn btn-ghost btn-xs" title="Move to next stage" {onclick}>
                                {"→"}
                            </button>
                        })
                    }
                    <button class="btn btn-ghost btn-xs" title="Remove" onclick={remove}>
                        {"×"}
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Workspace dashboard page component
#[function_component(WorkspacePage)]
pub fn workspace_page() -> Html {
    let dashboard = use_state(DashboardResponse::default);
    let pipeline = use_state(Pipeline::default);
    let activities = use_state(Vec::<ActivityItem>::new);
    let notice = use_state(|| Notice::None);
    let show_add_form = use_state(|| false);
    let new_name = use_state(String::new);
    let new_company = use_state(String::new);
    let new_email = use_state(String::new);

    {
        let dashboard = dashboard.clone();
        let pipeline = pipeline.clone();
        let activities = activities.clone();
        let notice = notice.clone();
        use_effect_with((), move |_| {
            spawn_refresh(
                dashboard.clone(),
                pipeline.clone(),
                activities.clone(),
                notice.clone(),
            );
            let poll = PollHandle::start(POLL_PERIOD_SECS, move || {
                spawn_refresh(
                    dashboard.clone(),
                    pipeline.clone(),
                    activities.clone(),
                    notice.clone(),
                );
            });
            // Dropping the handle on teardown clears the interval.
            move || drop(poll)
        });
    }

    let on_toggle_pause = {
        let dashboard = dashboard.clone();
        let notice = notice.clone();
        Callback::from(move |_| {
            let dashboard = dashboard.clone();
            let notice = notice.clone();
            spawn_local(async move {
                let client = OnyxClient::shared();
                let settings = match client.get_settings().await {
                    Ok(settings) => settings,
                    Err(ApiError::Auth) => return,
                    Err(err) => {
                        notice.set(Some((FlashKind::Error, err.to_string())));
                        return;
                    }
                };
                let paused = !settings.is_paused;
                let update = SettingsUpdate {
                    is_paused: Some(paused),
                };
                match client.update_settings(&update).await {
                    Ok(()) => {
                        let mut next = (*dashboard).clone();
                        next.status.is_paused = paused;
                        next.status.is_active = !paused;
                        dashboard.set(next);
                        let text = if paused {
                            "Onyx has been paused."
                        } else {
                            "Onyx is now active."
                        };
                        notice.set(Some((FlashKind::Success, text.to_string())));
                    }
                    Err(ApiError::Auth) => {}
                    Err(err) => notice.set(Some((FlashKind::Error, err.to_string()))),
                }
            });
        })
    };

    let toggle_add_form = {
        let show_add_form = show_add_form.clone();
        Callback::from(move |_| show_add_form.set(!*show_add_form))
    };

    let on_add_prospect = {
        let dashboard = dashboard.clone();
        let pipeline = pipeline.clone();
        let activities = activities.clone();
        let notice = notice.clone();
        let show_add_form = show_add_form.clone();
        let new_name = new_name.clone();
        let new_company = new_company.clone();
        let new_email = new_email.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let name_value = (*new_name).clone();
            let company_value = (*new_company).clone();
            let email_value = (*new_email).clone();
            if name_value.trim().is_empty()
                || company_value.trim().is_empty()
                || email_value.trim().is_empty()
            {
                notice.set(Some((
                    FlashKind::Error,
                    "Please fill in name, company and email.".to_string(),
                )));
                return;
            }
            let (first_name, last_name) = split_name(&name_value);
            let prospect = NewProspect {
                first_name,
                last_name,
                company: company_value.trim().to_string(),
                email: email_value.trim().to_string(),
            };
            let dashboard = dashboard.clone();
            let pipeline = pipeline.clone();
            let activities = activities.clone();
            let notice = notice.clone();
            let show_add_form = show_add_form.clone();
            let new_name = new_name.clone();
            let new_company = new_company.clone();
            let new_email = new_email.clone();
            spawn_local(async move {
                let client = OnyxClient::shared();
                match client.add_prospect(&prospect).await {
                    Ok(()) => {
                        new_name.set(String::new());
                        new_company.set(String::new());
                        new_email.set(String::new());
                        show_add_form.set(false);
                        notice.set(Some((
                            FlashKind::Success,
                            format!(
                                "{} from {} has been added to your pipeline.",
                                prospect.first_name, prospect.company
                            ),
                        )));
                        spawn_refresh(dashboard, pipeline, activities, notice);
                    }
                    Err(ApiError::Auth) => {}
                    Err(err) => notice.set(Some((FlashKind::Error, err.to_string()))),
                }
            });
        })
    };

    let on_advance = {
        let dashboard = dashboard.clone();
        let pipeline = pipeline.clone();
        let activities = activities.clone();
        let notice = notice.clone();
        Callback::from(move |(prospect_id, stage): (String, &'static str)| {
            let dashboard = dashboard.clone();
            let pipeline = pipeline.clone();
            let activities = activities.clone();
            let notice = notice.clone();
            spawn_local(async move {
                let update = ProspectUpdate {
                    priority: None,
                    stage: Some(stage.to_string()),
                };
                match OnyxClient::shared()
                    .update_prospect(&prospect_id, &update)
                    .await
                {
                    Ok(()) => spawn_refresh(dashboard, pipeline, activities, notice),
                    Err(ApiError::Auth) => {}
                    Err(err) => notice.set(Some((FlashKind::Error, err.to_string()))),
                }
            });
        })
    };

    let on_remove = {
        let dashboard = dashboard.clone();
        let pipeline = pipeline.clone();
        let activities = activities.clone();
        let notice = notice.clone();
        Callback::from(move |prospect_id: String| {
            let dashboard = dashboard.clone();
            let pipeline = pipeline.clone();
            let activities = activities.clone();
            let notice = notice.clone();
            spawn_local(async move {
                match OnyxClient::shared().delete_prospect(&prospect_id).await {
                    Ok(()) => spawn_refresh(dashboard, pipeline, activities, notice),
                    Err(ApiError::Auth) => {}
                    Err(err) => notice.set(Some((FlashKind::Error, err.to_string()))),
                }
            });
        })
    };

    let input_callback = |handle: UseStateHandle<String>| {
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                handle.set(input.value());
            }
        })
    };
    let on_name_input = input_callback(new_name.clone());
    let on_company_input = input_callback(new_company.clone());
    let on_email_input = input_callback(new_email.clone());

    let on_dismiss = {
        let notice = notice.clone();
        Callback::from(move |()| notice.set(None))
    };

    let status = &dashboard.status;
    let summary = &dashboard.summary;
    let stages = pipeline.stages();
    let now = Utc::now();
    let (notice_kind, notice_message) = match &*notice {
        Some((kind, message)) => (*kind, Some(message.clone())),
        None => (FlashKind::Error, None),
    };

    html! {
        <div class="p-4 space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold">{ "Your workspace" }</h1>
                <div class="flex items-center gap-3">
                    <span class={if status.is_paused { "badge badge-warning" }
                                 else if status.is_active { "badge badge-success" }
                                 else { "badge badge-ghost" }}>
                        { status.label() }
                    </span>
                    <button class="btn btn-sm" onclick={on_toggle_pause}>
                        { if status.is_paused { "Resume" } else { "Pause" } }
                    </button>
                    <button class="btn btn-sm btn-primary" onclick={toggle_add_form}>
                        { "Add person" }
                    </button>
                </div>
            </div>

            <Flash message={notice_message} kind={notice_kind} {on_dismiss} />

            if *show_add_form {
                <form class="card bg-base-200 p-4 flex flex-row gap-2 items-end" onsubmit={on_add_prospect}>
                    <div class="form-control">
                        <label class="label"><span class="label-text">{"Name"}</span></label>
                        <input class="input input-bordered input-sm" type="text"
                            value={(*new_name).clone()} oninput={on_name_input} />
                    </div>
                    <div class="form-control">
                        <label class="label"><span class="label-text">{"Company"}</span></label>
                        <input class="input input-bordered input-sm" type="text"
                            value={(*new_company).clone()} oninput={on_company_input} />
                    </div>
                    <div class="form-control">
                        <label class="label"><span class="label-text">{"Email"}</span></label>
                        <input class="input input-bordered input-sm" type="email"
                            value={(*new_email).clone()} oninput={on_email_input} />
                    </div>
                    <button class="btn btn-sm btn-primary" type="submit">{"Add"}</button>
                </form>
            }

            <div class="stats shadow w-full">
                <div class="stat">
                    <div class="stat-figure text-primary">
                        <Icon icon_id={IconId::HeroiconsOutlineChatBubbleLeftRight} class="w-8 h-8" />
                    </div>
                    <div class="stat-title">{ "Conversations started" }</div>
                    <div class="stat-value text-primary">{ summary.conversations_started }</div>
                    <div class="stat-desc">{ "today" }</div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-secondary">
                        <Icon icon_id={IconId::HeroiconsOutlineDocument} class="w-8 h-8" />
                    </div>
                    <div class="stat-title">{ "Replies" }</div>
                    <div class="stat-value text-secondary">{ summary.replies }</div>
                    <div class="stat-desc">{ "today" }</div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-success">
                        <Icon icon_id={IconId::HeroiconsOutlineCheck} class="w-8 h-8" />
                    </div>
                    <div class="stat-title">{ "Qualified leads" }</div>
                    <div class="stat-value text-success">{ summary.qualified_leads }</div>
                    <div class="stat-desc">{ "today" }</div>
                </div>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-4 gap-4">
                {
                    for stages.iter().enumerate().map(|(index, (stage, prospects))| {
                        let next = STAGE_KEYS.get(index + 1).copied();
                        html! {
                            <div class="card bg-base-200 p-3" key={*stage}>
                                <div class="flex items-center justify-between mb-2">
                                    <h2 class="font-semibold">{ *stage }</h2>
                                    <span class="badge">{ prospects.len() }</span>
                                </div>
                                if prospects.is_empty() {
                                    <div class="text-sm text-base-content/60">{ "No prospects yet" }</div>
                                } else {
                                    {
                                        for prospects.iter().map(|prospect| {
                                            prospect_card(prospect, next, &on_advance, &on_remove)
                                        })
                                    }
                                }
                            </div>
                        }
                    })
                }
            </div>

            <div class="card bg-base-200 p-4">
                <h2 class="font-semibold mb-2">{ "Recent activity" }</h2>
                if activities.is_empty() {
                    <div class="text-sm text-base-content/60">{ "No recent activity" }</div>
                } else {
                    <ul class="space-y-2">
                        {
                            for activities.iter().map(|activity| html! {
                                <li class="flex items-baseline gap-3" key={activity.id.clone()}>
                                    <span class="text-xs text-base-content/60 whitespace-nowrap">
                                        { format_time_ago(activity.created_at, now) }
                                    </span>
                                    <span>{ &activity.description }</span>
                                </li>
                            })
                        }
                    </ul>
                }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn split_name_handles_single_and_multi_word_names() {
        assert_eq!(split_name("Ada"), ("Ada".to_string(), String::new()));
        assert_eq!(
            split_name("Ada Lovelace"),
            ("Ada".to_string(), "Lovelace".to_string())
        );
        assert_eq!(
            split_name("Ada King Lovelace"),
            ("Ada".to_string(), "King Lovelace".to_string())
        );
        assert_eq!(split_name("  Ada  "), ("Ada".to_string(), String::new()));
    }

    #[test]
    fn priority_maps_to_badge_class() {
        assert_eq!(priority_class(Some("high")), "badge badge-error badge-xs");
        assert_eq!(
            priority_class(Some("medium")),
            "badge badge-warning badge-xs"
        );
        assert_eq!(priority_class(Some("normal")), "badge badge-ghost badge-xs");
        assert_eq!(priority_class(None), "badge badge-ghost badge-xs");
    }

    #[test]
    fn stage_keys_align_with_board_columns() {
        let pipeline = Pipeline::default();
        let labels: Vec<&str> = pipeline.stages().iter().map(|(label, _)| *label).collect();
        assert_eq!(labels.len(), STAGE_KEYS.len());
        for (label, key) in labels.iter().zip(STAGE_KEYS.iter()) {
            assert_eq!(label.to_lowercase(), *key);
        }
        // The last column has no next stage to advance into.
        assert_eq!(STAGE_KEYS.get(STAGE_KEYS.len()), None);
        assert_eq!(STAGE_KEYS.get(1).copied(), Some("contacted"));
    }

    #[test]
    fn time_ago_buckets() {
        let now = Utc::now();
        assert_eq!(format_time_ago(now, now), "Just now");
        assert_eq!(format_time_ago(now - Duration::minutes(5), now), "5 min ago");
        assert_eq!(format_time_ago(now - Duration::hours(1), now), "1 hour ago");
        assert_eq!(format_time_ago(now - Duration::hours(3), now), "3 hours ago");
        assert_eq!(format_time_ago(now - Duration::days(2), now), "2 days ago");
        let old = now - Duration::days(30);
        assert_eq!(format_time_ago(old, now), old.format("%Y-%m-%d").to_string());
    }
}
