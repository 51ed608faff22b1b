use crate::api::OnyxClient;
use crate::components::{Flash, FlashKind};
use crate::config::FrontendConfig;
use crate::session::navigate_to;
use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Where a confirmed payment lands.
const WORKSPACE_PATH: &str = "/app";

/// How long the success screen lingers before moving on.
const SUCCESS_REDIRECT_MS: u32 = 2_000;

/// What the payment surface is currently doing.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    /// Deciding whether this load is a return from hosted checkout.
    Checking,
    /// Showing the upgrade offer.
    Offer,
    /// Verifying a checkout return with the backend.
    Processing,
    /// Entitlement confirmed; about to navigate to the workspace.
    Success,
    /// Verification failed; offer stays reachable.
    Failed(String),
}

/// Extract `session_id` from a location query string, if present.
fn session_id_from_query(query: &str) -> Option<String> {
    crate::routes::query_param(query, "session_id")
}

fn checkout_return_session_id() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    session_id_from_query(&search)
}

#[function_component(PaymentPage)]
pub fn payment_page() -> Html {
    let phase = use_state(|| Phase::Checking);
    let error = use_state(|| None::<String>);
    let config = FrontendConfig::new();
    let support_email = config.support_email().to_string();

    {
        let phase_handle = phase.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                if checkout_return_session_id().is_none() {
                    phase_handle.set(Phase::Offer);
                    return;
                }
                phase_handle.set(Phase::Processing);
                let client = OnyxClient::shared();
                match client.verify_payment().await {
                    Ok(response) if response.paid => {
                        phase_handle.set(Phase::Success);
                        Timeout::new(SUCCESS_REDIRECT_MS, || navigate_to(WORKSPACE_PATH))
                            .forget();
                    }
                    _ => {
                        phase_handle.set(Phase::Failed(
                            "Payment verification failed. Please contact support.".to_string(),
                        ));
                    }
                }
            });
            || ()
        });
    }

    let on_upgrade = {
        let error_handle = error.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            let error_ref = error_handle.clone();
            spawn_local(async move {
                let client = OnyxClient::shared();
                match client.create_checkout().await {
                    Ok(checkout) => match checkout.checkout_url {
                        Some(url) => navigate_to(&url),
                        None => error_ref.set(Some(
                            "Checkout is not available right now. Please try again.".to_string(),
                        )),
                    },
                    Err(err) => error_ref.set(Some(err.to_string())),
                }
            });
        })
    };

    let on_sign_out = Callback::from(move |event: MouseEvent| {
        event.prevent_default();
        spawn_local(async move {
            OnyxClient::shared().logout().await;
        });
    });

    let on_dismiss = {
        let error_handle = error.clone();
        Callback::from(move |()| error_handle.set(None))
    };

    let body = match &*phase {
        Phase::Checking => html! {
            <p>{"One moment..."}</p>
        },
        Phase::Processing => html! {
            <>
                <h2 class="card-title text-2xl">{"Confirming your payment"}</h2>
                <p>{"Hold tight while we confirm your payment with the billing provider."}</p>
            </>
        },
        Phase::Success => html! {
            <>
                <h2 class="card-title text-2xl">{"You're all set"}</h2>
                <p>{"Payment confirmed. Taking you to your workspace..."}</p>
            </>
        },
        Phase::Failed(message) => html! {
            <>
                <h2 class="card-title text-2xl">{"Something went wrong"}</h2>
                <div class="alert alert-error"><span>{message.clone()}</span></div>
                <p>{format!("If this keeps happening, write to {support_email}.")}</p>
                <div class="card-actions mt-4">
                    <button class="btn btn-primary" onclick={on_upgrade.clone()}>
                        {"Try again"}
                    </button>
                </div>
            </>
        },
        Phase::Offer => html! {
            <>
                <h2 class="card-title text-2xl">{"Unlock your workspace"}</h2>
                <p>{"Your trial has ended. Upgrade to keep your pipeline, activity stream and decisions."}</p>
                <Flash message={(*error).clone()} kind={FlashKind::Error} {on_dismiss} />
                <div class="card-actions mt-4">
                    <button class="btn btn-primary" onclick={on_upgrade}>
                        {"Upgrade now"}
                    </button>
                </div>
            </>
        },
    };

    html! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="card w-full max-w-md shadow-lg bg-base-100">
                <div class="card-body">
                    {body}
                    <div class="text-center text-sm mt-4">
                        <a href="#" onclick={on_sign_out} class="link link-hover">
                            {"Sign out"}
                        </a>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_session_id_from_checkout_return() {
        assert_eq!(
            session_id_from_query("?session_id=cs_123"),
            Some("cs_123".to_string())
        );
        assert_eq!(
            session_id_from_query("?foo=bar&session_id=cs_123&baz=1"),
            Some("cs_123".to_string())
        );
    }

    #[test]
    fn ignores_queries_without_session_id() {
        assert_eq!(session_id_from_query(""), None);
        assert_eq!(session_id_from_query("?foo=bar"), None);
        assert_eq!(session_id_from_query("?session_id="), None);
        assert_eq!(session_id_from_query("session_idea=cs_1"), None);
    }
}
