use crate::api::OnyxClient;
use crate::components::{Flash, FlashKind};
use shared::models::{SignupRequest, UserProfile};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Which form the card is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    SignIn,
    SignUp,
}

#[derive(yew::Properties, PartialEq)]
pub struct LoginPageProps {
    /// Fired with the fresh profile once credentials are accepted.
    #[prop_or_default]
    pub on_success: Option<Callback<UserProfile>>,
}

#[function_component(LoginPage)]
pub fn login_page(props: &LoginPageProps) -> Html {
    let mode = use_state(|| Mode::SignIn);
    let name = use_state(String::new);
    let company = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let onsubmit = {
        let mode_handle = mode.clone();
        let name_handle = name.clone();
        let company_handle = company.clone();
        let email_handle = email.clone();
        let password_handle = password.clone();
        let error_handle = error.clone();
        let loading_handle = loading.clone();
        let on_success = props.on_success.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let current_mode = *mode_handle;
            let name_value = (*name_handle).clone();
            let company_value = (*company_handle).clone();
            let email_value = (*email_handle).clone();
            let password_value = (*password_handle).clone();
            loading_handle.set(true);
            error_handle.set(None);
            let on_success_cb = on_success.clone();
            let loading_ref = loading_handle.clone();
            let error_ref = error_handle.clone();
            spawn_local(async move {
                let client = OnyxClient::shared();
                let result = match current_mode {
                    Mode::SignIn => client.login(&email_value, &password_value).await,
                    Mode::SignUp => {
                        let request = SignupRequest {
                            name: name_value.trim().to_string(),
                            email: email_value.trim().to_string(),
                            password: password_value,
                            company: if company_value.trim().is_empty() {
                                None
                            } else {
                                Some(company_value.trim().to_string())
                            },
                        };
                        client.signup(&request).await
                    }
                };
                match result {
                    Ok(user) => {
                        if let Some(callback) = on_success_cb {
                            callback.emit(user);
                        }
                    }
                    Err(err) => {
                        error_ref.set(Some(err.to_string()));
                    }
                }
                loading_ref.set(false);
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
    let on_name_change = input_callback(name.clone());
    let on_company_change = input_callback(company.clone());
    let on_email_change = input_callback(email.clone());
    let on_password_change = input_callback(password.clone());

    let toggle_mode = {
        let mode_handle = mode.clone();
        let error_handle = error.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            error_handle.set(None);
            mode_handle.set(match *mode_handle {
                Mode::SignIn => Mode::SignUp,
                Mode::SignUp => Mode::SignIn,
            });
        })
    };

    let on_dismiss = {
        let error_handle = error.clone();
        Callback::from(move |()| error_handle.set(None))
    };

    let is_busy = *loading;
    let signing_up = *mode == Mode::SignUp;
    let (title, submit_label, busy_label) = if signing_up {
        ("Create your account", "Start free trial", "Creating account...")
    } else {
        ("Sign in", "Sign In", "Signing in...")
    };

    html! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="card w-full max-w-md shadow-lg bg-base-100">
                <form class="card-body" onsubmit={onsubmit}>
                    <h2 class="card-title text-2xl">{title}</h2>
                    <Flash message={(*error).clone()} kind={FlashKind::Error} {on_dismiss} />
                    if signing_up {
                        <>
                        <div class="form-control">
                            <label class="label" for="name">
                                <span class="label-text">{"Name"}</span>
                            </label>
                            <input
                                id="name"
                                class="input input-bordered"
                                type="text"
                                value={(*name).clone()}
                                oninput={on_name_change}
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="company">
                                <span class="label-text">{"Company (optional)"}</span>
                            </label>
                            <input
                                id="company"
                                class="input input-bordered"
                                type="text"
                                value={(*company).clone()}
                                oninput={on_company_change}
                            />
                        </div>
                        </>
                    }
                    <div class="form-control">
                        <label class="label" for="email">
                            <span class="label-text">{"Email"}</span>
                        </label>
                        <input
                            id="email"
                            class="input input-bordered"
                            type="email"
                            value={(*email).clone()}
                            oninput={on_email_change}
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="password">
                            <span class="label-text">{"Password"}</span>
                        </label>
                        <input
                            id="password"
                            class="input input-bordered"
                            type="password"
                            value={(*password).clone()}
                            oninput={on_password_change}
                        />
                    </div>
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" type="submit" disabled={is_busy}>
                            {if is_busy { busy_label } else { submit_label }}
                        </button>
                    </div>
                    <div class="text-center text-sm mt-2">
                        <a href="#" onclick={toggle_mode} class="link link-hover">
                            {
                                if signing_up {
                                    "Already have an account? Sign in"
                                } else {
                                    "New to Onyx? Start a free trial"
                                }
                            }
                        </a>
                    </div>
                </form>
            </div>
        </div>
    }
}
