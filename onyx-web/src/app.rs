use crate::api::OnyxClient;
use crate::components::loading::Loading;
use crate::models::app_state::AppState;
use crate::pages::login::LoginPage;
use crate::pages::payment::PaymentPage;
use crate::routes::MainRoute;
use crate::session::{self, AuthStatus, ViewState};
use shared::models::UserProfile;
use wasm_bindgen_futures::spawn_local;
use yew::{Callback, Html, function_component, html, use_effect_with, use_state};
use yew_router::prelude::*;
use yewdux::prelude::use_store;

fn state_for_profile(user: UserProfile) -> AppState {
    let view = session::resolve_view_state(&AuthStatus::Authenticated(user.clone()));
    AppState {
        view: Some(view),
        user: Some(user),
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let (_store_state, store_dispatch) = use_store::<AppState>();
    let app_state = use_state(|| None::<AppState>);

    {
        let app_state_handle = app_state.clone();
        let store_dispatch_handle = store_dispatch.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                // No credential means no status call at all; the page boots
                // straight into the signed-out view.
                let state = match session::load_credential() {
                    None => AppState {
                        view: Some(ViewState::Unauthenticated),
                        user: None,
                    },
                    Some(credential) => {
                        let client = OnyxClient::shared();
                        let status = client.fetch_status(&credential).await;
                        let view = session::resolve_view_state(&status);
                        let user = match status {
                            AuthStatus::Authenticated(user) => Some(user),
                            AuthStatus::Unauthenticated => None,
                        };
                        AppState {
                            view: Some(view),
                            user,
                        }
                    }
                };
                app_state_handle.set(Some(state.clone()));
                store_dispatch_handle.set(state);
            });
            || ()
        });
    }

    let on_authenticated = {
        let state_setter = app_state.clone();
        let dispatch = store_dispatch.clone();
        Callback::from(move |user: UserProfile| {
            let state = state_for_profile(user);
            state_setter.set(Some(state.clone()));
            dispatch.set(state);
        })
    };

    let logout_callback = {
        let state_setter = app_state.clone();
        let dispatch = store_dispatch;
        Callback::from(move |()| {
            let state = AppState {
                view: Some(ViewState::Unauthenticated),
                user: None,
            };
            state_setter.set(Some(state.clone()));
            dispatch.set(state);
        })
    };

    html! {
        {
            match *app_state {
                None => html! { <Loading /> },
                Some(ref state) => match state.view {
                    Some(ViewState::Unauthenticated) => html! {
                        <LoginPage on_success={Some(on_authenticated)} />
                    },
                    Some(ViewState::Unpaid) => html! {
                        <PaymentPage />
                    },
                    Some(ViewState::Ready) => html! {
                        <BrowserRouter>
                            <Switch<MainRoute> render={move |route| crate::routes::switch_with_logout(route, logout_callback.clone())} />
                        </BrowserRouter>
                    },
                    None => html! { <Loading /> },
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(paid: bool) -> UserProfile {
        UserProfile {
            email: "a@b.com".to_string(),
            display_name: None,
            paid,
            subscription_status: None,
        }
    }

    #[test]
    fn paid_profile_boots_into_ready_view() {
        let state = state_for_profile(profile(true));
        assert_eq!(state.view, Some(ViewState::Ready));
        assert_eq!(state.user.unwrap().email, "a@b.com");
    }

    #[test]
    fn unpaid_profile_boots_into_payment_view() {
        let state = state_for_profile(profile(false));
        assert_eq!(state.view, Some(ViewState::Unpaid));
    }
}
