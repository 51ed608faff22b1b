use crate::{
    containers::layout::Layout, models::app_state::AppState, pages::*, session::ViewState,
};
use wasm_bindgen::prelude::*;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

/// The main routes
#[derive(Debug, Clone, PartialEq, Routable)]
pub enum MainRoute {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/payment")]
    Payment,
    #[at("/app")]
    Workspace,
    #[at("/app/decision")]
    Decision,
    #[at("/app/library")]
    Library,
    #[at("/app/new")]
    NewDecision,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Extract one `key=value` pair from a location query string.
pub(crate) fn query_param(query: &str, key: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    for pair in query.split('&') {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        if name == key && !value.is_empty() {
            return Some(value.to_string());
        }
    }
    None
}

#[derive(Properties, PartialEq)]
pub struct MainRouteViewProps {
    pub route: MainRoute,
    pub on_logout: Callback<()>,
}

#[function_component(MainRouteView)]
fn main_route_view(props: &MainRouteViewProps) -> Html {
    let view = use_selector(|state: &AppState| state.view);
    let view = *view;
    let on_logout = props.on_logout.clone();

    match props.route.clone() {
        MainRoute::Login => match view {
            Some(ViewState::Ready | ViewState::Unpaid) => {
                html! { <Redirect<MainRoute> to={MainRoute::Home} /> }
            }
            _ => html! { <LoginPage /> },
        },
        MainRoute::Home => match view {
            Some(ViewState::Ready) => {
                html! { <Redirect<MainRoute> to={MainRoute::Workspace} /> }
            }
            Some(ViewState::Unpaid) => {
                html! { <Redirect<MainRoute> to={MainRoute::Payment} /> }
            }
            _ => html! { <Redirect<MainRoute> to={MainRoute::Login} /> },
        },
        MainRoute::Workspace => match view {
            Some(ViewState::Ready) => html! {
                <Layout on_logout={Some(on_logout)}>
                    <WorkspacePage />
                </Layout>
            },
            Some(ViewState::Unpaid) => {
                html! { <Redirect<MainRoute> to={MainRoute::Payment} /> }
            }
            _ => html! { <Redirect<MainRoute> to={MainRoute::Login} /> },
        },
        MainRoute::Decision => match view {
            Some(ViewState::Ready) => html! {
                <Layout on_logout={Some(on_logout)}>
                    <DecisionPage />
                </Layout>
            },
            Some(ViewState::Unpaid) => {
                html! { <Redirect<MainRoute> to={MainRoute::Payment} /> }
            }
            _ => html! { <Redirect<MainRoute> to={MainRoute::Login} /> },
        },
        MainRoute::Library => match view {
            Some(ViewState::Ready) => html! {
                <Layout on_logout={Some(on_logout)}>
                    <LibraryPage />
                </Layout>
            },
            Some(ViewState::Unpaid) => {
                html! { <Redirect<MainRoute> to={MainRoute::Payment} /> }
            }
            _ => html! { <Redirect<MainRoute> to={MainRoute::Login} /> },
        },
        MainRoute::NewDecision => match view {
            Some(ViewState::Ready) => html! {
                <Layout on_logout={Some(on_logout)}>
                    <NewDecisionPage />
                </Layout>
            },
            Some(ViewState::Unpaid) => {
                html! { <Redirect<MainRoute> to={MainRoute::Payment} /> }
            }
            _ => html! { <Redirect<MainRoute> to={MainRoute::Login} /> },
        },
        MainRoute::Payment => match view {
            Some(ViewState::Ready | ViewState::Unpaid) => html! {
                <Layout on_logout={Some(on_logout)}>
                    <PaymentPage />
                </Layout>
            },
            _ => html! { <Redirect<MainRoute> to={MainRoute::Login} /> },
        },
        MainRoute::NotFound => match view {
            Some(ViewState::Ready | ViewState::Unpaid) => html! {
                <Layout on_logout={Some(on_logout)}>
                    <ErrorPage />
                </Layout>
            },
            _ => html! { <Redirect<MainRoute> to={MainRoute::Login} /> },
        },
    }
}

/// Switch function for the main routes.
pub fn switch_with_logout(route: MainRoute, on_logout: Callback<()>) -> Html {
    log(std::format!("Switching to route: {:?}", route).as_str());
    html! { <MainRouteView {route} {on_logout} /> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_map_to_expected_paths() {
        assert_eq!(MainRoute::Home.to_path(), "/");
        assert_eq!(MainRoute::Login.to_path(), "/login");
        assert_eq!(MainRoute::Payment.to_path(), "/payment");
        assert_eq!(MainRoute::Workspace.to_path(), "/app");
        assert_eq!(MainRoute::Decision.to_path(), "/app/decision");
        assert_eq!(MainRoute::Library.to_path(), "/app/library");
        assert_eq!(MainRoute::NewDecision.to_path(), "/app/new");
        assert_eq!(MainRoute::NotFound.to_path(), "/404");
    }

    #[test]
    fn query_params_are_extracted_by_key() {
        assert_eq!(
            query_param("?decision_id=d-7&x=1", "decision_id"),
            Some("d-7".to_string())
        );
        assert_eq!(
            query_param("decision_id=d-7", "decision_id"),
            Some("d-7".to_string())
        );
        assert_eq!(query_param("?decision_id=", "decision_id"), None);
        assert_eq!(query_param("?decision_idea=d-7", "decision_id"), None);
        assert_eq!(query_param("", "decision_id"), None);
    }

    #[test]
    fn unknown_paths_fall_through_to_not_found() {
        assert_eq!(
            MainRoute::recognize("/definitely-not-a-page"),
            Some(MainRoute::NotFound)
        );
        assert_eq!(MainRoute::recognize("/app"), Some(MainRoute::Workspace));
    }
}
