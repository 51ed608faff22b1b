use crate::api::OnyxClient;
use crate::models::app_state::AppState;
use crate::routes::MainRoute;
use wasm_bindgen_futures::spawn_local;
use web_sys::window;
use yew::{Callback, Children, Html, Properties, function_component, html, use_effect_with};
use yew_router::prelude::Link;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
    #[prop_or_default]
    pub on_logout: Option<Callback<()>>,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    // Adds data-theme attribute to html tag for theme support
    use_effect_with((), |_| {
        if let Some(window) = window() {
            if let Some(document) = window.document() {
                if let Some(html_element) = document.document_element() {
                    html_element
                        .set_attribute("data-theme", "dark")
                        .unwrap_or_default();
                }
            }
        }
        || {}
    });

    let user = use_selector(|state: &AppState| state.user.clone());
    let user_opt = (*user).clone();

    let on_logout_click = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |event: yew::MouseEvent| {
            event.prevent_default();
            let on_logout = on_logout.clone();
            spawn_local(async move {
                // Clears local state and navigates away even when the
                // server call fails.
                OnyxClient::shared().logout().await;
                if let Some(callback) = on_logout {
                    callback.emit(());
                }
            });
        })
    };

    html! {
        <div class="min-h-screen bg-base-100 flex flex-col">
            <nav class="navbar justify-between bg-base-300">
                <div class="flex items-center gap-1">
                    <a class="btn btn-ghost text-lg">
                        <Link<MainRoute> to={MainRoute::Workspace} classes="text-lg">
                            {"Onyx"}
                        </Link<MainRoute>>
                    </a>
                    <Link<MainRoute> to={MainRoute::Decision} classes="btn btn-ghost btn-sm">
                        {"Decisions"}
                    </Link<MainRoute>>
                    <Link<MainRoute> to={MainRoute::Library} classes="btn btn-ghost btn-sm">
                        {"Library"}
                    </Link<MainRoute>>
                </div>
                <div class="flex items-center gap-2">
                    {
                        user_opt.as_ref().map_or_else(|| html! {}, |user| html! {
                            <span class="text-sm text-base-content/80 mr-2">
                                { user.display_label().to_string() }
                            </span>
                        })
                    }
                    <button class="btn btn-ghost btn-sm" onclick={on_logout_click}>
                        {"Sign out"}
                    </button>
                </div>
            </nav>
            <main class="flex-grow p-4 transition-all duration-300">
                {props.children.clone()}
            </main>
            <footer class="footer footer-center p-4 border-t border-base-300 text-base-content">
                <div>
                    <p>{"© 2026 Onyx · Powered by Rust, Yew and DaisyUI"}</p>
                </div>
            </footer>
        </div>
    }
}
