//! Short-lived inline feedback messages.
//!
//! Errors and confirmations surface here instead of being swallowed into
//! the console; each message dismisses itself after a fixed interval.

use gloo_timers::callback::Timeout;
use yew::prelude::*;

/// How long a message stays on screen before auto-dismissing.
const DISMISS_AFTER_MS: u32 = 5_000;

/// Visual flavor of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Error,
    Success,
}

impl FlashKind {
    fn alert_class(self) -> &'static str {
        match self {
            Self::Error => "alert alert-error",
            Self::Success => "alert alert-success",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct FlashProps {
    /// Message to show; `None` renders nothing.
    pub message: Option<String>,
    #[prop_or(FlashKind::Error)]
    pub kind: FlashKind,
    /// Fired when the message times out (or is clicked away).
    pub on_dismiss: Callback<()>,
}

#[function_component(Flash)]
pub fn flash(props: &FlashProps) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with(props.message.clone(), move |message| {
            let timer = message
                .as_ref()
                .map(|_| Timeout::new(DISMISS_AFTER_MS, move || on_dismiss.emit(())));
            // Replacing or clearing the message drops the previous timer.
            move || drop(timer)
        });
    }

    let Some(text) = props.message.clone() else {
        return html! {};
    };
    let onclick = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_| on_dismiss.emit(()))
    };

    html! {
        <div class={props.kind.alert_class()} role="alert" {onclick}>
            <span>{text}</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_maps_to_alert_class() {
        assert_eq!(FlashKind::Error.alert_class(), "alert alert-error");
        assert_eq!(FlashKind::Success.alert_class(), "alert alert-success");
    }
}
