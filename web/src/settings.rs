use serde::{Deserialize, Serialize};
use yew::prelude::*;

use crate::theme::Theme;
use crate::utils::*;

/// Pacing knobs for the view layer. The game state itself commits every roll
/// atomically; these only shape the animation around it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct Settings {
    /// Milliseconds between token hops while it walks to the landed cell.
    pub walk_step_ms: u32,
    /// Milliseconds a reward popup stays up before dismissing itself.
    pub reward_timeout_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            walk_step_ms: 500,
            reward_timeout_ms: 5000,
        }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "gattino:settings";
}

const PACES: &[(&str, u32)] = &[("Stroll", 800), ("Trot", 500), ("Dash", 250)];

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct SettingsProps {
    #[prop_or_default]
    pub open: bool,
    pub settings: Settings,
    pub on_update: Callback<Settings>,
    pub on_close: Callback<()>,
}

#[function_component]
pub(crate) fn SettingsView(props: &SettingsProps) -> Html {
    let SettingsProps {
        open,
        settings,
        on_update,
        on_close,
    } = props.clone();

    let theme_item = |label: &'static str, theme: Option<Theme>| {
        let onclick = Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            Theme::apply(theme);
        });
        html! { <li><a href="#" {onclick}>{label}</a></li> }
    };

    let pace_item = |label: &'static str, walk_step_ms: u32| {
        let on_update = on_update.clone();
        let selected = settings.walk_step_ms == walk_step_ms;
        let onclick = Callback::from(move |_: MouseEvent| {
            on_update.emit(Settings {
                walk_step_ms,
                ..settings
            })
        });
        html! {
            <li>
                <button class={selected.then_some("selected")} {onclick}>{label}</button>
            </li>
        }
    };

    let close = Callback::from(move |_: MouseEvent| on_close.emit(()));

    html! {
        <dialog id="settings" {open}>
            <article>
                <h2>{"Settings"}</h2>
                <h3>{"Theme"}</h3>
                <ul>
                    { theme_item("Auto", None) }
                    { theme_item("Light", Some(Theme::Light)) }
                    { theme_item("Dark", Some(Theme::Dark)) }
                </ul>
                <h3>{"Walk pace"}</h3>
                <ul>
                    { for PACES.iter().map(|&(label, ms)| pace_item(label, ms)) }
                </ul>
                <footer>
                    <button onclick={close}>{"Close"}</button>
                </footer>
            </article>
        </dialog>
    }
}
