use cancel_list_app::domain::BoardState;
use leptos::prelude::*;

/// Countdown line above the list. Turns red once voting locks.
#[component]
pub fn VotingBanner(#[prop(into)] state: Signal<BoardState>) -> impl IntoView {
    let class = move || {
        if state.get().voting_locked() {
            "banner banner--locked"
        } else {
            "banner"
        }
    };

    view! {
        <div class=class>{move || state.get().banner()}</div>
    }
}
