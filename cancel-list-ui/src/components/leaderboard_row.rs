use cancel_list_app::domain::{RankedItem, TOP_COUNT};
use leptos::prelude::*;

#[component]
pub fn LeaderboardRow(
    ranked: RankedItem,
    #[prop(into)] locked: Signal<bool>,
    #[prop(into)] voting_id: Signal<Option<String>>,
    #[prop(into)] on_vote: Callback<String>,
) -> impl IntoView {
    let style = ranked.style();
    let row_css = style.row_css();
    let badge_css = style.badge_css();
    let badge = style.badge_label(ranked.rank);

    let class = if ranked.rank <= TOP_COUNT {
        "row"
    } else {
        "row row--runner-up"
    };
    let subtitle = ranked.item.subtitle();
    let title = ranked.item.title.clone();
    let item_id = ranked.item.id;

    let is_voting = {
        let item_id = item_id.clone();
        Signal::derive(move || voting_id.get().as_deref() == Some(item_id.as_str()))
    };

    let row_style = move || {
        let opacity = if locked.get() { "0.8" } else { "1" };
        format!("{row_css} opacity: {opacity};")
    };

    view! {
        <div class=class style=row_style>
            <div class="row__badge" style=badge_css>{badge}</div>
            <div class="row__body">
                <div class="row__title">{title}</div>
                <div class="row__subtitle">{subtitle}</div>
            </div>
            <button
                class="row__vote"
                disabled=move || locked.get() || is_voting.get()
                on:click=move |_| on_vote.run(item_id.clone())
            >
                {move || {
                    if locked.get() {
                        "Voting closed"
                    } else if is_voting.get() {
                        "Voting…"
                    } else {
                        "Vote to cancel"
                    }
                }}
            </button>
        </div>
    }
}
