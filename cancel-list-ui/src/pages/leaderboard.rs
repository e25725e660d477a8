use crate::components::{ErrorDisplay, LeaderboardRow, LoadingSpinner, VotingBanner};
use cancel_list_app::domain::{Board, BoardState, RankedItem, VoteResult};
use cancel_list_errors::AppError;
use chrono::Utc;
use leptos::prelude::*;
use server_fn::ServerFnError;
use std::time::Duration;

#[server(GetBoardFn, "/api", endpoint = "leaderboard_page")]
pub async fn get_board() -> Result<Board, ServerFnError> {
    use cancel_list_app::AppContext;

    let ctx = expect_context::<AppContext>();

    ctx.get_leaderboard
        .board()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[server(CastVoteFn, "/api", endpoint = "cast_vote")]
pub async fn cast_vote(item_id: String) -> Result<VoteResult, ServerFnError> {
    use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
    use cancel_list_app::domain::VoterIdentity;
    use cancel_list_app::AppContext;
    use leptos_axum::ResponseOptions;

    let ctx = expect_context::<AppContext>();
    let response = expect_context::<ResponseOptions>();

    let headers: HeaderMap = leptos_axum::extract()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let voter = VoterIdentity::from_cookie_header(
        headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok()),
    );

    let outcome = ctx.record_vote.execute(Some(&item_id), &voter.key).await;
    if let Some(cookie) = voter.cookie_for(&outcome, ctx.config.cookie_secure) {
        let value =
            HeaderValue::from_str(&cookie).map_err(|e| ServerFnError::new(e.to_string()))?;
        response.insert_header(header::SET_COOKIE, value);
    }

    outcome.map_err(|e| {
        if let Ok(status) = StatusCode::from_u16(e.status_code()) {
            response.set_status(status);
        }
        ServerFnError::new(e.to_string())
    })
}

const SHARE_COPIED: &str = "Share link copied! Paste it anywhere.";
const SHARE_COPY_FAILED: &str = "Could not copy. Try manually copying /s after your URL.";

/// Writes `<origin>/s` to the clipboard.
#[cfg(feature = "hydrate")]
async fn copy_share_link() -> Result<(), ()> {
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or(())?;
    let origin = window.location().origin().map_err(|_| ())?;
    let promise = window.navigator().clipboard().write_text(&format!("{origin}/s"));
    JsFuture::from(promise).await.map(|_| ()).map_err(|_| ())
}

#[cfg(not(feature = "hydrate"))]
async fn copy_share_link() -> Result<(), ()> {
    Err(())
}

/// Server functions carry the `AppError` message as-is.
fn vote_failed_message(err: &ServerFnError) -> String {
    match err {
        ServerFnError::ServerError(message) => message.clone(),
        other => other.to_string(),
    }
}

fn load_failed_message(err: &ServerFnError) -> String {
    match err {
        ServerFnError::ServerError(message) => message
            .parse::<AppError>()
            .map(|e| e.user_message().to_string())
            .unwrap_or_else(|_| message.clone()),
        _ => "Failed to load leaderboard".to_string(),
    }
}

#[component]
pub fn LeaderboardPage() -> impl IntoView {
    let cast_vote = ServerAction::<CastVoteFn>::new();
    let board = Resource::new(move || cast_vote.version().get(), |_| get_board());

    // Advisory countdown; the server re-checks the period on every vote.
    let now = RwSignal::new(Utc::now());
    Effect::new(move |_| {
        if let Ok(handle) =
            set_interval_with_handle(move || now.set(Utc::now()), Duration::from_secs(1))
        {
            on_cleanup(move || handle.clear());
        }
    });

    let state = Memo::new(move |_| {
        let loaded = board.get();
        BoardState::evaluate(loaded.as_ref(), now.get())
    });
    let locked = Signal::derive(move || state.get().voting_locked());
    let voting_id = Signal::derive(move || cast_vote.input().get().map(|input| input.item_id));
    let local_error = RwSignal::new(None::<String>);
    let local_notice = RwSignal::new(None::<String>);

    let on_vote = Callback::new(move |item_id: String| {
        if state.get_untracked().voting_locked() {
            local_error.set(Some("Voting is closed right now.".to_string()));
            return;
        }
        local_error.set(None);
        local_notice.set(None);
        cast_vote.dispatch(CastVoteFn { item_id });
    });

    let on_share = move |_: leptos::ev::MouseEvent| {
        leptos::task::spawn_local(async move {
            match copy_share_link().await {
                Ok(()) => {
                    local_error.set(None);
                    local_notice.set(Some(SHARE_COPIED.to_string()));
                }
                Err(()) => local_error.set(Some(SHARE_COPY_FAILED.to_string())),
            }
        });
    };

    let feedback = move || {
        if let Some(message) = local_error.get() {
            return Some(view! { <ErrorDisplay message=message/> }.into_any());
        }
        if let Some(notice) = local_notice.get() {
            return Some(view! { <div class="notice">{notice}</div> }.into_any());
        }
        cast_vote.value().get().map(|result| match result {
            Ok(vote) => view! { <div class="notice">{vote.message()}</div> }.into_any(),
            Err(e) => view! { <ErrorDisplay message=vote_failed_message(&e)/> }.into_any(),
        })
    };

    let rows = move |items: Vec<RankedItem>| {
        items
            .into_iter()
            .map(|ranked| {
                view! {
                    <LeaderboardRow
                        ranked=ranked
                        locked=locked
                        voting_id=voting_id
                        on_vote=on_vote
                    />
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="hero">
            <h1 class="hero__title">"The Cancel List"</h1>
            <p class="hero__subtitle">"Vote + live ranking (weekly)"</p>
        </div>

        <div class="share">
            <button class="share__link" on:click=on_share>"Copy share link"</button>
            <span class="share__hint">"Shares /s (shows Top 5 + \"Click to vote\")"</span>
        </div>

        <VotingBanner state=state/>

        {feedback}

        <div class="leaderboard">
            <Suspense fallback=move || view! { <LoadingSpinner/> }>
                {move || {
                    board.get().map(|result| {
                        match result {
                            Ok(board) => {
                                let standings = board.standings();
                                if standings.is_empty() {
                                    view! {
                                        <p class="leaderboard__empty">"Nothing to vote on yet."</p>
                                    }.into_any()
                                } else {
                                    let has_runner_ups = !standings.runner_ups.is_empty();
                                    view! {
                                        <div class="leaderboard__list">{rows(standings.top)}</div>
                                        <Show when=move || has_runner_ups>
                                            <p class="leaderboard__divider">"Runner-ups"</p>
                                        </Show>
                                        <div class="leaderboard__list">{rows(standings.runner_ups)}</div>
                                    }.into_any()
                                }
                            }
                            Err(e) => view! {
                                <ErrorDisplay
                                    message=load_failed_message(&e)
                                    on_retry=Callback::new(move |_| board.refetch())
                                />
                            }.into_any()
                        }
                    })
                }}
            </Suspense>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_failure_shows_server_message() {
        let err = ServerFnError::new(AppError::PeriodEnded.to_string());
        assert_eq!(vote_failed_message(&err), "Voting for this week has ended.");
    }

    #[tokio::test]
    async fn test_copy_share_link_needs_a_browser() {
        assert_eq!(copy_share_link().await, Err(()));
    }

    #[test]
    fn test_load_failure_is_user_friendly() {
        let err = ServerFnError::new(AppError::Storage("relation items does not exist".into()).to_string());
        assert_eq!(
            load_failed_message(&err),
            "Something went wrong on our side. Try again later."
        );
    }
}
