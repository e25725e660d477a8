use axum::{
    body::Bytes,
    http::{header, HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use cancel_list_app::domain::{VoteResult, VoterIdentity};
use cancel_list_app::infrastructure::share_image;
use cancel_list_app::{AppContext, Config};
use serde::{Deserialize, Serialize};

const SHARE_TITLE: &str = "The Cancel List | Top 5 this week";
const SHARE_DESCRIPTION: &str = "Click to vote. Live ranking. Weekly reset.";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VoteRequest {
    item_id: Option<String>,
}

#[derive(Serialize)]
struct VoteResponse {
    ok: bool,
    #[serde(flatten)]
    result: VoteResult,
}

/// JSON API, share image and share landing page.
pub fn router<S>(ctx: AppContext) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/api/leaderboard", get({
            let ctx = ctx.clone();
            move || {
                let ctx = ctx.clone();
                async move { leaderboard(ctx).await }
            }
        }))
        .route("/api/vote", post({
            let ctx = ctx.clone();
            move |headers: HeaderMap, body: Bytes| {
                let ctx = ctx.clone();
                async move { vote(ctx, headers, body).await }
            }
        }))
        .route("/og", get({
            let ctx = ctx.clone();
            move || {
                let ctx = ctx.clone();
                async move { og_image(ctx).await }
            }
        }))
        .route("/s", get({
            let ctx = ctx.clone();
            move |headers: HeaderMap| {
                let ctx = ctx.clone();
                async move { Html(render_share_page(public_origin(&ctx.config, &headers).as_deref())) }
            }
        }))
}

async fn leaderboard(ctx: AppContext) -> Response {
    match ctx.get_leaderboard.board().await {
        Ok(board) => Json(board).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn vote(ctx: AppContext, headers: HeaderMap, body: Bytes) -> Response {
    // Unparseable bodies fall through as a missing item id.
    let item_id = serde_json::from_slice::<VoteRequest>(&body)
        .ok()
        .and_then(|req| req.item_id);
    let voter = VoterIdentity::from_cookie_header(
        headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok()),
    );

    let outcome = ctx.record_vote.execute(item_id.as_deref(), &voter.key).await;
    let cookie = voter.cookie_for(&outcome, ctx.config.cookie_secure);

    let mut response = match outcome {
        Ok(result) => Json(VoteResponse { ok: true, result }).into_response(),
        Err(e) => e.into_response(),
    };
    if let Some(cookie) = cookie {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().insert(header::SET_COOKIE, value);
            }
            Err(e) => tracing::warn!("Could not set voter cookie: {}", e),
        }
    }
    response
}

/// SVG card for the current top five, or the placeholder when the board is unreadable.
async fn share_card(ctx: &AppContext) -> String {
    match ctx.get_leaderboard.top(share_image::PREVIEW_COUNT).await {
        Ok(items) => share_image::render(&items),
        Err(e) => {
            tracing::warn!("Share image falling back to placeholder: {}", e);
            share_image::placeholder()
        }
    }
}

async fn og_image(ctx: AppContext) -> Response {
    let svg = share_card(&ctx).await;

    let rasterized = tokio::task::spawn_blocking({
        let svg = svg.clone();
        move || share_image::rasterize(&svg)
    })
    .await;

    let png = match rasterized {
        Ok(Ok(png)) => Some(png),
        Ok(Err(e)) => {
            tracing::warn!("Share image rasterization failed: {}", e);
            None
        }
        Err(e) => {
            tracing::warn!("Share image task failed: {}", e);
            None
        }
    };

    match png {
        Some(png) => (
            [
                (header::CONTENT_TYPE, share_image::CONTENT_TYPE),
                (header::CACHE_CONTROL, "no-store"),
            ],
            png,
        )
            .into_response(),
        None => (
            [
                (header::CONTENT_TYPE, share_image::SVG_CONTENT_TYPE),
                (header::CACHE_CONTROL, "no-store"),
            ],
            svg,
        )
            .into_response(),
    }
}

/// Origin crawlers should use for absolute share URLs. `SITE_URL` wins,
/// otherwise the request's forwarded scheme and `Host` header.
fn public_origin(config: &Config, headers: &HeaderMap) -> Option<String> {
    if let Some(site_url) = &config.site_url {
        return Some(site_url.clone());
    }

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|host| !host.is_empty() && !host.contains(['/', '"', '<', '>', ' ']))?;
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .and_then(|proto| proto.split(',').next())
        .map(str::trim)
        .filter(|proto| matches!(*proto, "http" | "https"))
        .unwrap_or("http");

    Some(format!("{scheme}://{host}"))
}

fn render_share_page(origin: Option<&str>) -> String {
    let origin = origin.unwrap_or("");
    format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <meta name="description" content="{description}">
    <meta property="og:type" content="website">
    <meta property="og:url" content="{origin}/s">
    <meta property="og:title" content="{title}">
    <meta property="og:description" content="{description}">
    <meta property="og:image" content="{origin}/og">
    <meta property="og:image:type" content="{image_type}">
    <meta property="og:image:width" content="{width}">
    <meta property="og:image:height" content="{height}">
    <meta property="og:image:alt" content="{title}">
    <meta name="twitter:card" content="summary_large_image">
    <meta name="twitter:title" content="{title}">
    <meta name="twitter:description" content="{description}">
    <meta name="twitter:image" content="{origin}/og">
    <meta http-equiv="refresh" content="0; url=/">
</head>
<body>
    <script>window.location.replace('/');</script>
    <a href="/">Click to vote</a>
</body>
</html>"#,
        title = SHARE_TITLE,
        description = SHARE_DESCRIPTION,
        image_type = share_image::CONTENT_TYPE,
        width = share_image::WIDTH,
        height = share_image::HEIGHT,
    )
}
