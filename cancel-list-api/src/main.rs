mod routes;

use axum::{routing::post, Router};
use cancel_list_app::{AppContext, Config};
use cancel_list_ui::pages::{CastVoteFn, GetBoardFn};
use cancel_list_ui::App;
use leptos::prelude::*;
use leptos_axum::{generate_route_list, handle_server_fns_with_context, LeptosRoutes};
use tokio::signal;
use tower_http::compression::CompressionLayer;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let conf = get_configuration(Some("Cargo.toml")).expect("Failed to load Leptos config");
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let app_context = match AppContext::connect(config).await {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    let routes = generate_route_list(App);

    server_fn::axum::register_explicit::<GetBoardFn>();
    server_fn::axum::register_explicit::<CastVoteFn>();
    tracing::info!("Registered server functions: GetBoardFn, CastVoteFn");

    let app = Router::new()
        .merge(routes::router(app_context.clone()))
        .route("/api/{*fn_name}", post({
            let ctx = app_context.clone();
            move |req| {
                let ctx = ctx.clone();
                async move {
                    handle_server_fns_with_context(
                        move || provide_context(ctx.clone()),
                        req
                    ).await
                }
            }
        }))
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            {
                let ctx = app_context.clone();
                move || provide_context(ctx.clone())
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .layer(CompressionLayer::new())
        .with_state(leptos_options);

    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        tracing::info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn shell(options: LeptosOptions) -> impl IntoView {
    use leptos_meta::*;

    let css = r#"
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body {
            font-family: ui-sans-serif, system-ui, -apple-system, 'Segoe UI', Roboto, sans-serif;
            background: #0b0b0b;
            color: #fff;
            min-height: 100vh;
        }
        .container { max-width: 720px; margin: 40px auto; padding: 0 16px; }
        .hero { margin-bottom: 12px; }
        .hero__title { font-size: 40px; font-weight: 800; margin-bottom: 8px; }
        .hero__subtitle { opacity: 0.8; }
        .share { display: flex; gap: 10px; margin-bottom: 12px; flex-wrap: wrap; }
        .share__link {
            padding: 10px 14px; border-radius: 12px; border: 1px solid rgba(255,255,255,0.25);
            background: rgba(255,255,255,0.06); color: inherit; font: inherit; font-weight: 700; cursor: pointer;
        }
        .share__hint { opacity: 0.7; align-self: center; }
        .banner {
            padding: 12px; margin-bottom: 16px; border: 1px solid rgba(255,255,255,0.25);
            border-radius: 12px; font-variant-numeric: tabular-nums;
        }
        .banner--locked { border-color: rgba(255,80,80,0.6); background: rgba(255,80,80,0.08); }
        .notice {
            padding: 12px; margin-bottom: 16px; border: 1px solid rgba(60,255,160,0.4);
            border-radius: 12px; background: rgba(60,255,160,0.06);
        }
        .leaderboard__list { display: grid; gap: 12px; }
        .leaderboard__divider { margin: 18px 0 10px; opacity: 0.75; font-weight: 800; letter-spacing: 0.3px; }
        .leaderboard__empty { opacity: 0.7; }
        .row {
            display: flex; align-items: center; gap: 12px; padding: 14px;
            border-radius: 14px; justify-content: space-between;
        }
        .row--runner-up { padding: 10px 14px; }
        .row__badge {
            min-width: 56px; padding: 4px 10px; border-radius: 999px;
            font-weight: 800; text-align: center; font-variant-numeric: tabular-nums;
        }
        .row__body { flex: 1; }
        .row__title { font-weight: 700; }
        .row__subtitle { opacity: 0.7; font-size: 0.9rem; }
        .row__vote {
            padding: 10px 14px; border-radius: 12px; border: 1px solid rgba(255,255,255,0.25);
            background: rgba(255,255,255,0.06); color: inherit; font-weight: 700; cursor: pointer;
        }
        .row__vote:disabled { opacity: 0.5; cursor: not-allowed; }
        .loading { display: flex; flex-direction: column; align-items: center; padding: 3rem; }
        .loading__spinner {
            width: 40px; height: 40px; border: 4px solid rgba(255,255,255,0.15);
            border-top-color: #ffd700; border-radius: 50%; animation: spin 1s linear infinite;
        }
        @keyframes spin { to { transform: rotate(360deg); } }
        .loading__text { margin-top: 1rem; opacity: 0.7; }
        .error {
            padding: 12px; margin-bottom: 16px; border: 1px solid rgba(255,80,80,0.6);
            border-radius: 12px; background: rgba(255,80,80,0.08);
        }
        .error__retry {
            margin-top: 0.75rem; padding: 0.5rem 1rem; background: rgba(255,80,80,0.5);
            color: #fff; border: none; border-radius: 8px; cursor: pointer;
        }
    "#;

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>🔥</text></svg>"/>
                <style>{css}</style>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}
