//! JSON API and static asset server

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::aggregate::PostRange;
use crate::config::{DisplayConfig, PagesConfig, PersonConfig, SocialLink};
use crate::content::{Collection, ContentItem, MarkdownRenderer};
use crate::github::{showcase, LanguageStat, RemoteRepository, RepoFetcher, RepoFilter, RepoSort, RepoTotals};
use crate::helpers::local_time;
use crate::Portfolio;

/// Shared server state
pub struct AppState {
    pub portfolio: Portfolio,
    pub fetcher: Option<RepoFetcher>,
    renderer: MarkdownRenderer,
}

impl AppState {
    pub fn new(portfolio: Portfolio, fetcher: Option<RepoFetcher>) -> Self {
        Self {
            portfolio,
            fetcher,
            renderer: MarkdownRenderer::new(),
        }
    }

    async fn showcase_repos(&self) -> Vec<RemoteRepository> {
        match &self.fetcher {
            Some(fetcher) => {
                fetcher
                    .fetch_repos(&self.portfolio.config.github.username)
                    .await
            }
            None => Vec::new(),
        }
    }
}

/// Error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Query for the collection endpoints
#[derive(Debug, Default, Deserialize)]
pub struct CollectionQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Query for GET /api/projects
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl RangeQuery {
    fn range(&self) -> Option<PostRange> {
        if self.start.is_none() && self.end.is_none() {
            return None;
        }
        Some(PostRange::new(self.start.unwrap_or(1), self.end))
    }
}

/// Query for GET /api/repos
#[derive(Debug, Default, Deserialize)]
pub struct RepoQuery {
    pub filter: Option<String>,
    pub sort: Option<String>,
}

/// A content item with its body rendered
#[derive(Debug, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub item: ContentItem,
    pub html: String,
}

/// A repository with its card image
#[derive(Debug, Serialize)]
pub struct RepoCard {
    #[serde(flatten)]
    pub repo: RemoteRepository,
    pub image: String,
}

/// Response for GET /api/repos/stats
#[derive(Debug, Serialize)]
pub struct RepoStats {
    pub totals: RepoTotals,
    pub languages: Vec<LanguageStat>,
}

/// Response for GET /api/site
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteInfo {
    pub name: String,
    pub person: PersonConfig,
    pub social: Vec<SocialLink>,
    pub pages: PagesConfig,
    pub routes: IndexMap<String, bool>,
    pub display: DisplayConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_time: Option<String>,
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let public_dir = state.portfolio.public_dir.clone();

    Router::new()
        .route("/api/posts", get(list_posts))
        .route("/api/posts/:slug", get(get_post))
        .route("/api/projects", get(list_projects))
        .route("/api/repos", get(list_repos))
        .route("/api/repos/stats", get(repo_stats))
        .route("/api/services", get(list_services))
        .route("/api/services/:slug", get(get_service))
        .route("/api/site", get(site_info))
        .route("/health", get(health))
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(portfolio: Portfolio, ip: &str, port: u16) -> Result<()> {
    let fetcher = if portfolio.config.github.display {
        Some(RepoFetcher::new(&portfolio.config.github)?)
    } else {
        None
    };
    let app = router(Arc::new(AppState::new(portfolio, fetcher)));

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// GET /api/posts?type=work|blog
async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CollectionQuery>,
) -> Response {
    let collection = Collection::from_query(query.kind.as_deref());
    match state.portfolio.posts(collection) {
        Ok(posts) => Json(posts).into_response(),
        Err(e) => {
            tracing::error!("Error reading {} posts: {}", collection, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch posts")
        }
    }
}

/// GET /api/posts/:slug?type=work|blog
async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<CollectionQuery>,
) -> Response {
    let collection = Collection::from_query(query.kind.as_deref());
    match state.portfolio.post(collection, &slug) {
        Ok(Some(item)) => {
            let html = state.renderer.render(&item.content);
            Json(PostDetail { item, html }).into_response()
        }
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Post not found"),
        Err(e) => {
            tracing::error!("Error reading {} post {}: {}", collection, slug, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch post")
        }
    }
}

/// GET /api/projects?start=&end=
async fn list_projects(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RangeQuery>,
) -> Response {
    match state
        .portfolio
        .projects(state.fetcher.as_ref(), query.range())
        .await
    {
        Ok(projects) => Json(projects).into_response(),
        Err(e) => {
            tracing::error!("Error building project list: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch projects")
        }
    }
}

/// GET /api/repos?filter=all|featured|recent&sort=updated|stars|forks|name
async fn list_repos(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RepoQuery>,
) -> Response {
    let filter = match query.filter.as_deref().map(str::parse::<RepoFilter>) {
        Some(Err(e)) => return error_response(StatusCode::BAD_REQUEST, &e),
        Some(Ok(filter)) => filter,
        None => RepoFilter::default(),
    };
    let sort = match query.sort.as_deref().map(str::parse::<RepoSort>) {
        Some(Err(e)) => return error_response(StatusCode::BAD_REQUEST, &e),
        Some(Ok(sort)) => sort,
        None => RepoSort::default(),
    };

    let repos = showcase::select(state.showcase_repos().await, filter, sort, Utc::now());
    let cards: Vec<RepoCard> = repos
        .into_iter()
        .map(|repo| RepoCard {
            image: showcase::repo_image(&repo),
            repo,
        })
        .collect();
    Json(cards).into_response()
}

/// GET /api/repos/stats
async fn repo_stats(State(state): State<Arc<AppState>>) -> Json<RepoStats> {
    let repos = state.showcase_repos().await;
    Json(RepoStats {
        totals: showcase::totals(&repos),
        languages: showcase::language_stats(&repos),
    })
}

/// GET /api/services
async fn list_services(State(state): State<Arc<AppState>>) -> Response {
    match state.portfolio.services() {
        Ok(services) => Json(services).into_response(),
        Err(e) => {
            tracing::error!("Error reading services: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch services")
        }
    }
}

/// GET /api/services/:slug
async fn get_service(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    match state.portfolio.service(&slug) {
        Ok(Some(service)) => Json(service).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Service not found"),
        Err(e) => {
            tracing::error!("Error reading service {}: {}", slug, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch service")
        }
    }
}

/// GET /api/site
async fn site_info(State(state): State<Arc<AppState>>) -> Json<SiteInfo> {
    let config = &state.portfolio.config;
    let local_time = if config.display.time {
        local_time(&config.person.location, Utc::now())
    } else {
        None
    };

    Json(SiteInfo {
        name: config.person.name(),
        person: config.person.clone(),
        social: config.social.clone(),
        pages: config.pages.clone(),
        routes: config.routes.clone(),
        display: config.display.clone(),
        local_time,
    })
}

/// GET /health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn write_site(tmp: &TempDir) {
        let base = tmp.path();
        for dir in ["content/work", "content/blog", "content/services", "public/images"] {
            fs::create_dir_all(base.join(dir)).unwrap();
        }
        fs::write(
            base.join("content/work/dashboard.mdx"),
            "---\ntitle: Power BI Dashboard\npublishedAt: 2024-03-01\n---\nKPIs",
        )
        .unwrap();
        fs::write(
            base.join("content/work/pipeline.mdx"),
            "---\ntitle: Data Pipeline\npublishedAt: 2024-05-01\n---\n## Design\n\nStreaming.",
        )
        .unwrap();
        fs::write(
            base.join("content/blog/hello.mdx"),
            "---\ntitle: Hello\nsummary: First post\npublishedAt: 2025-01-01\n---\nHi",
        )
        .unwrap();
        fs::write(
            base.join("content/services/consulting.md"),
            "---\ntitle: Consulting\ndescription: Architecture reviews\n---\nDetails",
        )
        .unwrap();
        fs::write(base.join("public/images/avatar.txt"), "avatar").unwrap();
    }

    fn app_with(tmp: &TempDir, config: SiteConfig, fetcher: Option<RepoFetcher>) -> Router {
        let portfolio = Portfolio::with_config(tmp.path(), config);
        router(Arc::new(AppState::new(portfolio, fetcher)))
    }

    fn app(tmp: &TempDir) -> Router {
        app_with(tmp, SiteConfig::default(), None)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let req = Request::get(uri).body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let body = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, value)
    }

    async fn upstream() -> String {
        let repos = json!([
            {
                "id": 11, "name": "data-pipeline-automation", "description": "ETL",
                "html_url": "https://github.com/someone/data-pipeline-automation",
                "language": "Python", "stargazers_count": 5, "forks_count": 1,
                "created_at": "2024-04-01T00:00:00Z", "updated_at": "2024-06-01T00:00:00Z",
                "fork": false, "private": false, "owner": { "login": "someone" }
            },
            {
                "id": 12, "name": "forked-lib", "description": "Not mine",
                "html_url": "https://github.com/someone/forked-lib",
                "language": "Rust", "stargazers_count": 0, "forks_count": 0,
                "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z",
                "fork": true, "private": false, "owner": { "login": "someone" }
            }
        ]);
        let app = Router::new().route(
            "/users/:user/repos",
            axum::routing::get(move || {
                let repos = repos.clone();
                async move { Json(repos) }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn app_with_upstream(tmp: &TempDir) -> Router {
        let mut config = SiteConfig::default();
        config.github.username = "someone".to_string();
        config.github.api_base = upstream().await;
        let fetcher = RepoFetcher::new(&config.github).unwrap();
        app_with(tmp, config, Some(fetcher))
    }

    #[tokio::test]
    async fn test_posts_default_to_work() {
        let tmp = TempDir::new().unwrap();
        write_site(&tmp);
        let (status, body) = get(app(&tmp), "/api/posts").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["slug"], "pipeline");
        assert_eq!(body[1]["slug"], "dashboard");
        assert_eq!(body[0]["metadata"]["publishedAt"], "2024-05-01");
    }

    #[tokio::test]
    async fn test_posts_blog() {
        let tmp = TempDir::new().unwrap();
        write_site(&tmp);
        let (status, body) = get(app(&tmp), "/api/posts?type=blog").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["metadata"]["summary"], "First post");
    }

    #[tokio::test]
    async fn test_posts_missing_directory_is_empty_ok() {
        let tmp = TempDir::new().unwrap();
        let (status, body) = get(app(&tmp), "/api/posts?type=blog").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_single_post_renders_html() {
        let tmp = TempDir::new().unwrap();
        write_site(&tmp);
        let (status, body) = get(app(&tmp), "/api/posts/pipeline?type=work").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["metadata"]["title"], "Data Pipeline");
        assert!(body["html"].as_str().unwrap().contains("<h2>Design</h2>"));

        let (status, body) = get(app(&tmp), "/api/posts/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Post not found");
    }

    #[tokio::test]
    async fn test_unreadable_post_is_not_found() {
        let tmp = TempDir::new().unwrap();
        write_site(&tmp);
        fs::write(tmp.path().join("content/work/bad.mdx"), b"\xff\xfe").unwrap();
        fs::write(tmp.path().join("content/services/bad.md"), b"\xff\xfe").unwrap();

        let (status, body) = get(app(&tmp), "/api/posts").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (status, body) = get(app(&tmp), "/api/posts/bad").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Post not found");

        let (status, _) = get(app(&tmp), "/api/services/bad").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_projects_merge_remote() {
        let tmp = TempDir::new().unwrap();
        write_site(&tmp);
        let (status, body) = get(app_with_upstream(&tmp).await, "/api/projects").await;
        assert_eq!(status, StatusCode::OK);

        let slugs: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["slug"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            slugs,
            vec!["pipeline", "data-pipeline-automation", "dashboard"]
        );
        assert_eq!(body[1]["metadata"]["title"], "Data Pipeline Automation");
        assert_eq!(body[1]["origin"], "remote");
    }

    #[tokio::test]
    async fn test_projects_range() {
        let tmp = TempDir::new().unwrap();
        write_site(&tmp);
        let (status, body) = get(app_with_upstream(&tmp).await, "/api/projects?start=2&end=3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["slug"], "data-pipeline-automation");
    }

    #[tokio::test]
    async fn test_projects_without_upstream() {
        let tmp = TempDir::new().unwrap();
        write_site(&tmp);
        let (status, body) = get(app(&tmp), "/api/projects?end=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["slug"], "pipeline");
    }

    #[tokio::test]
    async fn test_repos_and_stats() {
        let tmp = TempDir::new().unwrap();
        let (status, body) = get(app_with_upstream(&tmp).await, "/api/repos?sort=stars").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["stargazers_count"], 5);
        assert_eq!(
            body[0]["image"],
            "https://opengraph.githubassets.com/11/someone/data-pipeline-automation"
        );

        let (status, body) = get(app_with_upstream(&tmp).await, "/api/repos/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totals"]["stars"], 5);
        assert_eq!(body["languages"][0]["name"], "Python");
        assert_eq!(body["languages"][0]["percentage"], 100);
    }

    #[tokio::test]
    async fn test_repos_rejects_unknown_sort() {
        let tmp = TempDir::new().unwrap();
        let (status, body) = get(app(&tmp), "/api/repos?sort=popularity").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("popularity"));
    }

    #[tokio::test]
    async fn test_services() {
        let tmp = TempDir::new().unwrap();
        write_site(&tmp);
        let (status, body) = get(app(&tmp), "/api/services").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["slug"], "consulting");
        assert_eq!(body[0]["description"], "Architecture reviews");
        assert!(body[0].get("content").is_none());

        let (status, body) = get(app(&tmp), "/api/services/consulting").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"], "Details");

        let (status, _) = get(app(&tmp), "/api/services/unknown").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_site_info() {
        let tmp = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.person.first_name = "Ada".to_string();
        config.person.last_name = "Lovelace".to_string();
        config.person.location = "Europe/London".to_string();
        let (status, body) = get(app_with(&tmp, config, None), "/api/site").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Ada Lovelace");
        assert_eq!(body["routes"]["/work"], true);
        assert!(body["localTime"].is_string());
    }

    #[tokio::test]
    async fn test_health_and_static_files() {
        let tmp = TempDir::new().unwrap();
        write_site(&tmp);
        let (status, body) = get(app(&tmp), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let req = Request::get("/images/avatar.txt")
            .body(Body::empty())
            .unwrap();
        let res = app(&tmp).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}
