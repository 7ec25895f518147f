//! Request handlers and router for the HTML surface.
//!
//! Server-side rendering with Askama templates. Every handler is a single
//! store operation followed by a redirect or a rendered page; the `/` route
//! doubles as login and task list, branching on the session state the same
//! way the browser-facing flow does.

mod templates;
mod validation;

use askama::Template;
use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Request, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router, RequestExt,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::auth::{self, AuthUser, SESSION_COOKIE};
use crate::db::{self, NewTodo, User};
use crate::error::AppError;
use crate::AppState;

pub use templates::*;

pub fn create_router(state: Arc<AppState>) -> Router {
    let max_upload = state.config.limits.max_upload_bytes;

    Router::new()
        .route("/", get(index).post(index_submit))
        .route("/register", get(register_page).post(register_submit))
        .route("/logout", get(logout))
        .route("/detail/:task_id", get(detail).post(detail))
        .route("/delete/:task_id", get(delete_task).post(delete_task))
        .route("/task_done/:task_id", post(task_done))
        .route("/download_file/:task_id", get(download_file))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

// Helper to render a template into an HTML response
fn render<T: Template>(template: T) -> Result<Response, AppError> {
    Ok(Html(template.render()?).into_response())
}

#[derive(Deserialize)]
struct CredentialsForm {
    username: String,
    password: String,
}

// -------------------------------------------------------------------------
// Registration
// -------------------------------------------------------------------------

async fn register_page() -> Result<Response, AppError> {
    render(RegisterTemplate { error: None })
}

fn register_form_with_error(status: StatusCode, message: String) -> Result<Response, AppError> {
    let html = RegisterTemplate {
        error: Some(message),
    }
    .render()?;
    Ok((status, Html(html)).into_response())
}

async fn register_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    if let Err(msg) = validation::validate_username(&form.username)
        .and_then(|_| validation::validate_password(&form.password))
    {
        return register_form_with_error(StatusCode::BAD_REQUEST, msg);
    }

    let password_hash = auth::hash_password(&form.password)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;

    match db::create_user(&state.db, &form.username, &password_hash).await {
        Ok(user) => {
            tracing::info!(username = %user.username, "registered new user");
            // Registration does not log the user in.
            Ok(Redirect::to("/").into_response())
        }
        Err(err) => match AppError::from(err) {
            AppError::Conflict(_) => register_form_with_error(
                StatusCode::CONFLICT,
                "Username is already taken".to_string(),
            ),
            other => Err(other),
        },
    }
}

// -------------------------------------------------------------------------
// Login / logout
// -------------------------------------------------------------------------

async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        auth::destroy_session(&state.db, cookie.value()).await?;
    }
    let jar = jar.remove(Cookie::from(SESSION_COOKIE));
    Ok((jar, Redirect::to("/")).into_response())
}

async fn login(
    state: &AppState,
    jar: CookieJar,
    form: CredentialsForm,
) -> Result<Response, AppError> {
    let user = db::find_user_by_username(&state.db, &form.username).await?;
    let user = match user {
        Some(u) if auth::verify_password(&form.password, &u.password_hash) => u,
        _ => {
            let html = LoginTemplate {
                error: Some("Not logged in".to_string()),
            }
            .render()?;
            return Ok((StatusCode::UNAUTHORIZED, Html(html)).into_response());
        }
    };

    let token =
        auth::create_session(&state.db, user.id, state.config.auth.session_ttl_hours).await?;
    let jar = jar.add(
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build(),
    );
    tracing::info!(username = %user.username, "user logged in");
    Ok((jar, Redirect::to("/")).into_response())
}

// -------------------------------------------------------------------------
// Combined "/" route: login form, task list, task creation
// -------------------------------------------------------------------------

async fn index(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    match auth::current_user(&state.db, &jar).await? {
        Some(user) => task_list(&state, &user).await,
        None => render(LoginTemplate { error: None }),
    }
}

async fn task_list(state: &AppState, user: &User) -> Result<Response, AppError> {
    let todos = db::list_open_todos(&state.db, user.id).await?;
    render(IndexTemplate {
        username: user.username.clone(),
        current_time: chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
        tasks: todos.iter().map(TaskRow::from).collect(),
    })
}

/// POST "/" is credentials when anonymous, a multipart task submission when
/// authenticated, so the body extractor is picked after the session check.
async fn index_submit(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    req: Request,
) -> Result<Response, AppError> {
    match auth::current_user(&state.db, &jar).await? {
        Some(user) => {
            let multipart = req
                .extract::<Multipart, _>()
                .await
                .map_err(|e| AppError::Validation(format!("expected a task submission: {e}")))?;
            create_task(&state, user.id, multipart).await
        }
        None => {
            let Form(form) = req
                .extract::<Form<CredentialsForm>, _>()
                .await
                .map_err(|_| AppError::Validation("missing credentials".to_string()))?;
            login(&state, jar, form).await
        }
    }
}

async fn create_task(
    state: &AppState,
    user_id: i64,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut title = String::new();
    let mut content = String::new();
    let mut deadline = String::new();
    let mut attachment: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        match field.name().unwrap_or_default() {
            "title" => title = field.text().await?,
            "content" => content = field.text().await?,
            "date_TBD" => deadline = field.text().await?,
            "file" => {
                // An empty filename is the browser's "no file chosen".
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .filter(|name| !name.is_empty());
                let data = field.bytes().await?;
                if let Some(filename) = filename {
                    attachment = Some((filename, data.to_vec()));
                }
            }
            _ => {}
        }
    }

    validation::validate_title(&title).map_err(AppError::Validation)?;
    let content = validation::normalize_content(&content).map_err(AppError::Validation)?;
    let date_tbd = validation::parse_deadline(&deadline).map_err(AppError::Validation)?;
    if let Some((filename, _)) = &attachment {
        validation::validate_filename(filename).map_err(AppError::Validation)?;
    }

    let (filename, file_data) = match attachment {
        Some((name, data)) => (Some(name), Some(data)),
        None => (None, None),
    };

    let id = db::create_todo(
        &state.db,
        user_id,
        NewTodo {
            title,
            content,
            date_tbd,
            filename,
            file_data,
        },
    )
    .await?;
    tracing::debug!(task_id = id, user_id, "created task");

    Ok(Redirect::to("/").into_response())
}

// -------------------------------------------------------------------------
// Per-task routes: detail, completion, deletion, download
//
// All of them resolve the task through the current user's id, so another
// user's task id answers 404 just like a missing one.
// -------------------------------------------------------------------------

async fn detail(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(task_id): Path<i64>,
) -> Result<Response, AppError> {
    let task = db::find_todo(&state.db, task_id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("no such task".to_string()))?;
    render(DetailTemplate { task: task.into() })
}

async fn task_done(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(task_id): Path<i64>,
) -> Result<Response, AppError> {
    if !db::mark_done(&state.db, task_id, user.id).await? {
        return Err(AppError::NotFound("no such task".to_string()));
    }
    Ok(Redirect::to("/").into_response())
}

async fn delete_task(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(task_id): Path<i64>,
) -> Result<Response, AppError> {
    if !db::delete_todo(&state.db, task_id, user.id).await? {
        return Err(AppError::NotFound("no such task".to_string()));
    }
    Ok(Redirect::to("/").into_response())
}

async fn download_file(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(task_id): Path<i64>,
) -> Result<Response, AppError> {
    let task = db::find_todo(&state.db, task_id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("no such task".to_string()))?;

    let (filename, data) = match (task.filename, task.file_data) {
        (Some(name), Some(data)) => (name, data),
        _ => return Err(AppError::NotFound("task has no attachment".to_string())),
    };

    let content_type = mime_guess::from_path(&filename)
        .first_or_octet_stream()
        .to_string();
    let safe_name = filename.replace(['"', '\r', '\n'], "_");

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{safe_name}\""),
            ),
        ],
        data,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::DbPool;
    use axum::body::Body;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    const BOUNDARY: &str = "----ticklist-test-boundary";

    async fn test_app() -> (Router, DbPool) {
        let pool = db::test_pool().await;
        let state = Arc::new(AppState::new(Config::default(), pool.clone()));
        (create_router(state), pool)
    }

    async fn send(app: &Router, req: Request) -> Response {
        app.clone().oneshot(req).await.unwrap()
    }

    fn form_request(uri: &str, cookie: Option<&str>, body: &str) -> Request {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str, cookie: Option<&str>) -> Request {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_request(uri: &str, cookie: Option<&str>) -> Request {
        let mut builder = Request::builder().method("POST").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((filename, data)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn multipart_request(
        uri: &str,
        cookie: &str,
        fields: &[(&str, &str)],
        file: Option<(&str, &[u8])>,
    ) -> Request {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::COOKIE, cookie)
            .body(Body::from(multipart_body(fields, file)))
            .unwrap()
    }

    fn session_cookie(response: &Response) -> String {
        response
            .headers()
            .get(header::SET_COOKIE)
            .expect("expected a session cookie")
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string()
    }

    async fn body_string(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn register(app: &Router, username: &str, password: &str) -> Response {
        send(
            app,
            form_request(
                "/register",
                None,
                &format!("username={username}&password={password}"),
            ),
        )
        .await
    }

    async fn login(app: &Router, username: &str, password: &str) -> String {
        let response = send(
            app,
            form_request("/", None, &format!("username={username}&password={password}")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        session_cookie(&response)
    }

    async fn task_id(pool: &DbPool, title: &str) -> i64 {
        let (id,): (i64,) = sqlx::query_as("SELECT id FROM todos WHERE title = ?")
            .bind(title)
            .fetch_one(pool)
            .await
            .unwrap();
        id
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let (app, pool) = test_app().await;

        let response = register(&app, "alice", "pw1").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = register(&app, "alice", "pw2").await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_string(response).await;
        assert!(body.contains("already taken"));

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0, 1);
    }

    #[tokio::test]
    async fn test_registration_validates_fields() {
        let (app, _pool) = test_app().await;

        let response = send(&app, form_request("/register", None, "username=&password=pw")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let long = "a".repeat(21);
        let response = send(
            &app,
            form_request("/register", None, &format!("username={long}&password=pw")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_logout_cycle() {
        let (app, _pool) = test_app().await;
        register(&app, "alice", "pw1").await;

        // Wrong password re-renders the login form flagged as not logged in.
        let response = send(&app, form_request("/", None, "username=alice&password=wrong")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_string(response).await.contains("Not logged in"));

        let cookie = login(&app, "alice", "pw1").await;
        let response = send(&app, get_request("/", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("Tasks for alice"));

        let response = send(&app, get_request("/logout", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        // The invalidated session falls back to the login form.
        let response = send(&app, get_request("/", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("Log in"));
    }

    #[tokio::test]
    async fn test_create_task_and_list() {
        let (app, pool) = test_app().await;
        register(&app, "alice", "pw1").await;
        let cookie = login(&app, "alice", "pw1").await;

        let response = send(
            &app,
            multipart_request(
                "/",
                &cookie,
                &[
                    ("title", "Buy milk"),
                    ("content", ""),
                    ("date_TBD", "2030-01-01T10:00"),
                ],
                None,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = send(&app, get_request("/", Some(&cookie))).await;
        assert!(body_string(response).await.contains("Buy milk"));

        let rows: Vec<(String, Option<String>, bool, i64)> =
            sqlx::query_as("SELECT title, content, done, user_id FROM todos")
                .fetch_all(&pool)
                .await
                .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, "Buy milk");
        assert_eq!(rows[0].1, None);
        assert!(!rows[0].2);
    }

    #[tokio::test]
    async fn test_malformed_deadline_is_rejected() {
        let (app, pool) = test_app().await;
        register(&app, "alice", "pw1").await;
        let cookie = login(&app, "alice", "pw1").await;

        let response = send(
            &app,
            multipart_request(
                "/",
                &cookie,
                &[("title", "Buy milk"), ("content", ""), ("date_TBD", "tomorrow")],
                None,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM todos")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0, 0);
    }

    #[tokio::test]
    async fn test_missing_title_is_rejected() {
        let (app, _pool) = test_app().await;
        register(&app, "alice", "pw1").await;
        let cookie = login(&app, "alice", "pw1").await;

        let response = send(
            &app,
            multipart_request("/", &cookie, &[("title", ""), ("date_TBD", "")], None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_task_done_hides_from_list_but_keeps_row() {
        let (app, pool) = test_app().await;
        register(&app, "alice", "pw1").await;
        let cookie = login(&app, "alice", "pw1").await;

        send(
            &app,
            multipart_request("/", &cookie, &[("title", "Buy milk"), ("date_TBD", "")], None),
        )
        .await;
        let id = task_id(&pool, "Buy milk").await;

        let response = send(&app, post_request(&format!("/task_done/{id}"), Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = send(&app, get_request("/", Some(&cookie))).await;
        assert!(!body_string(response).await.contains("Buy milk"));

        let (done,): (bool,) = sqlx::query_as("SELECT done FROM todos WHERE id = ?")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert!(done);

        // Still retrievable through the detail page.
        let response = send(&app, get_request(&format!("/detail/{id}"), Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_delete_is_permanent() {
        let (app, pool) = test_app().await;
        register(&app, "alice", "pw1").await;
        let cookie = login(&app, "alice", "pw1").await;

        send(
            &app,
            multipart_request("/", &cookie, &[("title", "Buy milk"), ("date_TBD", "")], None),
        )
        .await;
        let id = task_id(&pool, "Buy milk").await;

        let response = send(&app, get_request(&format!("/delete/{id}"), Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = send(&app, get_request(&format!("/detail/{id}"), Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response =
            send(&app, get_request(&format!("/download_file/{id}"), Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, post_request(&format!("/task_done/{id}"), Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_attachment_download_round_trip() {
        let (app, pool) = test_app().await;
        register(&app, "alice", "pw1").await;
        let cookie = login(&app, "alice", "pw1").await;

        let payload: Vec<u8> = (0..=255u8).collect();
        send(
            &app,
            multipart_request(
                "/",
                &cookie,
                &[("title", "report"), ("date_TBD", "")],
                Some(("report.bin", &payload)),
            ),
        )
        .await;
        let id = task_id(&pool, "report").await;

        let response =
            send(&app, get_request(&format!("/download_file/{id}"), Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("attachment"));
        assert!(disposition.contains("report.bin"));

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(bytes.as_ref(), payload.as_slice());
    }

    #[tokio::test]
    async fn test_download_without_attachment_is_not_found() {
        let (app, pool) = test_app().await;
        register(&app, "alice", "pw1").await;
        let cookie = login(&app, "alice", "pw1").await;

        send(
            &app,
            multipart_request("/", &cookie, &[("title", "no file"), ("date_TBD", "")], None),
        )
        .await;
        let id = task_id(&pool, "no file").await;

        let response =
            send(&app, get_request(&format!("/download_file/{id}"), Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_tasks_are_invisible_to_other_users() {
        let (app, pool) = test_app().await;
        register(&app, "alice", "pw1").await;
        register(&app, "bob", "pw2").await;

        let alice = login(&app, "alice", "pw1").await;
        send(
            &app,
            multipart_request("/", &alice, &[("title", "secret"), ("date_TBD", "")], None),
        )
        .await;
        let id = task_id(&pool, "secret").await;

        let bob = login(&app, "bob", "pw2").await;
        let response = send(&app, get_request(&format!("/detail/{id}"), Some(&bob))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = send(&app, post_request(&format!("/task_done/{id}"), Some(&bob))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = send(&app, get_request(&format!("/delete/{id}"), Some(&bob))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = send(&app, get_request(&format!("/download_file/{id}"), Some(&bob))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // Alice's task is untouched.
        let response = send(&app, get_request(&format!("/detail/{id}"), Some(&alice))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let response = send(&app, get_request("/", Some(&alice))).await;
        assert!(body_string(response).await.contains("secret"));
    }

    #[tokio::test]
    async fn test_anonymous_task_routes_redirect_to_login() {
        let (app, _pool) = test_app().await;

        for uri in ["/detail/1", "/delete/1", "/download_file/1"] {
            let response = send(&app, get_request(uri, None)).await;
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
        }

        let response = send(&app, post_request("/task_done/1", None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        // register alice/pw1 -> login -> create "Buy milk" -> appears open
        // -> mark done -> list empty -> still retrievable via detail
        let (app, pool) = test_app().await;

        let response = register(&app, "alice", "pw1").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let cookie = login(&app, "alice", "pw1").await;

        let response = send(
            &app,
            multipart_request(
                "/",
                &cookie,
                &[
                    ("title", "Buy milk"),
                    ("content", ""),
                    ("date_TBD", "2025-01-01T10:00"),
                ],
                None,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = send(&app, get_request("/", Some(&cookie))).await;
        let body = body_string(response).await;
        assert!(body.contains("Buy milk"));
        assert!(body.contains("2025-01-01T10:00"));

        let id = task_id(&pool, "Buy milk").await;
        let response = send(&app, post_request(&format!("/task_done/{id}"), Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = send(&app, get_request("/", Some(&cookie))).await;
        let body = body_string(response).await;
        assert!(!body.contains("Buy milk"));
        assert!(body.contains("No open tasks"));

        let response = send(&app, get_request(&format!("/detail/{id}"), Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("Buy milk"));
    }
}
