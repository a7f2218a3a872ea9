//! Shared test fixtures: in-memory backends and request helpers.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use chrono::Utc;
use tower::ServiceExt;
use uuid::Uuid;

use quill_auth::{encode_session, SESSION_COOKIE};
use quill_core::{
    CreateNoteRequest, Error, IdentityProvider, Note, NoteRepository, NoteSummary, Result, Session,
    User,
};
use quill_web::AppState;

/// Base URL used by the test state.
pub const TEST_BASE_URL: &str = "http://app.test";

/// Access token the stub identity accepts.
pub const VALID_TOKEN: &str = "valid-token";

/// Password the stub identity accepts for sign-in and sign-up.
pub const VALID_PASSWORD: &str = "correct-horse";

/// In-memory note repository with call counters for guard assertions.
#[derive(Default)]
pub struct MemoryNoteRepository {
    notes: Mutex<Vec<Note>>,
    fail: AtomicBool,
    pub latest_calls: AtomicUsize,
    pub insert_calls: AtomicUsize,
}

impl MemoryNoteRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every repository call fail from now on.
    pub fn fail_all(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn note_count(&self) -> usize {
        self.notes.lock().unwrap().len()
    }

    pub fn seed(&self, author_id: Uuid, title: &str, content: &str) -> Uuid {
        let id = Uuid::now_v7();
        self.notes.lock().unwrap().push(Note {
            id,
            title: title.to_string(),
            content: content.to_string(),
            author_id,
            created_at_utc: Utc::now(),
        });
        id
    }

    fn check_fail(&self) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            Err(Error::Database(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn insert(&self, req: CreateNoteRequest) -> Result<Uuid> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.check_fail()?;
        let id = Uuid::now_v7();
        self.notes.lock().unwrap().push(Note {
            id,
            title: req.title,
            content: req.content,
            author_id: req.author_id,
            created_at_utc: Utc::now(),
        });
        Ok(id)
    }

    async fn fetch(&self, id: Uuid) -> Result<Note> {
        self.check_fail()?;
        self.notes
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or(Error::NoteNotFound(id))
    }

    async fn latest_for_author(&self, author_id: Uuid) -> Result<Option<NoteSummary>> {
        self.latest_calls.fetch_add(1, Ordering::SeqCst);
        self.check_fail()?;
        // Insertion order breaks created_at ties.
        Ok(self
            .notes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|n| n.author_id == author_id)
            .cloned()
            .map(NoteSummary::from))
    }

    async fn list_for_author(&self, author_id: Uuid) -> Result<Vec<NoteSummary>> {
        self.check_fail()?;
        Ok(self
            .notes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|n| n.author_id == author_id)
            .cloned()
            .map(NoteSummary::from)
            .collect())
    }

    async fn delete_owned(&self, id: Uuid, author_id: Uuid) -> Result<bool> {
        self.check_fail()?;
        let mut notes = self.notes.lock().unwrap();
        let before = notes.len();
        notes.retain(|n| !(n.id == id && n.author_id == author_id));
        Ok(notes.len() < before)
    }
}

/// Stub identity service: one known user, one valid token, one password.
pub struct StubIdentity {
    pub user: User,
}

impl StubIdentity {
    pub fn new(user: User) -> Arc<Self> {
        Arc::new(Self { user })
    }

    fn session() -> Session {
        Session {
            access_token: VALID_TOKEN.to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: Utc::now().timestamp() + 3600,
        }
    }
}

#[async_trait]
impl IdentityProvider for StubIdentity {
    async fn get_user(&self, access_token: &str) -> Result<User> {
        if access_token == VALID_TOKEN {
            Ok(self.user.clone())
        } else {
            Err(Error::SessionMissing)
        }
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<Session> {
        Err(Error::SessionMissing)
    }

    async fn password_grant(&self, _email: &str, password: &str) -> Result<Session> {
        if password == VALID_PASSWORD {
            Ok(Self::session())
        } else {
            Err(Error::Identity("invalid login credentials".to_string()))
        }
    }

    async fn sign_up(&self, _email: &str, password: &str) -> Result<Session> {
        if password == VALID_PASSWORD {
            Ok(Self::session())
        } else {
            Err(Error::Identity("password too weak".to_string()))
        }
    }

    async fn logout(&self, _access_token: &str) -> Result<()> {
        Ok(())
    }
}

/// A user for tests.
pub fn test_user() -> User {
    User {
        id: Uuid::now_v7(),
        email: "tester@example.com".to_string(),
    }
}

/// Build app state over in-memory backends.
pub fn test_state(user: &User) -> (AppState, Arc<MemoryNoteRepository>) {
    let notes = MemoryNoteRepository::new();
    let identity = StubIdentity::new(user.clone());
    let state = AppState::new(notes.clone(), identity, TEST_BASE_URL.to_string());
    (state, notes)
}

/// A Cookie header value carrying a valid, unexpired session.
pub fn session_cookie() -> String {
    let session = Session {
        access_token: VALID_TOKEN.to_string(),
        refresh_token: "refresh".to_string(),
        expires_at: Utc::now().timestamp() + 3600,
    };
    format!("{}={}", SESSION_COOKIE, encode_session(&session).unwrap())
}

/// Drive one GET request through the router.
pub async fn get(router: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    router
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Drive one form POST through the router.
pub async fn post_form(
    router: &Router,
    uri: &str,
    body: &str,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    router
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// The response's Location header, if any.
pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

/// Collect the response body into a string.
pub async fn body_string(response: Response<Body>) -> String {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
