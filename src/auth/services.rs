use tracing::{info, instrument, warn};

use crate::auth::dto::{normalize_email, LoginRequest, RegisterRequest};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo::{SessionRepo, UserRepo};
use crate::auth::repo_types::{Session, User, UserId};
use crate::error::{AppError, AppResult};
use crate::history::HistoryKey;
use crate::state::AppState;

/// The logged-in identity. Created by `login` or `resume_session`, consumed
/// by `logout`.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    pub user: User,
    pub remember: bool,
}

impl SessionContext {
    pub fn history_key(&self) -> HistoryKey {
        HistoryKey::User(self.user.id)
    }
}

/// History key for an optional session: the user's own list, or the shared
/// anonymous one.
pub fn history_key_for(ctx: Option<&SessionContext>) -> HistoryKey {
    ctx.map(SessionContext::history_key)
        .unwrap_or(HistoryKey::Anonymous)
}

#[instrument(skip(st, req), fields(email = %req.email))]
pub fn register(st: &AppState, req: &RegisterRequest) -> AppResult<User> {
    let users = UserRepo::new(st.store.as_ref());
    let email = normalize_email(&req.email);

    if users.find_by_email(&email)?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::DuplicateEmail);
    }

    let user = User {
        id: UserId::generate(),
        name: req.name.trim().to_string(),
        email,
        password_digest: hash_password(&req.password, st.config.password_scheme)?,
        created_at: st.clock.now(),
    };
    users.insert(&user)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(user)
}

#[instrument(skip(st, req), fields(email = %req.email, remember = req.remember))]
pub fn login(st: &AppState, req: &LoginRequest) -> AppResult<SessionContext> {
    let email = normalize_email(&req.email);
    let Some(user) = UserRepo::new(st.store.as_ref()).find_by_email(&email)? else {
        warn!(email = %email, "login unknown email");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(&req.password, &user.password_digest)? {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    SessionRepo::new(st.store.as_ref()).save(&Session {
        user_id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        remember: req.remember,
    })?;

    info!(user_id = %user.id, "user logged in");
    Ok(SessionContext {
        user,
        remember: req.remember,
    })
}

pub fn logout(st: &AppState, ctx: SessionContext) -> AppResult<()> {
    SessionRepo::new(st.store.as_ref()).clear()?;
    info!(user_id = %ctx.user.id, "user logged out");
    Ok(())
}

/// Clears any persisted session without needing a live context.
pub fn forget_session(st: &AppState) -> AppResult<()> {
    SessionRepo::new(st.store.as_ref()).clear()?;
    Ok(())
}

/// Startup restore: only sessions saved with `remember` come back, and only
/// while their user still exists.
pub fn resume_session(st: &AppState) -> AppResult<Option<SessionContext>> {
    let Some(session) = SessionRepo::new(st.store.as_ref()).load()? else {
        return Ok(None);
    };
    if !session.remember {
        return Ok(None);
    }
    let user = UserRepo::new(st.store.as_ref()).find_by_id(session.user_id)?;
    if user.is_none() {
        warn!(user_id = %session.user_id, "session refers to unknown user");
    }
    Ok(user.map(|user| SessionContext {
        user,
        remember: true,
    }))
}

/// User behind the persisted session, whether or not it was remembered.
pub fn current_user(st: &AppState) -> AppResult<Option<User>> {
    let Some(session) = SessionRepo::new(st.store.as_ref()).load()? else {
        return Ok(None);
    };
    Ok(UserRepo::new(st.store.as_ref()).find_by_id(session.user_id)?)
}
