pub mod dto;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;

pub use dto::{LoginRequest, PublicUser, RegisterRequest};
pub use repo_types::{Session, User, UserId};
pub use services::{
    current_user, forget_session, history_key_for, login, logout, register, resume_session,
    SessionContext,
};
