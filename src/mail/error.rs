use thiserror::Error;

use crate::types::Uid;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("cannot connect to {host}: {reason}")]
    Connect { host: String, reason: String },

    #[error("login failed for {user}: {reason}")]
    Login { user: String, reason: String },

    #[error("LIST failed: {0}")]
    List(String),

    #[error("cannot select mailbox {mailbox}: {reason}")]
    Select { mailbox: String, reason: String },

    #[error("cannot create mailbox {mailbox}: {reason}")]
    Create { mailbox: String, reason: String },

    #[error("CAPABILITY failed: {0}")]
    Capability(String),

    #[error("MOVE failed for UID {uid}: {reason}")]
    Move { uid: Uid, reason: String },

    #[error("COPY failed for UID {uid}: {reason}")]
    Copy { uid: Uid, reason: String },

    #[error("STORE +FLAGS failed for UID {uid}: {reason}")]
    Store { uid: Uid, reason: String },

    #[error("EXPUNGE failed: {0}")]
    Expunge(String),

    #[error("LOGOUT failed: {0}")]
    Logout(String),

    #[error("could not determine or create a trash mailbox: {0}")]
    NoTrash(String),

    #[error("invalid UID '{0}'")]
    InvalidUid(String),

    #[error("no UIDs provided; nothing to do")]
    NoUids,

    #[error("cannot read credentials: {0}")]
    Prompt(#[from] std::io::Error),
}
