//! # Mail Module
//!
//! Moves messages to the account's Trash mailbox by UID.
//!
//! ```text
//! connect ─► SELECT source ─► resolve target ─► move each UID ─► LOGOUT
//!                                 │
//!                 explicit --target, or special-use \Trash/\Deleted,
//!                 or name keyword, or create INBOX/Trash
//! ```
//!
//! Moving prefers `UID MOVE`. Servers without the MOVE extension (or a MOVE
//! that fails) get `UID COPY`, `UID STORE +FLAGS (\Deleted)` and `EXPUNGE`,
//! tried once. Names are always sent back exactly as LIST reported them,
//! which matters on iCloud where everything lives below `INBOX/`.
//!
//! All session access goes through [`MailSession`], implemented for a real
//! TLS connection by [`ImapSession`].

mod error;
mod mailbox;
mod mover;
mod session;
mod trash;

pub use error::MailError;
pub use mailbox::{
    DEFAULT_TRASH, EnsureOutcome, TRASH_FLAGS, TRASH_KEYWORDS, TrashMatch, TrashReason,
    ensure_mailbox, find_trash, list_mailboxes, parse_list_line,
};
pub use mover::{DELETED_FLAG_QUERY, move_uid};
pub use session::{ImapSession, MailSession, split_list_response};
pub use trash::{
    EXIT_MOVE_FAILED, EXIT_OK, EXIT_SETUP_FAILED, MOVE_PAUSE, TrashJob, TrashReport, execute,
    run_job,
};
