use crate::{
    info,
    mail::{MailError, MailSession},
    success,
    types::{MoveMethod, MoveRequest},
    warning,
};

pub const DELETED_FLAG_QUERY: &str = "+FLAGS (\\Deleted)";

/// Moves one message to `request.target`.
///
/// Uses `UID MOVE` when the server advertises it. Otherwise, or when the
/// MOVE command fails, copies the message, flags the source as `\Deleted`
/// and expunges the selected mailbox. The first failing fallback step ends
/// the attempt; earlier steps are not undone, so a failure after COPY can
/// leave the message in both mailboxes.
///
/// A dry run returns [`MoveMethod::Simulated`] without touching the session.
pub fn move_uid<S: MailSession>(
    session: &mut S,
    request: &MoveRequest,
) -> Result<MoveMethod, MailError> {
    let uid = request.uid;
    let target = request.target.as_str();

    info!("Moving UID {} -> {}", uid, target);
    if request.dry_run {
        info!("DRY RUN: would move UID {} to {}", uid, target);
        return Ok(MoveMethod::Simulated);
    }

    let can_move = session.supports_move().unwrap_or_else(|e| {
        warning!("{}; assuming no MOVE support", e);
        false
    });

    if can_move {
        match session.uid_move(uid, target) {
            Ok(()) => {
                success!("UID {} moved via MOVE", uid);
                return Ok(MoveMethod::Move);
            }
            Err(e) => warning!("{}", e),
        }
    }

    info!("Falling back to COPY + \\Deleted + EXPUNGE for UID {}", uid);
    session.uid_copy(uid, target)?;
    session.uid_store(uid, DELETED_FLAG_QUERY)?;
    session.expunge()?;

    success!("UID {} moved via fallback", uid);
    Ok(MoveMethod::CopyExpunge)
}
