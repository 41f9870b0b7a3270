use std::{thread, time::Duration};

use crate::{
    failure, info,
    mail::{
        DEFAULT_TRASH, EnsureOutcome, MailError, MailSession, TrashReason, ensure_mailbox,
        find_trash, list_mailboxes, move_uid,
    },
    success,
    types::{MoveMethod, MoveRequest, Uid},
    warning,
};

pub const EXIT_OK: i32 = 0;
pub const EXIT_SETUP_FAILED: i32 = 1;
pub const EXIT_MOVE_FAILED: i32 = 2;

/// Pause between two consecutive moves, keeps iCloud from rate limiting.
pub const MOVE_PAUSE: Duration = Duration::from_millis(200);

/// Everything one `trash` run needs once the session is open.
#[derive(Debug, Clone)]
pub struct TrashJob {
    pub source: String,
    pub target: Option<String>,
    pub uids: Vec<Uid>,
    pub dry_run: bool,
    pub pause: Duration,
}

#[derive(Debug)]
pub struct TrashReport {
    pub target: String,
    pub moved: Vec<(Uid, MoveMethod)>,
    pub failed: Vec<(Uid, MailError)>,
}

impl TrashReport {
    pub fn exit_code(&self) -> i32 {
        if self.failed.is_empty() {
            EXIT_OK
        } else {
            EXIT_MOVE_FAILED
        }
    }
}

/// Runs `job` on `session` and logs out afterwards, whatever the outcome.
///
/// An `Err` means the run stopped before any message was touched (source
/// selection or target resolution failed). Per-message failures are
/// collected in the report instead.
pub fn execute<S: MailSession>(mut session: S, job: &TrashJob) -> Result<TrashReport, MailError> {
    let result = run_job(&mut session, job);
    if let Err(e) = session.logout() {
        warning!("{}", e);
    }
    result
}

pub fn run_job<S: MailSession>(session: &mut S, job: &TrashJob) -> Result<TrashReport, MailError> {
    info!("Selecting source mailbox: {}", job.source);
    session.select(&job.source)?;

    let target = resolve_target(session, job)?;

    let mut report = TrashReport {
        target: target.clone(),
        moved: Vec::new(),
        failed: Vec::new(),
    };

    for (i, uid) in job.uids.iter().copied().enumerate() {
        // between moves only, dry runs included
        if i > 0 {
            thread::sleep(job.pause);
        }

        let request = MoveRequest {
            uid,
            target: target.clone(),
            dry_run: job.dry_run,
        };
        match move_uid(session, &request) {
            Ok(method) => report.moved.push((uid, method)),
            Err(e) => {
                failure!("{}", e);
                report.failed.push((uid, e));
            }
        }
    }

    if report.failed.is_empty() {
        success!("Moved {} message(s) to {}", report.moved.len(), report.target);
    } else {
        failure!(
            "{} of {} message(s) could not be moved",
            report.failed.len(),
            job.uids.len()
        );
    }

    Ok(report)
}

/// Explicit target, else the detected trash mailbox, else [`DEFAULT_TRASH`].
fn resolve_target<S: MailSession>(session: &mut S, job: &TrashJob) -> Result<String, MailError> {
    if let Some(target) = &job.target {
        return Ok(target.clone());
    }

    info!("Looking for trash folder via LIST (checking for \\Trash or keywords)");
    let mailboxes = list_mailboxes(session)?;
    if let Some(found) = find_trash(&mailboxes) {
        match found.reason {
            TrashReason::SpecialUse => info!(
                "Found special-use trash: {} (flags={})",
                found.mailbox.name,
                found.mailbox.flags.join(" ")
            ),
            TrashReason::Keyword => info!(
                "Found probable trash by name: {} (flags={})",
                found.mailbox.name,
                found.mailbox.flags.join(" ")
            ),
        }
        return Ok(found.mailbox.name.clone());
    }

    info!("No trash folder found via heuristics");
    match ensure_mailbox(session, DEFAULT_TRASH, job.dry_run) {
        EnsureOutcome::Failed(reason) => Err(MailError::NoTrash(reason)),
        outcome => {
            if outcome == EnsureOutcome::Created {
                success!("Mailbox created: {}", DEFAULT_TRASH);
            }
            Ok(DEFAULT_TRASH.to_string())
        }
    }
}
