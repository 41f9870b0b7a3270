use std::sync::LazyLock;

use regex::Regex;

use crate::{
    info,
    mail::{MailError, MailSession},
    types::MailboxEntry,
};

/// Mailbox created when no trash mailbox can be found.
pub const DEFAULT_TRASH: &str = "INBOX/Trash";

/// Special-use attributes marking a trash mailbox.
pub const TRASH_FLAGS: [&str; 2] = ["\\Trash", "\\Deleted"];

/// Lowercase name fragments that identify a trash mailbox.
pub const TRASH_KEYWORDS: [&str; 5] = ["trash", "deleted", "papierkorb", "gelöscht", "eliminados"];

static FLAGGED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\((?P<flags>[^)]*)\).*"(?P<name>[^"]*)"\s*$"#).expect("static regex")
});

static QUOTED_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(?P<name>[^"]+)"\s*$"#).expect("static regex"));

/// Parses one LIST response line such as `(\HasNoChildren) "/" "INBOX/Trash"`.
///
/// The flags come from the first parenthesised group and the name from the
/// final quoted token. Without a flag group the last quoted token is taken
/// with no flags. Returns `None` for anything else, including an empty name.
pub fn parse_list_line(line: &str) -> Option<MailboxEntry> {
    let line = line.trim_end();

    if let Some(caps) = FLAGGED_LINE.captures(line) {
        let name = caps["name"].trim();
        if name.is_empty() {
            return None;
        }
        let flags = caps["flags"]
            .split_whitespace()
            .map(|f| f.trim_matches('"').to_string())
            .filter(|f| !f.is_empty())
            .collect();
        return Some(MailboxEntry {
            flags,
            name: name.to_string(),
        });
    }

    QUOTED_TAIL.captures(line).map(|caps| MailboxEntry {
        flags: Vec::new(),
        name: caps["name"].to_string(),
    })
}

/// Lists every mailbox on the server, skipping lines that do not parse.
pub fn list_mailboxes<S: MailSession>(session: &mut S) -> Result<Vec<MailboxEntry>, MailError> {
    let lines = session.list()?;
    Ok(lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| parse_list_line(line))
        .collect())
}

/// Why a mailbox was picked as trash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrashReason {
    SpecialUse,
    Keyword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrashMatch<'a> {
    pub mailbox: &'a MailboxEntry,
    pub reason: TrashReason,
}

/// Picks the trash mailbox.
///
/// A mailbox carrying a `\Trash` or `\Deleted` attribute always wins over a
/// name match, whatever the order of `mailboxes`. Only when none is flagged
/// is the first name containing one of [`TRASH_KEYWORDS`] taken.
pub fn find_trash(mailboxes: &[MailboxEntry]) -> Option<TrashMatch<'_>> {
    let flagged = mailboxes
        .iter()
        .find(|mb| TRASH_FLAGS.iter().any(|flag| mb.has_flag(flag)))
        .map(|mailbox| TrashMatch {
            mailbox,
            reason: TrashReason::SpecialUse,
        });

    flagged.or_else(|| {
        mailboxes
            .iter()
            .find(|mb| {
                let name = mb.display_name().to_lowercase();
                TRASH_KEYWORDS.iter().any(|k| name.contains(k))
            })
            .map(|mailbox| TrashMatch {
                mailbox,
                reason: TrashReason::Keyword,
            })
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnsureOutcome {
    Exists,
    Created,
    /// Dry run: the mailbox is missing and would have been created.
    WouldCreate,
    Failed(String),
}

/// Makes sure `target` exists, creating it when it is not listed.
///
/// Never fails; a LIST or CREATE error is reported as
/// [`EnsureOutcome::Failed`] and the caller decides what to do.
pub fn ensure_mailbox<S: MailSession>(session: &mut S, target: &str, dry_run: bool) -> EnsureOutcome {
    let mailboxes = match list_mailboxes(session) {
        Ok(mailboxes) => mailboxes,
        Err(e) => return EnsureOutcome::Failed(e.to_string()),
    };

    if mailboxes.iter().any(|mb| mb.name == target) {
        info!("Target mailbox exists: {}", target);
        return EnsureOutcome::Exists;
    }

    if dry_run {
        info!("DRY RUN: would create mailbox {}", target);
        return EnsureOutcome::WouldCreate;
    }

    info!("Target mailbox not found; attempting to create: {}", target);
    match session.create(target) {
        Ok(()) => EnsureOutcome::Created,
        Err(e) => EnsureOutcome::Failed(e.to_string()),
    }
}
