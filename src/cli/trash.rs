use std::io::{self, BufRead, Write};

use crate::{
    config, failure,
    mail::{self, EXIT_SETUP_FAILED, ImapSession, MOVE_PAUSE, MailError, TrashJob},
    utils,
};

/// Arguments of `sweepcli trash`.
#[derive(Debug, Clone)]
pub struct TrashArgs {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub source: String,
    pub target: Option<String>,
    pub uids: String,
    pub dry_run: bool,
}

/// Moves the given UIDs to the trash mailbox and returns the exit code.
///
/// - `0` every message was moved (or simulated)
/// - `1` nothing was moved: bad UID list, credentials, connection, login,
///   SELECT or target resolution failed
/// - `2` at least one message could not be moved
pub fn trash(args: TrashArgs) -> i32 {
    let uids = match utils::parse_uids(&args.uids) {
        Ok(uids) => uids,
        Err(e) => {
            failure!("{}", e);
            return EXIT_SETUP_FAILED;
        }
    };

    let (user, password) = match credentials(args.user, args.password) {
        Ok(creds) => creds,
        Err(e) => {
            failure!("{}", e);
            return EXIT_SETUP_FAILED;
        }
    };

    let session = match ImapSession::connect(&args.host, args.port, &user, &password) {
        Ok(session) => session,
        Err(e) => {
            failure!("{}", e);
            return EXIT_SETUP_FAILED;
        }
    };

    let job = TrashJob {
        source: args.source,
        target: args.target,
        uids,
        dry_run: args.dry_run,
        pause: MOVE_PAUSE,
    };

    match mail::execute(session, &job) {
        Ok(report) => report.exit_code(),
        Err(e) => {
            failure!("{}", e);
            EXIT_SETUP_FAILED
        }
    }
}

/// Flag, then environment, then an interactive prompt.
fn credentials(
    user: Option<String>,
    password: Option<String>,
) -> Result<(String, String), MailError> {
    let user = match user.or_else(config::email_user) {
        Some(user) => user,
        None => prompt_line("iCloud username: ")?,
    };

    let password = match password.or_else(config::email_password) {
        Some(password) => password,
        None => rpassword::prompt_password("Password (app-specific password recommended): ")?,
    };

    Ok((user, password))
}

fn prompt_line(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
