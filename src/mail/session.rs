use std::net::TcpStream;

use native_tls::{TlsConnector, TlsStream};

use crate::{info, mail::MailError, types::Uid};

const LIST_ALL: &str = "LIST \"\" \"*\"";

/// The IMAP operations the trash mover needs from a logged-in session.
///
/// Every method maps onto exactly one IMAP command. A command that does not
/// complete with a tagged `OK` surfaces as an error.
pub trait MailSession {
    /// Issues `LIST "" "*"` and returns the raw response lines with the
    /// `* LIST ` prefix removed.
    fn list(&mut self) -> Result<Vec<String>, MailError>;

    fn select(&mut self, mailbox: &str) -> Result<(), MailError>;

    fn create(&mut self, mailbox: &str) -> Result<(), MailError>;

    /// Whether the server advertises the MOVE extension (RFC 6851).
    fn supports_move(&mut self) -> Result<bool, MailError>;

    fn uid_move(&mut self, uid: Uid, mailbox: &str) -> Result<(), MailError>;

    fn uid_copy(&mut self, uid: Uid, mailbox: &str) -> Result<(), MailError>;

    /// `UID STORE <uid> <query>`, e.g. `+FLAGS (\Deleted)`.
    fn uid_store(&mut self, uid: Uid, query: &str) -> Result<(), MailError>;

    fn expunge(&mut self) -> Result<(), MailError>;

    fn logout(&mut self) -> Result<(), MailError>;
}

/// A TLS IMAP session opened with [`ImapSession::connect`].
pub struct ImapSession {
    session: imap::Session<TlsStream<TcpStream>>,
}

impl ImapSession {
    /// Opens an implicit TLS connection and logs in.
    pub fn connect(host: &str, port: u16, user: &str, password: &str) -> Result<Self, MailError> {
        info!("Connecting to {}:{} as {}", host, port, user);

        let connect_error = |reason: String| MailError::Connect {
            host: host.to_string(),
            reason,
        };

        let tls = TlsConnector::builder()
            .build()
            .map_err(|e| connect_error(e.to_string()))?;
        let client =
            imap::connect((host, port), host, &tls).map_err(|e| connect_error(e.to_string()))?;

        let session = client
            .login(user, password)
            .map_err(|(e, _client)| MailError::Login {
                user: user.to_string(),
                reason: e.to_string(),
            })?;

        info!("Logged in");
        Ok(Self { session })
    }
}

impl MailSession for ImapSession {
    fn list(&mut self) -> Result<Vec<String>, MailError> {
        let raw = self
            .session
            .run_command_and_read_response(LIST_ALL)
            .map_err(|e| MailError::List(e.to_string()))?;
        Ok(split_list_response(&raw))
    }

    fn select(&mut self, mailbox: &str) -> Result<(), MailError> {
        self.session
            .select(mailbox)
            .map(|_| ())
            .map_err(|e| MailError::Select {
                mailbox: mailbox.to_string(),
                reason: e.to_string(),
            })
    }

    fn create(&mut self, mailbox: &str) -> Result<(), MailError> {
        self.session
            .create(mailbox)
            .map_err(|e| MailError::Create {
                mailbox: mailbox.to_string(),
                reason: e.to_string(),
            })
    }

    fn supports_move(&mut self) -> Result<bool, MailError> {
        let caps = self
            .session
            .capabilities()
            .map_err(|e| MailError::Capability(e.to_string()))?;
        Ok(caps.has_str("MOVE"))
    }

    fn uid_move(&mut self, uid: Uid, mailbox: &str) -> Result<(), MailError> {
        self.session
            .uid_mv(uid.to_string(), mailbox)
            .map_err(|e| MailError::Move {
                uid,
                reason: e.to_string(),
            })
    }

    fn uid_copy(&mut self, uid: Uid, mailbox: &str) -> Result<(), MailError> {
        self.session
            .uid_copy(uid.to_string(), mailbox)
            .map_err(|e| MailError::Copy {
                uid,
                reason: e.to_string(),
            })
    }

    fn uid_store(&mut self, uid: Uid, query: &str) -> Result<(), MailError> {
        self.session
            .uid_store(uid.to_string(), query)
            .map(|_| ())
            .map_err(|e| MailError::Store {
                uid,
                reason: e.to_string(),
            })
    }

    fn expunge(&mut self) -> Result<(), MailError> {
        self.session
            .expunge()
            .map(|_| ())
            .map_err(|e| MailError::Expunge(e.to_string()))
    }

    fn logout(&mut self) -> Result<(), MailError> {
        self.session
            .logout()
            .map_err(|e| MailError::Logout(e.to_string()))
    }
}

/// Extracts the LIST lines from a raw untagged response buffer.
///
/// Lines that are not `* LIST` responses (literal continuations, other
/// untagged data) are dropped.
pub fn split_list_response(raw: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(raw)
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter_map(|line| {
            let prefix = line.get(..7)?;
            prefix
                .eq_ignore_ascii_case("* LIST ")
                .then(|| line[7..].to_string())
        })
        .collect()
}
