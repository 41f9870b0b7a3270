use sweepcli::mail::MailError;
use sweepcli::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    // RFC 7636 appendix B
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");

    // URL-safe, no padding
    let challenge = generate_code_challenge("different_verifier");
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_parse_uids() {
    assert_eq!(parse_uids("130,131").unwrap(), vec![130, 131]);
    assert_eq!(parse_uids(" 130 , ,131,").unwrap(), vec![130, 131]);
    assert_eq!(parse_uids("7").unwrap(), vec![7]);
}

#[test]
fn test_parse_uids_invalid() {
    assert!(matches!(parse_uids(""), Err(MailError::NoUids)));
    assert!(matches!(parse_uids(" , ,"), Err(MailError::NoUids)));
    assert!(matches!(
        parse_uids("130,abc"),
        Err(MailError::InvalidUid(s)) if s == "abc"
    ));
    assert!(matches!(parse_uids("0"), Err(MailError::InvalidUid(_))));
    assert!(matches!(parse_uids("-5"), Err(MailError::InvalidUid(_))));
}

#[test]
fn test_decode_modified_utf7() {
    assert_eq!(decode_modified_utf7("INBOX/Trash"), "INBOX/Trash");
    assert_eq!(decode_modified_utf7("Gel&APY-scht"), "Gelöscht");
    assert_eq!(decode_modified_utf7("Tom &- Jerry"), "Tom & Jerry");
    // RFC 3501 example
    assert_eq!(
        decode_modified_utf7("~peter/mail/&U,BTFw-/&ZeVnLIqe-"),
        "~peter/mail/台北/日本語"
    );
}

#[test]
fn test_decode_modified_utf7_invalid_is_unchanged() {
    assert_eq!(decode_modified_utf7("broken&AP"), "broken&AP");
    assert_eq!(decode_modified_utf7("bad&!!!-"), "bad&!!!-");
}
