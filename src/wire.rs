use serde::Deserialize;

use crate::token::{Token, TokenKind};

/// Error decoding a token dump.
#[derive(Debug, thiserror::Error)]
#[error("malformed token dump: {0}")]
pub struct WireError(#[from] serde_json::Error);

/// One entry of the tokenizer's JSON dump.
#[derive(Debug, Deserialize)]
struct WireToken {
    #[serde(rename = "type")]
    kind: String,
    text: String,
}

/// Decodes the external tokenizer's JSON dump into tokens.
///
/// The dump is an array of `{"type": name, "text": lexeme}` objects in
/// source order, as produced by PHP's `token_get_all` with the type
/// constants resolved to their names. Unrecognized category names
/// decode to [`TokenKind::Unknown`] rather than failing; only
/// malformed JSON is an error.
pub fn decode(json: &str) -> Result<Vec<Token>, WireError> {
    let entries: Vec<WireToken> = serde_json::from_str(json)?;
    Ok(entries
        .into_iter()
        .map(|entry| Token::new(TokenKind::from_name(&entry.kind), entry.text))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_statement_dump() {
        let json = r#"[
            {"type": "T_OPEN_TAG", "text": "<?php "},
            {"type": "T_LNUMBER", "text": "42"},
            {"type": ";", "text": ";"}
        ]"#;
        let tokens = decode(json).expect("dump should decode");
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::OpenTag, "<?php "),
                Token::new(TokenKind::Number, "42"),
                Token::new(TokenKind::Semicolon, ";"),
            ]
        );
    }

    #[test]
    fn unknown_categories_survive_decoding() {
        let json = r#"[{"type": "T_FOREACH", "text": "foreach"}]"#;
        let tokens = decode(json).expect("dump should decode");
        assert_eq!(
            tokens[0].kind,
            TokenKind::Unknown("T_FOREACH".to_owned())
        );
        assert_eq!(tokens[0].text, "foreach");
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(decode("[{\"type\": ").is_err());
        assert!(decode("{\"type\": \"T_CLASS\"}").is_err());
    }

    #[test]
    fn empty_dump_decodes_to_no_tokens() {
        assert!(decode("[]").expect("empty dump").is_empty());
    }
}
