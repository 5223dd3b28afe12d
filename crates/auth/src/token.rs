use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Opaque bearer credential identifying a session.
///
/// 32 bytes from the thread-local CSPRNG, base64url-encoded without
/// padding: 256 bits of entropy in 43 URL-safe characters. The server
/// matches tokens by exact string equality; there is nothing to decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Fresh tokens mint themselves, same as [`teller_core::ID`].
impl Default for Token {
    fn default() -> Self {
        use rand::Rng;
        let ref mut bytes = [0u8; 32];
        rand::rng().fill(bytes);
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }
}

/// Stored tokens come back from the database as plain strings.
impl From<String> for Token {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_tokens_differ() {
        assert_ne!(Token::default(), Token::default());
    }

    #[test]
    fn tokens_are_url_safe() {
        let token = Token::default();
        assert_eq!(token.as_str().len(), 43);
        assert!(
            token
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }
}
