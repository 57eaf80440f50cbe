//! Discord user-mention tokens.
//!
//! Discord encodes a user mention inside message text as `<@{user_id}>`.
//! Older clients also emit the nickname form `<@!{user_id}>`, which is
//! accepted on input but never produced.

/// Render the mention token for `user_id`.
pub fn mention_token(user_id: &str) -> String {
    format!("<@{user_id}>")
}

/// Parse a user-mention token at the very start of `text`.
///
/// Returns the user ID and the byte length of the whole token. Role
/// (`<@&..>`) and channel (`<#..>`) mentions are not user mentions.
pub fn parse_mention_token(text: &str) -> Option<(&str, usize)> {
    let rest = text.strip_prefix("<@")?;
    let (rest, prefix_len) = match rest.strip_prefix('!') {
        Some(rest) => (rest, 3),
        None => (rest, 2),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || rest.as_bytes().get(digits) != Some(&b'>') {
        return None;
    }
    Some((&rest[..digits], prefix_len + digits + 1))
}
