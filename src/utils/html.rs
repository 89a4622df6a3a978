//! Replies are sent in Telegram's HTML parse mode; anything interpolated
//! from user-controlled data (names, handles) must be escaped first.

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
