//! Thread → transcript rendering (model input).

use super::constants::UNKNOWN_AUTHOR;
use super::source::SlackThreadSource;
use super::types::SlackMessage;

impl SlackThreadSource {
    /// Render `thread` as one `"<author>: <text>"` line per message, in thread order.
    ///
    /// Authors with a user id go through [`Self::resolve_identity`]; otherwise the
    /// platform `username` is used, else [`UNKNOWN_AUTHOR`]. Line breaks inside a
    /// message are folded to spaces so every message stays on its own line.
    pub async fn format_thread(&self, thread: &[SlackMessage]) -> String {
        let mut lines = Vec::with_capacity(thread.len());
        for message in thread {
            let author = match message.user.as_deref().filter(|id| !id.is_empty()) {
                Some(user_id) => self.resolve_identity(user_id).await,
                None => message
                    .username
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            };
            lines.push(format!("{author}: {}", single_line(&message.text)));
        }
        lines.join("\n")
    }
}

fn single_line(text: &str) -> String {
    if !text.contains(['\n', '\r']) {
        return text.to_string();
    }
    text.lines().collect::<Vec<_>>().join(" ")
}
