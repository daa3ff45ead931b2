//! Leash announcements - Server-wide chat when the helicopter is pulled back

use crate::config::NotificationConfig;
use crate::grid::grid_label;
use crate::host::{ChatMessage, Host};
use crate::logging::LOG_TARGET;
use crate::types::PlayerId;
use glam::Vec3;
use log::warn;

/// Icon markup placed in front of every leash announcement
pub const CHAT_ICON_PREFIX: &str = "<size=18><sprite name=\"heli\" /></size> ";

/// What happened during one broadcast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastReport {
    /// The formatted message, without the icon prefix
    pub message: String,
    /// Recipients that received it
    pub delivered: usize,
    /// Recipients whose delivery failed
    pub failed: usize,
}

/// Substitute positional `{n}` placeholders in a template
///
/// Single pass: substituted text is never re-scanned, so an argument that
/// itself contains `{1}` stays literal. `{{` and `}}` produce single braces.
/// Placeholders with no matching argument are left as written.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(|c: char| c == '{' || c == '}') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with('{') {
            if let Some(close) = tail.find('}') {
                let arg = tail[1..close]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| args.get(index));
                if let Some(arg) = arg {
                    out.push_str(arg);
                    rest = &tail[close + 1..];
                    continue;
                }
            }
        }

        out.push_str(&tail[..1]);
        rest = &tail[1..];
    }

    out.push_str(rest);
    out
}

/// Format the leash message for an attacker at `position`
pub fn leash_message(template: &str, display_name: &str, position: Vec3) -> String {
    let grid = grid_label(position);
    format_message(template, &[display_name, &grid])
}

/// Tell every connected player where the helicopter is being held
///
/// Returns `None` without sending anything if chat is disabled or the
/// attacker is unknown or disconnected. A failed delivery to one player is
/// logged and counted; the remaining players still get the message.
pub fn announce(
    host: &mut impl Host,
    attacker: PlayerId,
    config: &NotificationConfig,
) -> Option<BroadcastReport> {
    if !config.send_chat_message {
        return None;
    }

    let player = host.player(attacker)?;
    if !player.connected {
        return None;
    }

    let message = leash_message(&config.global_message_format, &player.display_name, player.position);
    let chat = ChatMessage {
        text: format!("{}{}", CHAT_ICON_PREFIX, message),
        color: config.chat_message_color.clone(),
    };

    let mut report = BroadcastReport {
        message,
        delivered: 0,
        failed: 0,
    };

    for recipient in host.connected_players() {
        match host.send_chat(recipient, &chat) {
            Ok(()) => report.delivered += 1,
            Err(err) => {
                warn!(target: LOG_TARGET, "Skipping leash message delivery: {}", err);
                report.failed += 1;
            }
        }
    }

    Some(report)
}
