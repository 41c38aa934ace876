//! Discord permission bit tables and name normalization.
//!
//! Two fixed tables drive everything downstream: the canonical
//! `NAME → bit value` map and a one-directional alias map from the
//! client-library flag spelling (`SendMessages`) to the canonical API
//! spelling (`SEND_MESSAGES`). Bit values span positions 1–40, so the
//! mask type is `u64` throughout.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Moderation-space flags (bit positions 1–3).
const MODERATION: &[(&str, u64)] = &[
    ("KICK_MEMBERS", 1 << 1),
    ("BAN_MEMBERS", 1 << 2),
    ("ADMINISTRATOR", 1 << 3),
];

/// General-space flags (bit positions 4–40, non-contiguous).
const GENERAL: &[(&str, u64)] = &[
    ("MANAGE_CHANNELS", 1 << 4),
    ("MANAGE_GUILD", 1 << 5),
    ("ADD_REACTIONS", 1 << 6),
    ("VIEW_AUDIT_LOG", 1 << 7),
    ("VIEW_CHANNEL", 1 << 10),
    ("SEND_MESSAGES", 1 << 11),
    ("MANAGE_MESSAGES", 1 << 13),
    ("EMBED_LINKS", 1 << 14),
    ("ATTACH_FILES", 1 << 15),
    ("READ_MESSAGE_HISTORY", 1 << 16),
    ("MENTION_EVERYONE", 1 << 17),
    ("USE_EXTERNAL_EMOJIS", 1 << 18),
    ("CONNECT", 1 << 20),
    ("SPEAK", 1 << 21),
    ("MUTE_MEMBERS", 1 << 22),
    ("DEAFEN_MEMBERS", 1 << 23),
    ("MOVE_MEMBERS", 1 << 24),
    ("CHANGE_NICKNAME", 1 << 26),
    ("MANAGE_NICKNAMES", 1 << 27),
    ("MANAGE_ROLES", 1 << 28),
    ("MANAGE_WEBHOOKS", 1 << 29),
    ("MANAGE_EMOJIS_AND_STICKERS", 1 << 30),
    ("USE_APPLICATION_COMMANDS", 1 << 31),
    ("REQUEST_TO_SPEAK", 1 << 32),
    ("MANAGE_EVENTS", 1 << 33),
    ("MANAGE_THREADS", 1 << 34),
    ("CREATE_PUBLIC_THREADS", 1 << 35),
    ("CREATE_PRIVATE_THREADS", 1 << 36),
    ("USE_EXTERNAL_STICKERS", 1 << 37),
    ("SEND_MESSAGES_IN_THREADS", 1 << 38),
    ("USE_EMBEDDED_ACTIVITIES", 1 << 39),
    ("MODERATE_MEMBERS", 1 << 40),
];

/// Canonical permission name → bit value.
pub static PERMISSION_BITS: LazyLock<HashMap<&'static str, u64>> =
    LazyLock::new(|| MODERATION.iter().chain(GENERAL.iter()).copied().collect());

/// Client-library flag spelling → canonical API name.
pub static ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("KickMembers", "KICK_MEMBERS"),
        ("BanMembers", "BAN_MEMBERS"),
        ("Administrator", "ADMINISTRATOR"),
        ("ManageChannels", "MANAGE_CHANNELS"),
        ("ManageGuild", "MANAGE_GUILD"),
        ("AddReactions", "ADD_REACTIONS"),
        ("ViewAuditLog", "VIEW_AUDIT_LOG"),
        ("ViewChannel", "VIEW_CHANNEL"),
        ("SendMessages", "SEND_MESSAGES"),
        ("ManageMessages", "MANAGE_MESSAGES"),
        ("EmbedLinks", "EMBED_LINKS"),
        ("AttachFiles", "ATTACH_FILES"),
        ("ReadMessageHistory", "READ_MESSAGE_HISTORY"),
        ("MentionEveryone", "MENTION_EVERYONE"),
        ("UseExternalEmojis", "USE_EXTERNAL_EMOJIS"),
        ("Connect", "CONNECT"),
        ("Speak", "SPEAK"),
        ("MuteMembers", "MUTE_MEMBERS"),
        ("DeafenMembers", "DEAFEN_MEMBERS"),
        ("MoveMembers", "MOVE_MEMBERS"),
        ("ChangeNickname", "CHANGE_NICKNAME"),
        ("ManageNicknames", "MANAGE_NICKNAMES"),
        ("ManageRoles", "MANAGE_ROLES"),
        ("ManageWebhooks", "MANAGE_WEBHOOKS"),
        ("ManageEmojisAndStickers", "MANAGE_EMOJIS_AND_STICKERS"),
        ("UseApplicationCommands", "USE_APPLICATION_COMMANDS"),
        ("RequestToSpeak", "REQUEST_TO_SPEAK"),
        ("ManageEvents", "MANAGE_EVENTS"),
        ("ManageThreads", "MANAGE_THREADS"),
        ("CreatePublicThreads", "CREATE_PUBLIC_THREADS"),
        ("CreatePrivateThreads", "CREATE_PRIVATE_THREADS"),
        ("UseExternalStickers", "USE_EXTERNAL_STICKERS"),
        ("SendMessagesInThreads", "SEND_MESSAGES_IN_THREADS"),
        ("UseEmbeddedActivities", "USE_EMBEDDED_ACTIVITIES"),
        ("ModerateMembers", "MODERATE_MEMBERS"),
    ]
    .into_iter()
    .collect()
});

/// Normalize a raw token to its canonical permission name.
///
/// Canonical names pass through unchanged, alias spellings map to their
/// canonical form, and unknown tokens pass through as-is so the calculator
/// can surface them as invalid.
pub fn normalize(raw: &str) -> String {
    if PERMISSION_BITS.contains_key(raw) {
        return raw.to_string();
    }
    ALIASES
        .get(raw)
        .map_or_else(|| raw.to_string(), |canonical| (*canonical).to_string())
}

/// Bit value for a canonical permission name, if the table knows it.
pub fn bit_for(name: &str) -> Option<u64> {
    PERMISSION_BITS.get(name).copied()
}

/// All canonical permission names, sorted.
pub fn all_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = PERMISSION_BITS.keys().copied().collect();
    names.sort_unstable();
    names
}
