//! Command definitions
//!
//! Named console commands and the text line each one sends.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Result, WireError};

/// A console command with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameCommand {
    /// Broadcast a chat message
    Say { message: String },

    /// Give items to a player (amount defaults to 1)
    Give {
        player: String,
        item: String,
        amount: Option<u32>,
    },

    /// Flush the world to disk
    SaveAll,

    /// List online players
    List,

    /// Set the weather (defaults: `clear`, 1000 ticks)
    Weather {
        kind: Option<String>,
        duration: Option<u32>,
    },

    /// Set the difficulty (defaults to `normal`)
    Difficulty { level: Option<String> },

    /// Manage the whitelist (action defaults to `list`)
    Whitelist {
        action: Option<String>,
        player: Option<String>,
    },

    Op { player: String },
    Deop { player: String },

    Ban {
        player: String,
        reason: Option<String>,
    },

    Pardon { player: String },

    Kick {
        player: String,
        reason: Option<String>,
    },

    /// Teleport a player to a target
    Tp {
        player: String,
        target: Option<String>,
    },

    /// `time set <value>` (defaults to `day`)
    Time { value: Option<String> },

    /// Change game mode (defaults to `survival`)
    Gamemode {
        mode: Option<String>,
        player: Option<String>,
    },

    Seed,
    Stop,

    /// Sent as-is
    Raw(String),
}

impl GameCommand {
    /// Build a command from its name and keyword arguments
    ///
    /// Unknown names pass through unchanged as [`GameCommand::Raw`].
    pub fn from_args(name: &str, args: &HashMap<String, String>) -> Result<Self> {
        let text = |key: &str| args.get(key).cloned().unwrap_or_default();
        let opt = |key: &str| args.get(key).filter(|v| !v.is_empty()).cloned();

        let command = match name {
            "say" => GameCommand::Say {
                message: text("message"),
            },
            "give" => GameCommand::Give {
                player: text("player"),
                item: text("item"),
                amount: number(args, "amount")?,
            },
            "save-all" => GameCommand::SaveAll,
            "list" => GameCommand::List,
            "weather" => GameCommand::Weather {
                kind: opt("type"),
                duration: number(args, "duration")?,
            },
            "difficulty" => GameCommand::Difficulty {
                level: opt("level"),
            },
            "whitelist" => GameCommand::Whitelist {
                action: opt("action"),
                player: opt("player"),
            },
            "op" => GameCommand::Op {
                player: text("player"),
            },
            "deop" => GameCommand::Deop {
                player: text("player"),
            },
            "ban" => GameCommand::Ban {
                player: text("player"),
                reason: opt("reason"),
            },
            "pardon" => GameCommand::Pardon {
                player: text("player"),
            },
            "kick" => GameCommand::Kick {
                player: text("player"),
                reason: opt("reason"),
            },
            "tp" => GameCommand::Tp {
                player: text("player"),
                target: opt("target"),
            },
            "time" => GameCommand::Time { value: opt("value") },
            "gamemode" => GameCommand::Gamemode {
                mode: opt("mode"),
                player: opt("player"),
            },
            "seed" => GameCommand::Seed,
            "stop" => GameCommand::Stop,
            other => GameCommand::Raw(other.to_string()),
        };

        Ok(command)
    }

    /// The text line sent over the console
    pub fn to_command_line(&self) -> String {
        let line = match self {
            GameCommand::Say { message } => format!("say {}", message),
            GameCommand::Give {
                player,
                item,
                amount,
            } => format!("give {} {} {}", player, item, amount.unwrap_or(1)),
            GameCommand::SaveAll => "save-all".to_string(),
            GameCommand::List => "list".to_string(),
            GameCommand::Weather { kind, duration } => format!(
                "weather {} {}",
                kind.as_deref().unwrap_or("clear"),
                duration.unwrap_or(1000)
            ),
            GameCommand::Difficulty { level } => {
                format!("difficulty {}", level.as_deref().unwrap_or("normal"))
            }
            GameCommand::Whitelist { action, player } => format!(
                "whitelist {} {}",
                action.as_deref().unwrap_or("list"),
                player.as_deref().unwrap_or("")
            ),
            GameCommand::Op { player } => format!("op {}", player),
            GameCommand::Deop { player } => format!("deop {}", player),
            GameCommand::Ban { player, reason } => {
                format!("ban {} {}", player, reason.as_deref().unwrap_or(""))
            }
            GameCommand::Pardon { player } => format!("pardon {}", player),
            GameCommand::Kick { player, reason } => {
                format!("kick {} {}", player, reason.as_deref().unwrap_or(""))
            }
            GameCommand::Tp { player, target } => {
                format!("tp {} {}", player, target.as_deref().unwrap_or(""))
            }
            GameCommand::Time { value } => {
                format!("time set {}", value.as_deref().unwrap_or("day"))
            }
            GameCommand::Gamemode { mode, player } => format!(
                "gamemode {} {}",
                mode.as_deref().unwrap_or("survival"),
                player.as_deref().unwrap_or("")
            ),
            GameCommand::Seed => "seed".to_string(),
            GameCommand::Stop => "stop".to_string(),
            GameCommand::Raw(text) => return text.clone(),
        };

        // Optional trailing arguments leave a dangling space behind
        line.trim_end().to_string()
    }
}

impl fmt::Display for GameCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_command_line())
    }
}

fn number(args: &HashMap<String, String>, key: &str) -> Result<Option<u32>> {
    match args.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|_| {
            WireError::InvalidCommand(format!("{} must be a non-negative integer, got {:?}", key, raw))
        }),
    }
}

/// Render a `{placeholder}` command template
///
/// Placeholders with no matching argument are dropped and runs of
/// whitespace collapse to one space. An unclosed `{` is kept literally.
pub fn render_template(template: &str, args: &HashMap<String, String>) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                if let Some(value) = args.get(&after[..close]) {
                    rendered.push_str(value);
                }
                rest = &after[close + 1..];
            }
            None => {
                rendered.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    rendered.push_str(rest);

    rendered.split_whitespace().collect::<Vec<_>>().join(" ")
}
