//! Slash commands for the chat input.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandId {
    Upload,
    Transcribe,
    Schedule,
    Integrations,
    Remove,
}

impl CommandId {
    /// Chat text sent on the user's behalf, for commands that are just shortcuts.
    pub fn preset_prompt(self) -> Option<&'static str> {
        match self {
            Self::Schedule => Some("Schedule a new meeting"),
            Self::Integrations => Some("Show me integrations"),
            Self::Upload | Self::Transcribe | Self::Remove => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlashCommand {
    pub id: CommandId,
    pub prefix: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[SlashCommand] = &[
    SlashCommand {
        id: CommandId::Upload,
        prefix: "/upload",
        label: "Upload",
        description: "Add a file to the upload tray",
        usage: "/upload <path>",
    },
    SlashCommand {
        id: CommandId::Transcribe,
        prefix: "/transcribe",
        label: "Transcribe",
        description: "Send the upload tray for transcription",
        usage: "/transcribe",
    },
    SlashCommand {
        id: CommandId::Schedule,
        prefix: "/schedule",
        label: "Schedule",
        description: "Schedule a new meeting",
        usage: "/schedule",
    },
    SlashCommand {
        id: CommandId::Integrations,
        prefix: "/integrations",
        label: "Integrations",
        description: "View available integrations",
        usage: "/integrations",
    },
    SlashCommand {
        id: CommandId::Remove,
        prefix: "/remove",
        label: "Remove",
        description: "Remove a file from the upload tray",
        usage: "/remove <number>",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub id: CommandId,
    pub argument: Option<String>,
}

/// Commands to show while the user is still typing a command name.
pub fn palette_matches(input: &str) -> Vec<&'static SlashCommand> {
    let input = input.trim_start();
    if !input.starts_with('/') || input.contains(char::is_whitespace) {
        return Vec::new();
    }
    let input = input.to_ascii_lowercase();
    COMMANDS
        .iter()
        .filter(|command| command.prefix.starts_with(&input))
        .collect()
}

/// Parse a complete command line. Unknown commands yield `None` and are sent as
/// ordinary chat text.
pub fn parse_command(input: &str) -> Option<ParsedCommand> {
    let input = input.trim();
    if !input.starts_with('/') {
        return None;
    }
    let (name, rest) = input
        .split_once(char::is_whitespace)
        .unwrap_or((input, ""));
    let name = name.to_ascii_lowercase();
    let command = COMMANDS.iter().find(|command| command.prefix == name)?;
    let argument = rest.trim();
    Some(ParsedCommand {
        id: command.id,
        argument: (!argument.is_empty()).then(|| argument.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixes(matches: &[&SlashCommand]) -> Vec<&'static str> {
        matches.iter().map(|c| c.prefix).collect()
    }

    #[test]
    fn palette_lists_all_for_bare_slash() {
        assert_eq!(palette_matches("/").len(), COMMANDS.len());
    }

    #[test]
    fn palette_narrows_by_prefix() {
        assert_eq!(prefixes(&palette_matches("/s")), vec!["/schedule"]);
        assert_eq!(prefixes(&palette_matches("/TR")), vec!["/transcribe"]);
        assert!(palette_matches("/x").is_empty());
    }

    #[test]
    fn palette_closes_once_arguments_start() {
        assert!(palette_matches("/upload ").is_empty());
        assert!(palette_matches("hello").is_empty());
    }

    #[test]
    fn parse_command_with_argument() {
        assert_eq!(
            parse_command("/upload  ~/calls/standup.mp3 "),
            Some(ParsedCommand {
                id: CommandId::Upload,
                argument: Some("~/calls/standup.mp3".into()),
            })
        );
        assert_eq!(
            parse_command("/Schedule"),
            Some(ParsedCommand {
                id: CommandId::Schedule,
                argument: None,
            })
        );
    }

    #[test]
    fn unknown_or_partial_commands_are_not_parsed() {
        assert_eq!(parse_command("/sched"), None);
        assert_eq!(parse_command("/unknown arg"), None);
        assert_eq!(parse_command("schedule"), None);
    }

    #[test]
    fn preset_prompts_only_for_shortcuts() {
        assert_eq!(
            CommandId::Integrations.preset_prompt(),
            Some("Show me integrations")
        );
        assert!(CommandId::Upload.preset_prompt().is_none());
    }
}
