use clap::{Args, Parser, Subcommand};
use slack_core::display::OutputFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "slack-cli")]
#[command(about = "Command line interface for the Slack Web API")]
#[command(version)]
#[command(after_help = "Examples:
  slack-cli channels list                     # List channels
  slack-cli messages send C0123ABCD 'Hello'   # Post a message
  echo done | slack-cli msg send C0123ABCD -  # Post text read from stdin
  slack-cli search messages deploy --in eng   # Search messages
  slack-cli config set-token                  # Store an API token
  slack-cli config test                       # Check the token works

Environment Variables:
  SLACK_API_TOKEN   API token (overrides the stored token)
  SLACK_API_URL     API base URL (default https://slack.com/api)
  RUST_LOG          Log filter, e.g. slack_core=debug")]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text or json
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Custom configuration directory path
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Slack API token
    #[arg(long, global = true, env = "SLACK_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Slack API base URL
    #[arg(long, global = true, env = "SLACK_API_URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage channels
    Channels {
        #[command(subcommand)]
        command: ChannelCommands,
    },
    /// Look up users
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Send, edit, read and react to messages
    #[command(visible_aliases = ["msg", "m"])]
    Messages {
        #[command(subcommand)]
        command: MessageCommands,
    },
    /// Search the workspace
    Search {
        #[command(subcommand)]
        command: SearchCommands,
    },
    /// Workspace information
    Team {
        #[command(subcommand)]
        command: TeamCommands,
    },
    /// Token and configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ChannelCommands {
    /// List channels
    List {
        /// Conversation types, comma separated
        #[arg(long, default_value = "public_channel,private_channel")]
        types: String,
        /// Include archived channels
        #[arg(long)]
        include_archived: bool,
        /// Page size used while fetching
        #[arg(long, default_value_t = 200)]
        limit: u32,
    },
    /// Show channel details
    Info { channel: String },
    /// Create a channel
    Create {
        name: String,
        /// Create a private channel
        #[arg(long)]
        private: bool,
    },
    /// Archive a channel
    Archive { channel: String },
    /// Unarchive a channel
    Unarchive { channel: String },
    /// Set the channel topic
    SetTopic { channel: String, topic: String },
    /// Set the channel purpose
    SetPurpose { channel: String, purpose: String },
    /// Invite users to a channel
    Invite {
        channel: String,
        #[arg(required = true, num_args = 1..)]
        users: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List users
    List {
        /// Page size used while fetching
        #[arg(long, default_value_t = 200)]
        limit: u32,
    },
    /// Show user details
    Info { user: String },
}

/// Body options shared by `send` and `update`.
#[derive(Args, Debug, Clone, Default)]
pub struct FormatArgs {
    /// Block Kit blocks as a JSON array (replaces the default block)
    #[arg(long, conflicts_with = "simple")]
    pub blocks: Option<String>,
    /// Send plain text without block formatting
    #[arg(long)]
    pub simple: bool,
}

#[derive(Subcommand, Debug)]
pub enum MessageCommands {
    /// Send a message ("-" reads the text from stdin)
    #[command(after_help = "Examples:
  slack-cli messages send C0123ABCD 'Deploy finished'
  slack-cli messages send C0123ABCD 'Looking' --thread 1704067200.123456
  cat notes.md | slack-cli messages send C0123ABCD -")]
    Send {
        channel: String,
        text: String,
        /// Parent message timestamp to reply in a thread
        #[arg(long)]
        thread: Option<String>,
        #[command(flatten)]
        format: FormatArgs,
    },
    /// Edit a message
    Update {
        channel: String,
        ts: String,
        text: String,
        #[command(flatten)]
        format: FormatArgs,
    },
    /// Delete a message
    Delete { channel: String, ts: String },
    /// Show channel history
    History {
        channel: String,
        /// Page size used while fetching
        #[arg(long, default_value_t = 20)]
        limit: u32,
        /// Only messages after this timestamp
        #[arg(long)]
        oldest: Option<String>,
        /// Only messages before this timestamp
        #[arg(long)]
        latest: Option<String>,
    },
    /// Show a thread
    Thread {
        channel: String,
        ts: String,
        /// Page size used while fetching
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },
    /// Add a reaction
    React {
        channel: String,
        ts: String,
        emoji: String,
    },
    /// Remove a reaction
    Unreact {
        channel: String,
        ts: String,
        emoji: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SearchCommands {
    /// Search messages
    #[command(after_help = "Examples:
  slack-cli search messages 'deploy failed' --in eng --after 2024-01-01
  slack-cli search messages invoice --from @alice --has-link")]
    Messages(SearchArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    pub query: String,
    /// all, public, private, dm or mpim
    #[arg(long)]
    pub scope: Option<String>,
    /// Only in this channel
    #[arg(long = "in")]
    pub in_channel: Option<String>,
    /// Only from this user
    #[arg(long = "from")]
    pub from_user: Option<String>,
    /// Only after this date (YYYY-MM-DD)
    #[arg(long)]
    pub after: Option<String>,
    /// Only before this date (YYYY-MM-DD)
    #[arg(long)]
    pub before: Option<String>,
    #[arg(long)]
    pub has_link: bool,
    #[arg(long)]
    pub has_reaction: bool,
    #[arg(long)]
    pub has_pin: bool,
    /// File type filter
    #[arg(long = "type")]
    pub file_type: Option<String>,
    /// Results per page
    #[arg(long, default_value_t = 20)]
    pub count: u32,
    /// Page number
    #[arg(long, default_value_t = 1)]
    pub page: u32,
}

#[derive(Subcommand, Debug)]
pub enum TeamCommands {
    /// Show workspace details
    Info,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Store the API token (prompts when omitted)
    SetToken { token: Option<String> },
    /// Show the current configuration
    Show,
    /// Delete the stored API token
    DeleteToken {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Verify the token with auth.test
    Test,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_messages_aliases() {
        for alias in ["messages", "msg", "m"] {
            let cli = Cli::try_parse_from(["slack-cli", alias, "delete", "C123", "1.2"])
                .expect("alias should parse");
            assert!(matches!(
                cli.command,
                Commands::Messages {
                    command: MessageCommands::Delete { .. }
                }
            ));
        }
    }

    #[test]
    fn test_blocks_conflicts_with_simple() {
        let result = Cli::try_parse_from([
            "slack-cli", "messages", "send", "C123", "hi", "--simple", "--blocks", "[]",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_output_flag() {
        let cli = Cli::try_parse_from(["slack-cli", "team", "info", "-o", "json"])
            .expect("should parse");
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn test_invite_requires_users() {
        assert!(Cli::try_parse_from(["slack-cli", "channels", "invite", "C123"]).is_err());
    }
}
