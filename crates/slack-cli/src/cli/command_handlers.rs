use crate::cli::input::{message_format, read_text};
use crate::cli::main_types::{
    ChannelCommands, ConfigCommands, MessageCommands, SearchArgs, SearchCommands, TeamCommands,
    UserCommands,
};
use serde::Serialize;
use serde_json::json;
use slack_core::api::client::SlackClient;
use slack_core::api::models::{Channel, Message, User};
use slack_core::api::reactions::normalize_emoji;
use slack_core::api::transport::Transport;
use slack_core::core::query::{QueryOptions, build_query};
use slack_core::core::services::config_service::{ConfigService, Overrides};
use slack_core::display::{OutputFormat, TableDisplay, render_json, render_key_values, user_role};
use slack_core::error::{AppError, CliError};
use slack_core::storage::credentials::mask_token;
use slack_core::utils::validation::{
    validate_channel_id, validate_limit, validate_timestamp, validate_url, validate_user_id,
};
use std::io::{BufRead, Write};
use tracing::debug;

fn write_line(out: &mut dyn Write, text: &str) -> Result<(), AppError> {
    writeln!(out, "{}", text).map_err(|e| CliError::Output(e).into())
}

fn write_json<S: Serialize + ?Sized>(out: &mut dyn Write, value: &S) -> Result<(), AppError> {
    write_line(out, &render_json(value)?)
}

fn table() -> TableDisplay {
    TableDisplay::new().with_colors(atty::is(atty::Stream::Stdout))
}

fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_string()
}

fn validate_optional_ts(ts: Option<&str>) -> Result<(), AppError> {
    match ts.filter(|t| !t.is_empty()) {
        Some(t) => validate_timestamp(t),
        None => Ok(()),
    }
}

/// Prints the result of an operation that returns nothing but success.
fn write_done(
    out: &mut dyn Write,
    format: OutputFormat,
    message: &str,
    details: serde_json::Value,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => {
            let mut body = json!({"ok": true});
            if let (Some(body), Some(details)) = (body.as_object_mut(), details.as_object()) {
                body.extend(details.clone());
            }
            write_json(out, &body)
        }
        OutputFormat::Text => write_line(out, message),
    }
}

pub struct ChannelsHandler {
    format: OutputFormat,
}

impl ChannelsHandler {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn validate(command: &ChannelCommands) -> Result<(), AppError> {
        match command {
            ChannelCommands::List { limit, .. } => validate_limit(*limit),
            ChannelCommands::Create { name, .. } => {
                if name.trim().is_empty() {
                    return Err(CliError::InvalidArguments(
                        "channel name cannot be empty".to_string(),
                    )
                    .into());
                }
                Ok(())
            }
            ChannelCommands::Info { channel }
            | ChannelCommands::Archive { channel }
            | ChannelCommands::Unarchive { channel }
            | ChannelCommands::SetTopic { channel, .. }
            | ChannelCommands::SetPurpose { channel, .. } => validate_channel_id(channel),
            ChannelCommands::Invite { channel, users } => {
                validate_channel_id(channel)?;
                users.iter().try_for_each(|u| validate_user_id(u))
            }
        }
    }

    pub async fn handle<T: Transport>(
        &self,
        command: ChannelCommands,
        client: &SlackClient<T>,
        out: &mut dyn Write,
    ) -> Result<(), AppError> {
        match command {
            ChannelCommands::List {
                types,
                include_archived,
                limit,
            } => {
                let channels = client.list_channels(&types, !include_archived, limit).await?;
                match self.format {
                    OutputFormat::Json => write_json(out, &channels),
                    OutputFormat::Text if channels.is_empty() => {
                        write_line(out, "No channels found")
                    }
                    OutputFormat::Text => {
                        write_line(out, &table().render_channels(&channels))?;
                        write_line(out, &format!("{} channels", channels.len()))
                    }
                }
            }
            ChannelCommands::Info { channel } => {
                let channel = client.get_channel_info(&channel).await?;
                match self.format {
                    OutputFormat::Json => write_json(out, &channel),
                    OutputFormat::Text => write_line(out, &channel_details(&channel)),
                }
            }
            ChannelCommands::Create { name, private } => {
                let channel = client.create_channel(&name, private).await?;
                match self.format {
                    OutputFormat::Json => write_json(out, &channel),
                    OutputFormat::Text => write_line(
                        out,
                        &format!("Created channel #{} ({})", channel.name, channel.id),
                    ),
                }
            }
            ChannelCommands::Archive { channel } => {
                client.archive_channel(&channel).await?;
                write_done(
                    out,
                    self.format,
                    &format!("Archived channel {}", channel),
                    json!({"channel": channel}),
                )
            }
            ChannelCommands::Unarchive { channel } => {
                client.unarchive_channel(&channel).await?;
                write_done(
                    out,
                    self.format,
                    &format!("Unarchived channel {}", channel),
                    json!({"channel": channel}),
                )
            }
            ChannelCommands::SetTopic { channel, topic } => {
                client.set_channel_topic(&channel, &topic).await?;
                write_done(
                    out,
                    self.format,
                    &format!("Topic set for {}", channel),
                    json!({"channel": channel, "topic": topic}),
                )
            }
            ChannelCommands::SetPurpose { channel, purpose } => {
                client.set_channel_purpose(&channel, &purpose).await?;
                write_done(
                    out,
                    self.format,
                    &format!("Purpose set for {}", channel),
                    json!({"channel": channel, "purpose": purpose}),
                )
            }
            ChannelCommands::Invite { channel, users } => {
                client.invite_to_channel(&channel, &users).await?;
                write_done(
                    out,
                    self.format,
                    &format!("Invited {} user(s) to {}", users.len(), channel),
                    json!({"channel": channel, "users": users}),
                )
            }
        }
    }
}

fn channel_details(channel: &Channel) -> String {
    let text_of = |t: &Option<slack_core::api::models::ChannelText>| {
        t.as_ref().map(|t| t.value.clone()).unwrap_or_default()
    };
    render_key_values(&[
        ("ID", channel.id.clone()),
        ("Name", format!("#{}", channel.name)),
        ("Private", yes_no(channel.is_private)),
        ("Archived", yes_no(channel.is_archived)),
        ("Members", channel.num_members.to_string()),
        ("Topic", text_of(&channel.topic)),
        ("Purpose", text_of(&channel.purpose)),
    ])
}

pub struct UsersHandler {
    format: OutputFormat,
}

impl UsersHandler {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn validate(command: &UserCommands) -> Result<(), AppError> {
        match command {
            UserCommands::List { limit } => validate_limit(*limit),
            UserCommands::Info { user } => validate_user_id(user),
        }
    }

    pub async fn handle<T: Transport>(
        &self,
        command: UserCommands,
        client: &SlackClient<T>,
        out: &mut dyn Write,
    ) -> Result<(), AppError> {
        match command {
            UserCommands::List { limit } => {
                let users = client.list_users(limit).await?;
                match self.format {
                    OutputFormat::Json => write_json(out, &users),
                    OutputFormat::Text if users.is_empty() => write_line(out, "No users found"),
                    OutputFormat::Text => {
                        write_line(out, &table().render_users(&users))?;
                        write_line(out, &format!("{} users", users.len()))
                    }
                }
            }
            UserCommands::Info { user } => {
                let user = client.get_user_info(&user).await?;
                match self.format {
                    OutputFormat::Json => write_json(out, &user),
                    OutputFormat::Text => write_line(out, &user_details(&user)),
                }
            }
        }
    }
}

fn user_details(user: &User) -> String {
    render_key_values(&[
        ("ID", user.id.clone()),
        ("Name", user.name.clone()),
        ("Real name", user.real_name.clone()),
        ("Role", user_role(user).to_string()),
    ])
}

pub struct MessagesHandler {
    format: OutputFormat,
}

impl MessagesHandler {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn validate(command: &MessageCommands) -> Result<(), AppError> {
        match command {
            MessageCommands::Send {
                channel, thread, ..
            } => {
                validate_channel_id(channel)?;
                validate_optional_ts(thread.as_deref())
            }
            MessageCommands::Update { channel, ts, .. }
            | MessageCommands::Delete { channel, ts }
            | MessageCommands::React { channel, ts, .. }
            | MessageCommands::Unreact { channel, ts, .. } => {
                validate_channel_id(channel)?;
                validate_timestamp(ts)
            }
            MessageCommands::History {
                channel,
                limit,
                oldest,
                latest,
            } => {
                validate_channel_id(channel)?;
                validate_limit(*limit)?;
                validate_optional_ts(oldest.as_deref())?;
                validate_optional_ts(latest.as_deref())
            }
            MessageCommands::Thread { channel, ts, limit } => {
                validate_channel_id(channel)?;
                validate_timestamp(ts)?;
                validate_limit(*limit)
            }
        }
    }

    pub async fn handle<T: Transport>(
        &self,
        command: MessageCommands,
        client: &SlackClient<T>,
        stdin: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> Result<(), AppError> {
        match command {
            MessageCommands::Send {
                channel,
                text,
                thread,
                format,
            } => {
                let text = read_text(&text, stdin)?;
                let message_format = message_format(&format)?;
                debug!(%channel, ?message_format, "sending message");
                let message = client
                    .send_message(&channel, &text, thread.as_deref(), &message_format)
                    .await?;
                match self.format {
                    OutputFormat::Json => write_json(out, &message),
                    OutputFormat::Text => {
                        write_line(out, &format!("Message sent (ts: {})", message.ts))
                    }
                }
            }
            MessageCommands::Update {
                channel,
                ts,
                text,
                format,
            } => {
                let text = read_text(&text, stdin)?;
                let message_format = message_format(&format)?;
                let message = client
                    .update_message(&channel, &ts, &text, &message_format)
                    .await?;
                match self.format {
                    OutputFormat::Json => write_json(out, &message),
                    OutputFormat::Text => {
                        write_line(out, &format!("Message updated (ts: {})", message.ts))
                    }
                }
            }
            MessageCommands::Delete { channel, ts } => {
                client.delete_message(&channel, &ts).await?;
                write_done(
                    out,
                    self.format,
                    &format!("Message deleted (ts: {})", ts),
                    json!({"channel": channel, "ts": ts}),
                )
            }
            MessageCommands::History {
                channel,
                limit,
                oldest,
                latest,
            } => {
                let messages = client
                    .get_channel_history(&channel, limit, oldest.as_deref(), latest.as_deref())
                    .await?;
                self.write_messages(out, &messages)
            }
            MessageCommands::Thread { channel, ts, limit } => {
                let messages = client.get_thread_replies(&channel, &ts, limit).await?;
                self.write_messages(out, &messages)
            }
            MessageCommands::React { channel, ts, emoji } => {
                client.add_reaction(&channel, &ts, &emoji).await?;
                let name = normalize_emoji(&emoji);
                write_done(
                    out,
                    self.format,
                    &format!("Added :{}: to message {}", name, ts),
                    json!({"channel": channel, "ts": ts, "name": name}),
                )
            }
            MessageCommands::Unreact { channel, ts, emoji } => {
                client.remove_reaction(&channel, &ts, &emoji).await?;
                let name = normalize_emoji(&emoji);
                write_done(
                    out,
                    self.format,
                    &format!("Removed :{}: from message {}", name, ts),
                    json!({"channel": channel, "ts": ts, "name": name}),
                )
            }
        }
    }

    fn write_messages(&self, out: &mut dyn Write, messages: &[Message]) -> Result<(), AppError> {
        match self.format {
            OutputFormat::Json => write_json(out, messages),
            OutputFormat::Text if messages.is_empty() => write_line(out, "No messages found"),
            OutputFormat::Text => write_line(out, &table().render_messages(messages)),
        }
    }
}

pub struct SearchHandler {
    format: OutputFormat,
}

impl SearchHandler {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    fn options(args: &SearchArgs) -> QueryOptions {
        QueryOptions {
            scope: args.scope.clone(),
            in_channel: args.in_channel.clone(),
            from_user: args.from_user.clone(),
            after: args.after.clone(),
            before: args.before.clone(),
            has_link: args.has_link,
            has_reaction: args.has_reaction,
            has_pin: args.has_pin,
            file_type: args.file_type.clone(),
        }
    }

    pub fn validate(command: &SearchCommands) -> Result<(), AppError> {
        match command {
            SearchCommands::Messages(args) => {
                if args.query.trim().is_empty() {
                    return Err(CliError::InvalidArguments(
                        "search query cannot be empty".to_string(),
                    )
                    .into());
                }
                if args.page == 0 {
                    return Err(CliError::InvalidArguments(
                        "invalid page 0: must be at least 1".to_string(),
                    )
                    .into());
                }
                validate_limit(args.count)?;
                Ok(Self::options(args).validate()?)
            }
        }
    }

    pub async fn handle<T: Transport>(
        &self,
        command: SearchCommands,
        client: &SlackClient<T>,
        out: &mut dyn Write,
    ) -> Result<(), AppError> {
        match command {
            SearchCommands::Messages(args) => {
                let query = build_query(&args.query, &Self::options(&args));
                debug!(%query, "searching messages");
                let results = client.search_messages(&query, args.count, args.page).await?;
                match self.format {
                    OutputFormat::Json => write_json(out, &results),
                    OutputFormat::Text if results.matches.is_empty() => {
                        write_line(out, &format!("No messages matched {:?}", results.query))
                    }
                    OutputFormat::Text => write_line(out, &table().render_search_results(&results)),
                }
            }
        }
    }
}

pub struct TeamHandler {
    format: OutputFormat,
}

impl TeamHandler {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub async fn handle<T: Transport>(
        &self,
        command: TeamCommands,
        client: &SlackClient<T>,
        out: &mut dyn Write,
    ) -> Result<(), AppError> {
        match command {
            TeamCommands::Info => {
                let team = client.get_team_info().await?;
                match self.format {
                    OutputFormat::Json => write_json(out, &team),
                    OutputFormat::Text => {
                        let mut pairs = vec![
                            ("ID", team.id.clone()),
                            ("Name", team.name.clone()),
                            ("Domain", team.domain.clone()),
                        ];
                        if let Some(email_domain) = team.email_domain.as_ref().filter(|d| !d.is_empty()) {
                            pairs.push(("Email domain", email_domain.clone()));
                        }
                        write_line(out, &render_key_values(&pairs))
                    }
                }
            }
        }
    }
}

pub struct ConfigHandler {
    format: OutputFormat,
    interactive: bool,
}

impl ConfigHandler {
    /// `interactive` means stdin is a terminal, so prompts may hide input.
    pub fn new(format: OutputFormat, interactive: bool) -> Self {
        Self {
            format,
            interactive,
        }
    }

    /// `connect` is only called by `config test`; the other commands work without a token.
    pub async fn handle<T, F>(
        &self,
        command: ConfigCommands,
        service: &ConfigService,
        overrides: &Overrides,
        connect: F,
        stdin: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> Result<(), AppError>
    where
        T: Transport,
        F: FnOnce() -> Result<SlackClient<T>, AppError>,
    {
        match command {
            ConfigCommands::Test => self.test(&connect()?, out).await,
            ConfigCommands::SetToken { token } => {
                let token = match token {
                    Some(token) => token,
                    None => self.prompt_token(stdin)?,
                };
                let token = token.trim();
                if token.is_empty() {
                    return Err(
                        CliError::InvalidArguments("API token cannot be empty".to_string()).into(),
                    );
                }
                if !token.starts_with("xox") {
                    tracing::warn!("token does not look like a Slack token (expected xoxb-/xoxp-)");
                }

                let source = service.token_store().store(token)?;
                write_done(
                    out,
                    self.format,
                    &format!("API token stored in {}", source),
                    json!({"stored_in": source.to_string()}),
                )
            }
            ConfigCommands::Show => {
                let base_url = service.base_url(overrides);
                validate_url(&base_url)?;
                let token = match service.resolve_token(overrides) {
                    Ok(resolved) => Some(resolved),
                    Err(AppError::Auth(_)) => None,
                    Err(e) => return Err(e),
                };
                let config_path = service.config_path().display().to_string();

                match self.format {
                    OutputFormat::Json => write_json(
                        out,
                        &json!({
                            "config_file": config_path,
                            "base_url": base_url,
                            "token": token.as_ref().map(|t| mask_token(&t.token)),
                            "token_source": token.as_ref().map(|t| t.source.to_string()),
                        }),
                    ),
                    OutputFormat::Text => {
                        let token_line = match &token {
                            Some(t) => format!("{} ({})", mask_token(&t.token), t.source),
                            None => "not set".to_string(),
                        };
                        write_line(
                            out,
                            &render_key_values(&[
                                ("Config file", config_path),
                                ("Base URL", base_url),
                                ("API token", token_line),
                            ]),
                        )
                    }
                }
            }
            ConfigCommands::DeleteToken { force } => {
                if !force {
                    write!(out, "About to delete the stored Slack API token.\nAre you sure? [y/N]: ")
                        .and_then(|_| out.flush())
                        .map_err(CliError::Output)?;
                    let mut answer = String::new();
                    stdin.read_line(&mut answer).map_err(CliError::Stdin)?;
                    let answer = answer.trim().to_lowercase();
                    if answer != "y" && answer != "yes" {
                        return write_line(out, "Cancelled.");
                    }
                }

                service.token_store().delete()?;
                write_done(out, self.format, "API token deleted", json!({"deleted": true}))
            }
        }
    }

    fn prompt_token(&self, stdin: &mut dyn BufRead) -> Result<String, AppError> {
        if self.interactive {
            return rpassword::prompt_password("Slack API token: ")
                .map_err(|e| CliError::Stdin(e).into());
        }
        let mut line = String::new();
        stdin.read_line(&mut line).map_err(CliError::Stdin)?;
        Ok(line)
    }

    /// `config test`: one auth.test call.
    async fn test<T: Transport>(
        &self,
        client: &SlackClient<T>,
        out: &mut dyn Write,
    ) -> Result<(), AppError> {
        let info = client.auth_test().await?;
        match self.format {
            OutputFormat::Json => write_json(out, &info),
            OutputFormat::Text => {
                let mut pairs = vec![("Workspace", info.team.clone()), ("User", info.user.clone())];
                if let Some(bot_id) = info.bot_id.as_ref().filter(|b| !b.is_empty()) {
                    pairs.push(("Bot ID", bot_id.clone()));
                }
                write_line(out, "Authentication successful")?;
                write_line(out, &render_key_values(&pairs))
            }
        }
    }
}
