use crate::cli::command_handlers::{
    ChannelsHandler, ConfigHandler, MessagesHandler, SearchHandler, TeamHandler, UsersHandler,
};
use crate::cli::main_types::Commands;
use slack_core::api::client::SlackClient;
use slack_core::core::services::config_service::{ConfigService, Overrides};
use slack_core::display::OutputFormat;
use slack_core::error::{AppError, CliError};
use std::io::{self, Write};
use tracing::debug;

pub struct Dispatcher {
    service: ConfigService,
    overrides: Overrides,
    format: OutputFormat,
}

impl Dispatcher {
    pub fn new(service: ConfigService, overrides: Overrides, format: OutputFormat) -> Self {
        Self {
            service,
            overrides,
            format,
        }
    }

    fn create_client(&self) -> Result<SlackClient, AppError> {
        let client = self.service.build_client(&self.overrides)?;
        debug!(base_url = client.base_url(), "client ready");
        Ok(client)
    }

    pub async fn dispatch(&self, command: Commands) -> Result<(), AppError> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let stdin = io::stdin();
        let mut input = stdin.lock();

        // Arguments are checked before a token is required.
        match command {
            Commands::Channels { command } => {
                ChannelsHandler::validate(&command)?;
                let client = self.create_client()?;
                ChannelsHandler::new(self.format)
                    .handle(command, &client, &mut out)
                    .await?;
            }
            Commands::Users { command } => {
                UsersHandler::validate(&command)?;
                let client = self.create_client()?;
                UsersHandler::new(self.format)
                    .handle(command, &client, &mut out)
                    .await?;
            }
            Commands::Messages { command } => {
                MessagesHandler::validate(&command)?;
                let client = self.create_client()?;
                MessagesHandler::new(self.format)
                    .handle(command, &client, &mut input, &mut out)
                    .await?;
            }
            Commands::Search { command } => {
                SearchHandler::validate(&command)?;
                let client = self.create_client()?;
                SearchHandler::new(self.format)
                    .handle(command, &client, &mut out)
                    .await?;
            }
            Commands::Team { command } => {
                let client = self.create_client()?;
                TeamHandler::new(self.format)
                    .handle(command, &client, &mut out)
                    .await?;
            }
            Commands::Config { command } => {
                let handler = ConfigHandler::new(self.format, atty::is(atty::Stream::Stdin));
                handler
                    .handle(
                        command,
                        &self.service,
                        &self.overrides,
                        || self.create_client(),
                        &mut input,
                        &mut out,
                    )
                    .await?;
            }
        }

        out.flush().map_err(|e| CliError::Output(e).into())
    }
}
