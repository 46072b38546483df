use brightsync_core::util::normalize_text_option;

use crate::cli::ConfigCommands;
use crate::config::CliConfig;
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, global_client: Option<&str>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            name,
            default_player,
            max_attempts,
            retry_backoff_ms,
            no_activate,
        } => {
            let mut config = CliConfig::load().map_err(CliError::Config)?;
            let client_name = apply_config_init(
                &mut config,
                name.as_deref().or(global_client),
                ClientSettings {
                    default_player,
                    max_attempts,
                    retry_backoff_ms,
                },
                no_activate,
            )?;
            let path = config.save().map_err(CliError::Config)?;

            println!("Saved API client '{client_name}' to {}", path.display());
            if config.active_client.as_deref() == Some(client_name.as_str()) {
                println!("Active API client: {client_name}");
            }
            Ok(())
        }
        ConfigCommands::Show => {
            let config = CliConfig::load().map_err(CliError::Config)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

/// Values given to `config init`, each left alone when absent
#[derive(Debug, Default)]
pub struct ClientSettings {
    pub default_player: Option<String>,
    pub max_attempts: Option<usize>,
    pub retry_backoff_ms: Option<u64>,
}

/// Merge `settings` into the named client and return its name
pub fn apply_config_init(
    config: &mut CliConfig,
    client_name: Option<&str>,
    settings: ClientSettings,
    no_activate: bool,
) -> Result<String, CliError> {
    let client_name = config
        .resolve_client_name(client_name)
        .ok_or(CliError::NoClient)?;

    if settings.max_attempts == Some(0) {
        return Err(CliError::Config(
            "max attempts must be at least 1".to_string(),
        ));
    }

    let client = config.client_mut_or_default(&client_name);
    if let Some(default_player) = normalize_text_option(settings.default_player) {
        client.default_player = Some(default_player);
    }

    if let Some(max_attempts) = settings.max_attempts {
        config.sync.max_attempts = max_attempts;
    }
    if let Some(retry_backoff_ms) = settings.retry_backoff_ms {
        config.sync.retry_backoff_ms = retry_backoff_ms;
    }

    if !no_activate || config.active_client.is_none() {
        config.active_client = Some(client_name.clone());
    }

    Ok(client_name)
}
