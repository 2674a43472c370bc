//! Provider configuration display

use anyhow::Result;

use arth_core::ai::ProviderTransport;
use arth_core::config::{default_config_path, API_KEY_ENV};
use arth_core::{Credential, ProviderClient, ProviderConfig};

pub fn cmd_config() -> Result<()> {
    let config = ProviderConfig::load()?;
    print!(
        "{}",
        render_config(&config, &ProviderClient::from_env(&config), &Credential::from_env())
    );
    Ok(())
}

/// Describe the resolved configuration; the key itself is never shown
pub fn render_config(
    config: &ProviderConfig,
    client: &ProviderClient,
    credential: &Credential,
) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str("⚙️  Provider configuration\n");
    out.push_str("   ─────────────────────────────\n");
    out.push_str(&format!("   Provider: {}\n", client.backend_name()));
    out.push_str(&format!("   Host:     {}\n", config.host));
    out.push_str(&format!("   Model:    {}\n", client.model()));

    let key_status = if credential.is_configured() {
        "set"
    } else {
        "NOT SET"
    };
    out.push_str(&format!("   API key:  {} ({})\n", key_status, API_KEY_ENV));

    if let Some(path) = default_config_path() {
        let note = if path.exists() { "" } else { " (not present)" };
        out.push_str(&format!("   Override: {}{}\n", path.display(), note));
    }

    out
}
