use super::current_identity;
use anyhow::{Context, Result};
use talentdesk_application::Portal;
use talentdesk_core::config::ClientConfig;
use talentdesk_core::session::SessionView;
use talentdesk_infrastructure::TalentDeskPaths;

pub async fn login(portal: &Portal, email: &str, password: &str, role: &str) -> Result<()> {
    let payload = portal
        .auth
        .login(email, password, role)
        .await
        .context("Login failed")?;

    let name = payload
        .user
        .as_ref()
        .and_then(|user| user.name.clone())
        .unwrap_or_else(|| email.to_lowercase());
    println!("✅ Logged in as {} ({})", name, role);
    Ok(())
}

pub async fn register(
    portal: &Portal,
    fullname: &str,
    email: &str,
    password: &str,
    role: Option<&str>,
) -> Result<()> {
    portal
        .auth
        .register(fullname, email, password, role)
        .await
        .context("Registration failed")?;

    println!("✅ Account created for {}", email.to_lowercase());
    println!("💡 Next: talentdesk login {} --password <password>", email.to_lowercase());
    Ok(())
}

pub fn logout(portal: &Portal) -> Result<()> {
    portal.auth.logout().context("Failed to clear the stored session")?;
    println!("👋 Logged out");
    Ok(())
}

pub async fn whoami(portal: &Portal, refresh: bool) -> Result<()> {
    if !portal.auth.is_authenticated() {
        println!("Not logged in");
        return Ok(());
    }

    let identity = if refresh {
        portal
            .auth
            .restore_identity()
            .await
            .context("Failed to fetch the current user")?
            .unwrap_or_default()
    } else {
        current_identity(portal).await?
    };

    println!("{}", serde_json::to_string_pretty(&identity)?);
    Ok(())
}

pub fn status(portal: &Portal, config: &ClientConfig) {
    let snapshot = portal.session().snapshot();
    let storage = TalentDeskPaths::storage_file(config.storage_dir.as_deref())
        .map(|path| path.display().to_string())
        .unwrap_or_else(|err| err.to_string());

    println!("📋 TalentDesk status");
    println!("  Backend:       {}", config.api_base_url);
    println!("  Timeout:       {}s", config.timeout_secs);
    println!("  Storage:       {}", storage);
    println!("  Authenticated: {}", snapshot.is_authenticated());
    if let Some(role) = snapshot.role() {
        println!("  Role:          {}", role.as_str());
    }
}
