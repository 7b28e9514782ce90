pub mod chat;
pub mod learning;
pub mod navigation;
pub mod session;
pub mod wellness;

#[cfg(test)]
mod test_support;

use anyhow::{Context, Result, bail};
use talentdesk_application::Portal;
use talentdesk_core::session::UserIdentity;

/// Identity of the logged-in user.
///
/// Only the credential survives a restart, so the identity is fetched again
/// when this process has not seen it yet.
pub(crate) async fn current_identity(portal: &Portal) -> Result<UserIdentity> {
    if !portal.auth.is_authenticated() {
        bail!("Not logged in. Run `talentdesk login` first.");
    }
    if let Some(identity) = portal.auth.identity() {
        return Ok(identity);
    }
    match portal
        .auth
        .restore_identity()
        .await
        .context("Failed to fetch the current user")?
    {
        Some(identity) => Ok(identity),
        None => bail!("Not logged in. Run `talentdesk login` first."),
    }
}

pub(crate) async fn current_user_id(portal: &Portal) -> Result<i64> {
    match current_identity(portal).await?.user_id {
        Some(id) => Ok(id),
        None => bail!("The current user record carries no id"),
    }
}
