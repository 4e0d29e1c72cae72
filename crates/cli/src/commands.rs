//! Command implementations. Generic commands work for any [`Resource`].

use anyhow::{bail, Result};

use museum_client::{AuthState, PortalContext, Resource};
use museum_core::models::{Account, Artifact, DisplayPosition};
use museum_core::pagination::ListQuery;

use crate::output::{print_done, print_entity, print_page, OutputFormat};

pub async fn login(ctx: &PortalContext, email: &str, password: &str, format: OutputFormat) -> Result<()> {
    let user = ctx.session().login(email, password).await?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&user)?),
        OutputFormat::Text => {
            let portal = if user.is_admin() { "admin" } else { "staff" };
            println!("Logged in as {} ({}, {portal} portal)", user.email, user.role);
        }
    }
    Ok(())
}

pub async fn logout(ctx: &PortalContext, format: OutputFormat) -> Result<()> {
    ctx.session().logout().await?;
    print_done("Logged out", format)
}

pub async fn whoami(ctx: &PortalContext, format: OutputFormat) -> Result<()> {
    if ctx.session().check_auth().await != AuthState::Authenticated {
        bail!("Not logged in. Run `museum login` first.");
    }
    let snapshot = ctx.session().snapshot().await;
    let Some(user) = snapshot.user else {
        bail!("Not logged in. Run `museum login` first.");
    };

    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "user": user,
                "admin": user.is_admin(),
                "expiresAt": snapshot.expires_at,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => {
            println!("{} <{}>", user.id, user.email);
            println!("  role:    {}", user.role);
            println!("  museum:  {}", user.museum_id.as_deref().unwrap_or("-"));
            if let Some(exp) = snapshot.expires_at {
                println!("  expires: {}", exp.to_rfc3339());
            }
        }
    }
    Ok(())
}

/// Warn (but carry on) when no session is stored; the API decides access.
async fn require_session(ctx: &PortalContext) {
    if ctx.session().check_auth().await != AuthState::Authenticated {
        tracing::warn!("No stored session; requests are sent without a token");
    }
}

pub async fn list<E: Resource>(ctx: &PortalContext, query: ListQuery, format: OutputFormat) -> Result<()> {
    require_session(ctx).await;
    let list = ctx.list::<E>(query);
    let state = list.refetch().await;
    if let Some(error) = &state.error {
        bail!("Could not list {} records: {error}", E::KIND);
    }
    print_page(&state, format)
}

pub async fn show<E: Resource>(ctx: &PortalContext, id: &str, format: OutputFormat) -> Result<()> {
    require_session(ctx).await;
    let entity = ctx.resource::<E>().get(id).await?;
    print_entity(&entity, format)
}

pub async fn show_public_artifact(ctx: &PortalContext, id: &str, format: OutputFormat) -> Result<()> {
    let artifact = ctx.resource::<Artifact>().get_public(id).await?;
    print_entity(&artifact, format)
}

pub async fn delete<E: Resource>(ctx: &PortalContext, id: &str, format: OutputFormat) -> Result<()> {
    require_session(ctx).await;
    ctx.resource::<E>().delete(id).await?;
    print_done(&format!("{} {id} deleted", E::KIND), format)
}

pub async fn activate<E: Resource>(ctx: &PortalContext, id: &str, format: OutputFormat) -> Result<()> {
    require_session(ctx).await;
    ctx.resource::<E>().activate(id).await?;
    print_done(&format!("{} {id} activated", E::KIND), format)
}

pub async fn maintain_artifact(ctx: &PortalContext, id: &str, format: OutputFormat) -> Result<()> {
    require_session(ctx).await;
    ctx.resource::<Artifact>().maintain(id).await?;
    print_done(&format!("Artifact {id} is under maintenance"), format)
}

pub async fn maintain_display_position(
    ctx: &PortalContext,
    id: &str,
    format: OutputFormat,
) -> Result<()> {
    require_session(ctx).await;
    ctx.resource::<DisplayPosition>().maintain(id).await?;
    print_done(&format!("Display position {id} is under maintenance"), format)
}

pub async fn assign_museum(
    ctx: &PortalContext,
    account_id: &str,
    museum_id: &str,
    format: OutputFormat,
) -> Result<()> {
    require_session(ctx).await;
    ctx.resource::<Account>().assign_museum(account_id, museum_id).await?;
    print_done(&format!("Account {account_id} assigned to museum {museum_id}"), format)
}
