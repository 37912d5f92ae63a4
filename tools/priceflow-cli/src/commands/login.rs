//! Sign in and out.

use anyhow::{Context as _, Result};
use dialoguer::{Input, Password};

use super::LoginArgs;
use crate::context::Context;

/// Run the login command.
pub async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let email = match args.email {
        Some(email) => email,
        None => Input::<String>::new().with_prompt("Email").interact_text()?,
    };
    let password = match args.password {
        Some(password) => password,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let spinner = ctx.output.spinner("Signing in...");
    let result = ctx.client.login(&email, &password).await;
    spinner.finish_and_clear();
    result.context("Login failed")?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "authenticated": true, "email": email }));
    } else {
        ctx.output.success(&format!("Signed in as {}", email));
    }
    Ok(())
}

/// Run the logout command.
pub async fn logout(ctx: &Context) -> Result<()> {
    if !ctx.session().is_authenticated() {
        ctx.output.info("Not signed in");
        return Ok(());
    }

    let result = ctx.client.logout().await;
    if let Err(e) = result {
        ctx.output.warn(&format!("Backend logout failed: {}", e));
    }

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "authenticated": false }));
    } else {
        ctx.output.success("Signed out");
    }
    Ok(())
}
