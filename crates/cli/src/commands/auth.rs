// Sign-in and account commands

use anyhow::Result;
use campus_portal_core::Role;
use serde::Serialize;

use super::App;
use crate::output::print_field;

#[derive(Serialize)]
struct WhoAmI<'a> {
    state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    home: Option<&'a str>,
}

pub async fn login(app: &App, email: &str, password: &str) -> Result<()> {
    let identity = app.auth.login(email, password).await?;
    // Land on the role's dashboard like the portal does after sign-in
    app.router.open(&app.context.session(), identity.role.home_path());

    if app.output.is_text() {
        if app.quiet {
            println!("{}", identity.role);
        } else {
            println!("Signed in as {}", identity.email);
            print_field("Role", identity.role.as_str());
            print_field("Dashboard", identity.role.home_path());
        }
    } else {
        app.output.print_value(&identity)?;
    }
    Ok(())
}

pub fn logout(app: &App) -> Result<()> {
    let was_signed_in = app.auth.is_authenticated();
    app.auth.logout();
    if !app.quiet {
        if was_signed_in {
            println!("Signed out");
        } else {
            println!("Not signed in");
        }
    }
    Ok(())
}

pub fn whoami(app: &App) -> Result<()> {
    let identity = app.auth.identity();
    let view = WhoAmI {
        state: app.auth.state().to_string(),
        email: identity.as_ref().map(|i| i.email.as_str()),
        role: identity.as_ref().map(|i| i.role),
        home: identity.as_ref().map(|i| i.role.home_path()),
    };

    if !app.output.is_text() {
        return app.output.print_value(&view);
    }

    match &identity {
        Some(identity) if app.quiet => println!("{}", identity.email),
        Some(identity) => {
            print_field("Email", &identity.email);
            print_field("Role", identity.role.as_str());
            print_field("Dashboard", identity.role.home_path());
        }
        None => println!("Not signed in"),
    }
    Ok(())
}

pub async fn change_password(app: &App, current: &str, new: &str) -> Result<()> {
    app.auth.change_password(current, new).await?;
    if !app.quiet {
        println!("Password changed");
    }
    Ok(())
}

pub async fn signup(app: &App, email: &str, password: &str, role: Role) -> Result<()> {
    let message = app.auth.signup(email, password, role).await?;
    if !app.quiet {
        if message.is_empty() {
            println!("Registered {} as {}", email, role);
        } else {
            println!("{}", message);
        }
    }
    Ok(())
}
