// Faculty dashboard commands

use anyhow::Result;
use campus_portal_core::api::FacultyApi;
use clap::Subcommand;

use super::{parse_key_val, App};
use crate::output::print_opt_field;

#[derive(Subcommand)]
pub enum FacultyCommand {
    /// Show the faculty profile
    Profile,

    /// Update profile fields
    EditProfile {
        /// Field to set, e.g. --field position=Professor (repeatable)
        #[arg(long, short, value_parser = parse_key_val, required = true)]
        field: Vec<(String, String)>,
    },
}

pub async fn run(command: FacultyCommand, app: &App) -> Result<()> {
    app.require_page("/faculty/profile")?;
    let api = FacultyApi::new(&app.gateway);

    match command {
        FacultyCommand::Profile => {
            let profile = api.profile().await?;
            if !app.output.is_text() {
                return app.output.print_value(&profile);
            }

            print_opt_field("Email", profile.email.as_deref());
            print_opt_field("Username", profile.username.as_deref());
            print_opt_field("First name", profile.firstname.as_deref());
            print_opt_field("Last name", profile.lastname.as_deref());
            print_opt_field("Gender", profile.gender.as_deref());
            print_opt_field("Branch", profile.branch.as_deref());
            print_opt_field("Position", profile.position.as_deref());
            print_opt_field("Experience", profile.workexperience.as_deref());
            print_opt_field("Contact email", profile.contactemail.as_deref());
            print_opt_field("Mobile", profile.mobile);
            print_opt_field("Blood group", profile.bloodgroup.as_deref());
            print_opt_field("Marital status", profile.martialstatus.as_deref());
            print_opt_field("Address", profile.address.as_deref());
            print_opt_field("About", profile.about.as_deref());
            Ok(())
        }
        FacultyCommand::EditProfile { field } => {
            let mut profile = api.profile().await?;
            for (key, value) in &field {
                profile.set(key, value)?;
            }
            let message = api.edit_profile(&profile).await?;
            if !app.quiet {
                println!("{}", if message.is_empty() { "Profile updated" } else { message.as_str() });
            }
            Ok(())
        }
    }
}
