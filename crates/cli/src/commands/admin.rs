// Admin dashboard commands

use std::path::PathBuf;

use anyhow::Result;
use campus_portal_core::api::{AdminApi, FileUpload, ScheduleUpload};
use campus_portal_core::Role;
use clap::Subcommand;

use super::App;

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Bulk-create accounts from a spreadsheet
    UploadUsers {
        /// Spreadsheet of users
        #[arg(long, short)]
        file: PathBuf,

        /// Role given to every created account
        #[arg(long, short)]
        role: Role,
    },

    /// Upload academic records
    UploadAcademics {
        #[arg(long, short)]
        file: PathBuf,
    },

    /// Promote a batch to the next semester
    Promote {
        /// Batch, e.g. 2021
        batch: String,
    },

    /// Upload the detained students list
    DetainedList {
        #[arg(long, short)]
        file: PathBuf,
    },

    /// Upload internal marks
    InternalMarks {
        #[arg(long, short)]
        file: PathBuf,
    },

    /// Upload external results
    ExternalMarks {
        #[arg(long, short)]
        file: PathBuf,
    },

    /// Upload a class timetable
    Schedule {
        #[arg(long)]
        branch: String,

        #[arg(long)]
        year: u32,

        #[arg(long)]
        semester: u32,

        #[arg(long)]
        section: String,

        #[arg(long)]
        title: String,

        /// Timetable file
        #[arg(long, short)]
        file: PathBuf,
    },
}

pub async fn run(command: AdminCommand, app: &App) -> Result<()> {
    let api = AdminApi::new(&app.gateway);

    let message = match command {
        AdminCommand::UploadUsers { file, role } => {
            app.require_page("/admin/users")?;
            api.upload_users(FileUpload::from_path(&file)?, role).await?
        }
        AdminCommand::UploadAcademics { file } => {
            app.require_page("/admin/academics")?;
            api.upload_academics(FileUpload::from_path(&file)?).await?
        }
        AdminCommand::Promote { batch } => {
            app.require_page("/admin/academics")?;
            api.promote_batch(&batch).await?
        }
        AdminCommand::DetainedList { file } => {
            app.require_page("/admin/academics")?;
            api.upload_detained_list(FileUpload::from_path(&file)?).await?
        }
        AdminCommand::InternalMarks { file } => {
            app.require_page("/admin/marks")?;
            api.upload_internal_marks(FileUpload::from_path(&file)?).await?
        }
        AdminCommand::ExternalMarks { file } => {
            app.require_page("/admin/marks")?;
            api.upload_external_marks(FileUpload::from_path(&file)?).await?
        }
        AdminCommand::Schedule {
            branch,
            year,
            semester,
            section,
            title,
            file,
        } => {
            app.require_page("/admin/schedule")?;
            let schedule = ScheduleUpload {
                branch,
                year,
                semester,
                section,
                title,
            };
            api.upload_schedule(&schedule, FileUpload::from_path(&file)?).await?
        }
    };

    if !app.quiet {
        println!("{}", if message.is_empty() { "Done" } else { message.as_str() });
    }
    Ok(())
}
