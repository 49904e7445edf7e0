// Notice board commands

use std::path::PathBuf;

use anyhow::Result;
use campus_portal_core::api::{CommonApi, FileUpload};
use clap::Subcommand;

use super::App;
use crate::output::{print_table_header, print_table_row, write_download};

#[derive(Subcommand)]
pub enum NoticesCommand {
    /// List notices
    List,

    /// Post a notice with an attachment (admin only)
    Post {
        #[arg(long)]
        title: String,

        #[arg(long, short)]
        description: String,

        /// Attachment
        #[arg(long, short)]
        file: PathBuf,
    },

    /// Download a notice attachment
    View {
        /// Notice ID
        #[arg(long)]
        id: i64,

        /// Where to write the file
        #[arg(long)]
        out: PathBuf,
    },
}

pub async fn run(command: NoticesCommand, app: &App) -> Result<()> {
    let api = CommonApi::new(&app.gateway);

    match command {
        NoticesCommand::List => {
            app.require_signed_in()?;
            let notices = api.notices().await?;
            if !app.output.is_text() {
                return app.output.print_value(&notices);
            }
            if notices.is_empty() {
                println!("No notices");
                return Ok(());
            }

            print_table_header(&[("ID", 6), ("TITLE", 28), ("POSTED", 20), ("DESCRIPTION", 40)]);
            for notice in &notices {
                print_table_row(&[
                    (&notice.notice_id.to_string(), 6),
                    (&notice.title, 28),
                    (&notice.posted_at, 20),
                    (&notice.description, 40),
                ]);
            }
            Ok(())
        }
        NoticesCommand::Post {
            title,
            description,
            file,
        } => {
            app.require_page("/admin/notices")?;
            let message = api
                .post_notice(&title, &description, FileUpload::from_path(&file)?)
                .await?;
            if !app.quiet {
                println!("{}", if message.is_empty() { "Notice posted" } else { message.as_str() });
            }
            Ok(())
        }
        NoticesCommand::View { id, out } => {
            app.require_signed_in()?;
            let bytes = api.view_notice(id).await?;
            write_download(&out, &bytes, app.quiet)
        }
    }
}
