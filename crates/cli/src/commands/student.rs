// Student dashboard commands

use std::path::PathBuf;

use anyhow::Result;
use campus_portal_core::api::{DocumentType, DocumentUpload, FileUpload, ScheduleQuery, StudentApi};
use clap::Subcommand;
use serde::Serialize;

use super::{parse_key_val, App};
use crate::output::{
    print_field, print_opt_field, print_table_header, print_table_row, write_download,
};

#[derive(Subcommand)]
pub enum StudentCommand {
    /// Show the student's profile
    Profile,

    /// Update profile fields
    EditProfile {
        /// Field to set, e.g. --field firstname=Asha (repeatable)
        #[arg(long, short, value_parser = parse_key_val, required = true)]
        field: Vec<(String, String)>,
    },

    /// Show the enrollment record
    Academics,

    /// Show internal and external results for a semester
    Results {
        /// Semester number
        #[arg(long, short)]
        semester: u32,
    },

    /// List uploaded documents
    Documents,

    /// Upload a personal document
    UploadDocument {
        /// Document type: AADHAR, PAN, PASSPORT, SSC, INTER, DEGREE or OTHER
        /// (the full names such as SSC_CERTIFICATE also work)
        #[arg(long = "type", short = 't')]
        document_type: DocumentType,

        /// Document title
        #[arg(long)]
        title: String,

        /// File to upload
        #[arg(long, short)]
        file: PathBuf,
    },

    /// Download an uploaded document
    ViewDocument {
        /// Document ID
        #[arg(long)]
        id: i64,

        /// Where to write the file
        #[arg(long)]
        out: PathBuf,
    },

    /// Download the class timetable
    Schedule {
        /// Where to write the file
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Serialize)]
struct Results<T: Serialize, U: Serialize> {
    semester: u32,
    internal: T,
    external: U,
}

pub async fn run(command: StudentCommand, app: &App) -> Result<()> {
    let api = StudentApi::new(&app.gateway);
    match command {
        StudentCommand::Profile => profile(app, &api).await,
        StudentCommand::EditProfile { field } => edit_profile(app, &api, field).await,
        StudentCommand::Academics => academics(app, &api).await,
        StudentCommand::Results { semester } => results(app, &api, semester).await,
        StudentCommand::Documents => documents(app, &api).await,
        StudentCommand::UploadDocument {
            document_type,
            title,
            file,
        } => upload_document(app, &api, document_type, title, file).await,
        StudentCommand::ViewDocument { id, out } => {
            app.require_page("/student/documents")?;
            let bytes = api.view_document(id).await?;
            write_download(&out, &bytes, app.quiet)
        }
        StudentCommand::Schedule { out } => schedule(app, &api, out).await,
    }
}

async fn profile(app: &App, api: &StudentApi<'_>) -> Result<()> {
    app.require_page("/student/profile")?;
    let profile = api.profile().await?;

    if !app.output.is_text() {
        return app.output.print_value(&profile);
    }

    print_opt_field("Roll No", profile.rno.as_deref());
    print_opt_field("Email", profile.email.as_deref());
    print_opt_field("First name", profile.firstname.as_deref());
    print_opt_field("Last name", profile.lastname.as_deref());
    print_opt_field("Father", profile.fathername.as_deref());
    print_opt_field("Mother", profile.mothername.as_deref());
    print_opt_field("Mobile", profile.smobile);
    print_opt_field("Parent mobile", profile.fmobile);
    print_opt_field("Blood group", profile.bloodgroup.as_deref());
    print_opt_field("Mother tongue", profile.mothertongue.as_deref());
    print_opt_field("Religion", profile.religion.as_deref());
    print_opt_field("Caste", profile.caste.as_deref());
    print_opt_field("Marital status", profile.martialstatus.as_deref());
    print_opt_field("Present addr", profile.present_address.as_deref());
    print_opt_field("Permanent addr", profile.permanant_address.as_deref());
    Ok(())
}

async fn edit_profile(app: &App, api: &StudentApi<'_>, fields: Vec<(String, String)>) -> Result<()> {
    app.require_page("/student/profile")?;
    let mut profile = api.profile().await?;
    for (key, value) in &fields {
        profile.set(key, value)?;
    }

    let message = api.edit_profile(&profile).await?;
    if !app.quiet {
        println!("{}", if message.is_empty() { "Profile updated" } else { message.as_str() });
    }
    Ok(())
}

async fn academics(app: &App, api: &StudentApi<'_>) -> Result<()> {
    app.require_page("/student/academics")?;
    let record = api.academics().await?;

    if !app.output.is_text() {
        return app.output.print_value(&record);
    }

    print_field("Roll No", &record.srno);
    print_field("Course", &record.course);
    print_field("Branch", &record.branch);
    print_field("Batch", &record.batch);
    print_field("Year", &record.year.to_string());
    print_field("Semester", &record.semester.to_string());
    print_field("Section", &record.section);
    print_field("Type", &record.kind);
    print_field("Admitted", &record.admission_date);
    print_field("Status", &record.status);
    Ok(())
}

async fn results(app: &App, api: &StudentApi<'_>, semester: u32) -> Result<()> {
    app.require_page("/student/results")?;
    let internal = api.internal_marks(semester).await?;
    let external = api.external_marks(semester).await?;

    if !app.output.is_text() {
        return app.output.print_value(&Results {
            semester,
            internal,
            external,
        });
    }

    if internal.is_empty() && external.is_empty() {
        println!("No results published for semester {}", semester);
        return Ok(());
    }

    if !internal.is_empty() {
        println!("Internal marks");
        print_table_header(&[("SUBJECT", 28), ("MID 1", 6), ("MID 2", 6), ("FINAL", 6)]);
        for row in &internal {
            print_table_row(&[
                (&row.subject_name, 28),
                (&row.total1.to_string(), 6),
                (&row.total2.to_string(), 6),
                (&row.final_internal_marks.to_string(), 6),
            ]);
        }
    }

    if !external.is_empty() {
        if !internal.is_empty() {
            println!();
        }
        println!("External results");
        print_table_header(&[("SUBJECT", 28), ("TOTAL", 6), ("GRADE", 6), ("FINAL", 6)]);
        for row in &external {
            print_table_row(&[
                (&row.subject_name, 28),
                (&row.total.to_string(), 6),
                (&row.grade, 6),
                (&row.final_grade, 6),
            ]);
        }
    }
    Ok(())
}

async fn documents(app: &App, api: &StudentApi<'_>) -> Result<()> {
    app.require_page("/student/documents")?;
    let documents = api.documents().await?;

    if !app.output.is_text() {
        return app.output.print_value(&documents);
    }

    if documents.is_empty() {
        println!("No documents uploaded");
        return Ok(());
    }

    print_table_header(&[("ID", 6), ("TYPE", 10), ("TITLE", 24), ("FILE", 24), ("UPLOADED", 20)]);
    for doc in &documents {
        print_table_row(&[
            (&doc.document_id.to_string(), 6),
            (&doc.document_type, 10),
            (&doc.title, 24),
            (&doc.original_filename, 24),
            (&doc.uploaded_at, 20),
        ]);
    }
    Ok(())
}

async fn upload_document(
    app: &App,
    api: &StudentApi<'_>,
    document_type: DocumentType,
    title: String,
    file: PathBuf,
) -> Result<()> {
    app.require_page("/student/documents")?;
    let upload = DocumentUpload {
        document_type,
        title,
        file: FileUpload::from_path(&file)?,
    };

    let message = api.upload_document(upload).await?;
    if !app.quiet {
        println!("{}", if message.is_empty() { "Document uploaded" } else { message.as_str() });
    }
    Ok(())
}

async fn schedule(app: &App, api: &StudentApi<'_>, out: PathBuf) -> Result<()> {
    app.require_page("/student/schedule")?;
    // The timetable is keyed by the student's current class
    let record = api.academics().await?;
    let bytes = api.view_schedule(&ScheduleQuery::from(&record)).await?;
    write_download(&out, &bytes, app.quiet)
}
