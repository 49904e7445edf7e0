// Administrator endpoints
//
// Bulk data arrives as spreadsheets; the server parses them. Each upload
// returns the server's status message.

use reqwest::multipart::Form;

use super::models::ScheduleUpload;
use super::upload::{file_form, require, FileUpload};
use crate::error::Result;
use crate::gateway::HttpGateway;
use crate::role::Role;

pub struct AdminApi<'a> {
    gateway: &'a HttpGateway,
}

impl<'a> AdminApi<'a> {
    pub fn new(gateway: &'a HttpGateway) -> Self {
        Self { gateway }
    }

    /// Create accounts for every row of `file`, all with `role`
    pub async fn upload_users(&self, file: FileUpload, role: Role) -> Result<String> {
        let form = file_form(file)?.text("role", role.as_str());
        Ok(self.gateway.post_multipart("/admin/upload", form).await?)
    }

    pub async fn upload_academics(&self, file: FileUpload) -> Result<String> {
        Ok(self
            .gateway
            .post_multipart("/admin/upload-academics", file_form(file)?)
            .await?)
    }

    /// Move a batch to its next semester. The batch is a single path segment.
    pub async fn promote_batch(&self, batch: &str) -> Result<String> {
        require("batch", batch)?;
        let batch = urlencoding::encode(batch.trim());
        Ok(self
            .gateway
            .post_text(&format!("/admin/promote/{}", batch))
            .await?)
    }

    pub async fn upload_detained_list(&self, file: FileUpload) -> Result<String> {
        Ok(self
            .gateway
            .post_multipart("/admin/update-detainedlist", file_form(file)?)
            .await?)
    }

    pub async fn upload_internal_marks(&self, file: FileUpload) -> Result<String> {
        Ok(self
            .gateway
            .post_multipart("/admin/internalmarks", file_form(file)?)
            .await?)
    }

    pub async fn upload_external_marks(&self, file: FileUpload) -> Result<String> {
        Ok(self
            .gateway
            .post_multipart("/admin/externalmarks", file_form(file)?)
            .await?)
    }

    pub async fn upload_schedule(&self, schedule: &ScheduleUpload, file: FileUpload) -> Result<String> {
        require("branch", &schedule.branch)?;
        require("section", &schedule.section)?;
        require("title", &schedule.title)?;

        let form = Form::new()
            .text("branch", schedule.branch.clone())
            .text("year", schedule.year.to_string())
            .text("semester", schedule.semester.to_string())
            .text("section", schedule.section.clone())
            .text("title", schedule.title.clone())
            .part("file", file.into_part()?);

        Ok(self
            .gateway
            .post_multipart("/admin/upload/schedule", form)
            .await?)
    }
}
