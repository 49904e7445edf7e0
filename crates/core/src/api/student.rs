// Student endpoints

use reqwest::multipart::Form;

use super::models::{
    AcademicRecord, DocumentType, ExternalResult, InternalResult, ScheduleQuery, StudentDocument,
    StudentProfile,
};
use super::upload::{require, FileUpload};
use crate::error::Result;
use crate::gateway::HttpGateway;

/// Document to attach to the student's record
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub document_type: DocumentType,
    pub title: String,
    pub file: FileUpload,
}

pub struct StudentApi<'a> {
    gateway: &'a HttpGateway,
}

impl<'a> StudentApi<'a> {
    pub fn new(gateway: &'a HttpGateway) -> Self {
        Self { gateway }
    }

    pub async fn profile(&self) -> Result<StudentProfile> {
        Ok(self.gateway.get_json("/student/profile").await?)
    }

    pub async fn edit_profile(&self, profile: &StudentProfile) -> Result<String> {
        Ok(self
            .gateway
            .post_json_text("/student/editprofile", profile)
            .await?)
    }

    pub async fn academics(&self) -> Result<AcademicRecord> {
        Ok(self.gateway.get_json("/student/academics").await?)
    }

    pub async fn internal_marks(&self, semester: u32) -> Result<Vec<InternalResult>> {
        Ok(self
            .gateway
            .get_json(&format!("/student/internalmarks/{}", semester))
            .await?)
    }

    pub async fn external_marks(&self, semester: u32) -> Result<Vec<ExternalResult>> {
        Ok(self
            .gateway
            .get_json(&format!("/student/externalmarks/{}", semester))
            .await?)
    }

    pub async fn upload_document(&self, upload: DocumentUpload) -> Result<String> {
        require("title", &upload.title)?;

        let form = Form::new()
            .text("documenttype", upload.document_type.as_str())
            .text("title", upload.title)
            .part("file", upload.file.into_part()?);

        Ok(self
            .gateway
            .post_multipart("/student/upload/document", form)
            .await?)
    }

    pub async fn documents(&self) -> Result<Vec<StudentDocument>> {
        Ok(self.gateway.get_json("/student/get/documents").await?)
    }

    pub async fn view_document(&self, document_id: i64) -> Result<Vec<u8>> {
        Ok(self
            .gateway
            .get_bytes(&format!("/student/document/{}/view", document_id))
            .await?)
    }

    /// Timetable file for a class
    pub async fn view_schedule(&self, query: &ScheduleQuery) -> Result<Vec<u8>> {
        Ok(self
            .gateway
            .get_bytes_with_query("/student/schedule/view", query)
            .await?)
    }
}
