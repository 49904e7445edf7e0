// Portal API data transfer objects
//
// Field names follow the server's JSON (mostly lowercase, some camelCase).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{PortalError, Result};

/// Student profile, all fields optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rno: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fathername: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mothername: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub religion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caste: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smobile: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fmobile: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bloodgroup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mothertongue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub martialstatus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permanant_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub present_address: Option<String>,
}

impl StudentProfile {
    /// Set a field by its JSON name
    pub fn set(&mut self, field: &str, value: &str) -> Result<()> {
        let text = Some(value.to_string());
        match field {
            "rno" => self.rno = text,
            "email" => self.email = text,
            "firstname" => self.firstname = text,
            "lastname" => self.lastname = text,
            "fathername" => self.fathername = text,
            "mothername" => self.mothername = text,
            "religion" => self.religion = text,
            "caste" => self.caste = text,
            "smobile" => self.smobile = Some(parse_number(field, value)?),
            "fmobile" => self.fmobile = Some(parse_number(field, value)?),
            "bloodgroup" => self.bloodgroup = text,
            "mothertongue" => self.mothertongue = text,
            "martialstatus" => self.martialstatus = text,
            "permanantAddress" => self.permanant_address = text,
            "presentAddress" => self.present_address = text,
            _ => return Err(unknown_field("student profile", field)),
        }
        Ok(())
    }
}

/// Faculty profile, all fields optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacultyProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workexperience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub martialstatus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bloodgroup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contactemail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<i64>,
}

impl FacultyProfile {
    /// Set a field by its JSON name
    pub fn set(&mut self, field: &str, value: &str) -> Result<()> {
        let text = Some(value.to_string());
        match field {
            "email" => self.email = text,
            "firstname" => self.firstname = text,
            "lastname" => self.lastname = text,
            "username" => self.username = text,
            "gender" => self.gender = text,
            "branch" => self.branch = text,
            "position" => self.position = text,
            "address" => self.address = text,
            "workexperience" => self.workexperience = text,
            "about" => self.about = text,
            "martialstatus" => self.martialstatus = text,
            "bloodgroup" => self.bloodgroup = text,
            "contactemail" => self.contactemail = text,
            "mobile" => self.mobile = Some(parse_number(field, value)?),
            _ => return Err(unknown_field("faculty profile", field)),
        }
        Ok(())
    }
}

fn parse_number(field: &str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| PortalError::validation(format!("{} must be a number, got '{}'", field, value)))
}

fn unknown_field(what: &str, field: &str) -> PortalError {
    PortalError::validation(format!("unknown {} field '{}'", what, field))
}

/// Enrollment record of a student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicRecord {
    pub srno: String,
    pub branch: String,
    pub batch: String,
    pub course: String,
    pub year: u32,
    pub semester: u32,
    pub section: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub admission_date: String,
    pub status: String,
}

/// Internal examination marks for one subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalResult {
    pub semester: u32,
    pub subject_name: String,
    pub seminar1: f64,
    pub openbook1: f64,
    pub descriptive1: f64,
    pub objective1: f64,
    pub seminar2: f64,
    pub openbook2: f64,
    pub descriptive2: f64,
    pub objective2: f64,
    pub total1: f64,
    pub total2: f64,
    pub final_internal_marks: f64,
}

/// External examination result for one subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalResult {
    pub srno: String,
    pub subject_name: String,
    pub semester: u32,
    pub year: u32,
    pub total: f64,
    pub grade: String,
    pub final_grade: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub notice_id: i64,
    pub title: String,
    pub description: String,
    pub posted_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDocument {
    pub document_id: i64,
    pub document_type: String,
    pub title: String,
    pub original_filename: String,
    pub uploaded_at: String,
}

/// Kinds of document a student may upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Aadhar,
    Pan,
    Passport,
    SscCertificate,
    InterCertificate,
    DegreeCertificate,
    Other,
}

impl DocumentType {
    pub const ALL: [DocumentType; 7] = [
        DocumentType::Aadhar,
        DocumentType::Pan,
        DocumentType::Passport,
        DocumentType::SscCertificate,
        DocumentType::InterCertificate,
        DocumentType::DegreeCertificate,
        DocumentType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Aadhar => "AADHAR",
            DocumentType::Pan => "PAN",
            DocumentType::Passport => "PASSPORT",
            DocumentType::SscCertificate => "SSC_CERTIFICATE",
            DocumentType::InterCertificate => "INTER_CERTIFICATE",
            DocumentType::DegreeCertificate => "DEGREE_CERTIFICATE",
            DocumentType::Other => "OTHER",
        }
    }

    /// Name accepted on the command line without the `_CERTIFICATE` suffix
    pub fn short_name(&self) -> &'static str {
        let name = self.as_str();
        name.strip_suffix("_CERTIFICATE").unwrap_or(name)
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        DocumentType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted || t.short_name() == wanted)
            .ok_or_else(|| PortalError::validation(format!("unknown document type '{}'", s)))
    }
}

/// Class whose timetable is requested
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleQuery {
    pub branch: String,
    pub year: u32,
    pub semester: u32,
    pub section: String,
}

impl From<&AcademicRecord> for ScheduleQuery {
    fn from(record: &AcademicRecord) -> Self {
        Self {
            branch: record.branch.clone(),
            year: record.year,
            semester: record.semester,
            section: record.section.clone(),
        }
    }
}

/// Metadata sent alongside a timetable upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleUpload {
    pub branch: String,
    pub year: u32,
    pub semester: u32,
    pub section: String,
    pub title: String,
}
