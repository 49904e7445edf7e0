// Typed wrappers over the portal REST API, one per role

pub mod admin;
pub mod common;
pub mod faculty;
pub mod models;
pub mod student;
pub mod upload;

pub use admin::AdminApi;
pub use common::CommonApi;
pub use faculty::FacultyApi;
pub use models::{
    AcademicRecord, DocumentType, ExternalResult, FacultyProfile, InternalResult, Notice,
    ScheduleQuery, ScheduleUpload, StudentDocument, StudentProfile,
};
pub use student::{DocumentUpload, StudentApi};
pub use upload::FileUpload;
