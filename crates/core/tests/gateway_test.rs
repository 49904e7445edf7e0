// Gateway behaviour and the role APIs built on it

mod common;

use campus_portal_core::api::{
    AdminApi, CommonApi, DocumentType, DocumentUpload, FacultyApi, FileUpload, ScheduleQuery,
    ScheduleUpload, StudentApi,
};
use campus_portal_core::{GatewayError, Identity, PortalError, Role, SessionState};
use common::{harness, mint_token, Harness};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn sign_in(h: &Harness, email: &str, role: Role) -> String {
    let token = mint_token(email, Some(role.as_str()));
    h.context
        .establish(Identity::new(email, role), token.clone())
        .unwrap();
    token
}

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let h = harness().await;
    let token = sign_in(&h, "s@uni.edu", Role::Student);

    Mock::given(method("GET"))
        .and(path("/student/profile"))
        .and(header("Authorization", format!("Bearer {}", token).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rno": "21B01A0501",
            "email": "s@uni.edu",
            "firstname": "Asha",
            "smobile": 9876543210i64,
            "permanantAddress": "Hyderabad"
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let profile = StudentApi::new(&h.gateway).profile().await.unwrap();

    assert_eq!(profile.firstname.as_deref(), Some("Asha"));
    assert_eq!(profile.permanant_address.as_deref(), Some("Hyderabad"));
    assert_eq!(profile.smobile, Some(9876543210));
    assert!(profile.lastname.is_none());
}

#[tokio::test]
async fn test_anonymous_requests_carry_no_credentials() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/comm/get/notices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&h.server)
        .await;

    let notices = CommonApi::new(&h.gateway).notices().await.unwrap();
    assert!(notices.is_empty());

    let requests = h.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_any_401_forces_logout() {
    let h = harness().await;
    sign_in(&h, "f@uni.edu", Role::Faculty);
    h.router.open(&h.context.session(), "/faculty/profile");
    assert_eq!(h.router.location(), "/faculty/profile");

    Mock::given(method("GET"))
        .and(path("/faculty/profile"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Token expired"))
        .mount(&h.server)
        .await;

    let err = FacultyApi::new(&h.gateway).profile().await.unwrap_err();

    assert!(err.is_session_expired());
    assert!(matches!(
        &err,
        PortalError::Gateway(GatewayError::Unauthorized { message }) if message == "Token expired"
    ));
    assert_eq!(h.context.state(), SessionState::Anonymous);
    assert!(h.storage.is_empty());
    assert_eq!(h.router.location(), "/login");
}

#[tokio::test]
async fn test_other_errors_pass_through() {
    let h = harness().await;
    sign_in(&h, "s@uni.edu", Role::Student);

    Mock::given(method("GET"))
        .and(path("/student/academics"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&h.server)
        .await;

    let err = StudentApi::new(&h.gateway).academics().await.unwrap_err();

    assert!(matches!(
        &err,
        PortalError::Gateway(GatewayError::Api { status: 500, message }) if message == "database unavailable"
    ));
    assert_eq!(h.context.state(), SessionState::Authenticated);
    assert!(!h.storage.is_empty());
}

#[tokio::test]
async fn test_forbidden_is_not_a_logout() {
    let h = harness().await;
    sign_in(&h, "s@uni.edu", Role::Student);

    Mock::given(method("POST"))
        .and(path("/admin/promote/2021"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&h.server)
        .await;

    let err = AdminApi::new(&h.gateway).promote_batch("2021").await.unwrap_err();

    assert!(matches!(
        err,
        PortalError::Gateway(GatewayError::Api { status: 403, .. })
    ));
    assert!(h.context.is_authenticated());
}

#[tokio::test]
async fn test_unexpected_body_is_decode_error() {
    let h = harness().await;
    sign_in(&h, "s@uni.edu", Role::Student);

    Mock::given(method("GET"))
        .and(path("/student/get/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&h.server)
        .await;

    let err = StudentApi::new(&h.gateway).documents().await.unwrap_err();
    assert!(matches!(err, PortalError::Gateway(GatewayError::Decode(_))));
}

#[tokio::test]
async fn test_results_for_semester() {
    let h = harness().await;
    sign_in(&h, "s@uni.edu", Role::Student);

    Mock::given(method("GET"))
        .and(path("/student/internalmarks/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "semester": 3,
            "subjectName": "Operating Systems",
            "seminar1": 4, "openbook1": 5, "descriptive1": 9, "objective1": 8,
            "seminar2": 5, "openbook2": 4, "descriptive2": 10, "objective2": 9,
            "total1": 26, "total2": 28, "finalInternalMarks": 27.5
        }])))
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/student/externalmarks/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "srno": "21B01A0501",
            "subjectName": "Operating Systems",
            "semester": 3,
            "year": 2,
            "total": 71,
            "grade": "A",
            "finalGrade": "A"
        }])))
        .mount(&h.server)
        .await;

    let api = StudentApi::new(&h.gateway);
    let internal = api.internal_marks(3).await.unwrap();
    let external = api.external_marks(3).await.unwrap();

    assert_eq!(internal[0].subject_name, "Operating Systems");
    assert_eq!(internal[0].final_internal_marks, 27.5);
    assert_eq!(external[0].final_grade, "A");
}

#[tokio::test]
async fn test_schedule_download_sends_class_query() {
    let h = harness().await;
    sign_in(&h, "s@uni.edu", Role::Student);

    Mock::given(method("GET"))
        .and(path("/student/schedule/view"))
        .and(query_param("branch", "CSE"))
        .and(query_param("year", "3"))
        .and(query_param("semester", "2"))
        .and(query_param("section", "A"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.7".to_vec()))
        .expect(1)
        .mount(&h.server)
        .await;

    let query = ScheduleQuery {
        branch: "CSE".to_string(),
        year: 3,
        semester: 2,
        section: "A".to_string(),
    };
    let bytes = StudentApi::new(&h.gateway).view_schedule(&query).await.unwrap();
    assert_eq!(bytes, b"%PDF-1.7");
}

#[tokio::test]
async fn test_document_upload_is_multipart() {
    let h = harness().await;
    sign_in(&h, "s@uni.edu", Role::Student);

    Mock::given(method("POST"))
        .and(path("/student/upload/document"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Document uploaded"))
        .mount(&h.server)
        .await;

    let message = StudentApi::new(&h.gateway)
        .upload_document(DocumentUpload {
            document_type: DocumentType::Pan,
            title: "PAN card".to_string(),
            file: FileUpload::new("pan.pdf", b"%PDF".to_vec()),
        })
        .await
        .unwrap();
    assert_eq!(message, "Document uploaded");

    let requests = h.server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"documenttype\""));
    assert!(body.contains("PAN"));
    assert!(body.contains("filename=\"pan.pdf\""));
}

#[tokio::test]
async fn test_upload_users_sends_role() {
    let h = harness().await;
    sign_in(&h, "admin@uni.edu", Role::Admin);

    Mock::given(method("POST"))
        .and(path("/admin/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_string("12 users created"))
        .mount(&h.server)
        .await;

    let message = AdminApi::new(&h.gateway)
        .upload_users(FileUpload::new("faculty.xlsx", vec![1, 2, 3]), Role::Faculty)
        .await
        .unwrap();
    assert_eq!(message, "12 users created");

    let requests = h.server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"role\""));
    assert!(body.contains("FACULTY"));
    assert!(body.contains("filename=\"faculty.xlsx\""));
}

#[tokio::test]
async fn test_blank_fields_rejected_before_sending() {
    let h = harness().await;
    sign_in(&h, "admin@uni.edu", Role::Admin);

    let schedule = ScheduleUpload {
        branch: "CSE".to_string(),
        year: 3,
        semester: 2,
        section: "A".to_string(),
        title: "  ".to_string(),
    };
    let err = AdminApi::new(&h.gateway)
        .upload_schedule(&schedule, FileUpload::new("tt.pdf", vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, PortalError::Validation(_)));

    let err = CommonApi::new(&h.gateway)
        .post_notice("Exam dates", "", FileUpload::new("n.pdf", vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, PortalError::Validation(_)));

    let requests = h.server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_notice_attachment_download() {
    let h = harness().await;
    sign_in(&h, "f@uni.edu", Role::Faculty);

    Mock::given(method("GET"))
        .and(path("/comm/notice/7/view"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xde, 0xad]))
        .mount(&h.server)
        .await;

    let bytes = CommonApi::new(&h.gateway).view_notice(7).await.unwrap();
    assert_eq!(bytes, vec![0xde, 0xad]);
}

#[tokio::test]
async fn test_promote_batch_stays_one_path_segment() {
    let h = harness().await;
    sign_in(&h, "admin@uni.edu", Role::Admin);

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Promoted"))
        .mount(&h.server)
        .await;

    AdminApi::new(&h.gateway)
        .promote_batch("2021/x")
        .await
        .unwrap();

    let requests = h.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/admin/promote/2021%2Fx");
}
