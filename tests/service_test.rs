use std::{io::Cursor, path::Path};

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use base64::Engine as _;
use image::{ImageFormat, Rgb, RgbImage};
use pagesmith::{
    configuration::ServiceConfiguration,
    pdf::{PageSize, PdfDocument},
    server::{self, MERGE_CONFIRMATION, MULTIPAGE_CONFIRMATION, TEMPLATE_CONFIRMATION},
};
use tower::ServiceExt as _;

fn write_blank_document(path: &Path, page_count: usize) {
    let mut pdf_document = PdfDocument::new("blank");
    for _ in 0..page_count {
        pdf_document.add_page(PageSize::A4).unwrap();
    }
    pdf_document.save(path).unwrap();
}

fn write_signature(path: &Path) {
    let signature = RgbImage::from_pixel(8, 4, Rgb([0, 0, 255]));
    let mut jpeg_bytes = Cursor::new(Vec::new());
    signature.write_to(&mut jpeg_bytes, ImageFormat::Jpeg).unwrap();
    let encoded_signature =
        base64::engine::general_purpose::STANDARD.encode(jpeg_bytes.into_inner());
    std::fs::write(path, format!("{encoded_signature}\n")).unwrap();
}

/// A configuration whose resources and output directory all live in the given directory.
fn configuration_in(directory: &Path) -> ServiceConfiguration {
    let configuration = ServiceConfiguration {
        output_directory: directory.join("output"),
        template_path: directory.join("template.pdf"),
        term_path: directory.join("termo.pdf"),
        signature_path: directory.join("assinatura-base64.txt"),
        report_rows: 50,
        ..Default::default()
    };
    std::fs::create_dir_all(&configuration.output_directory).unwrap();
    write_blank_document(&configuration.template_path, 1);
    write_blank_document(&configuration.term_path, 2);
    write_signature(&configuration.signature_path);

    configuration
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn json_request(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_check_answers_ok() {
    let directory = tempfile::tempdir().unwrap();
    let router = server::build_router(configuration_in(directory.path()));

    let (status, body) = send(&router, get_request("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn text_report_is_written_for_the_cpf() {
    let directory = tempfile::tempdir().unwrap();
    let configuration = configuration_in(directory.path());
    let output_path = configuration.output_path("text-12345678900.pdf");
    let router = server::build_router(configuration);

    let (status, body) = send(
        &router,
        json_request(
            "/pdf/text",
            r#"{ "cpf": "12345678900", "nome": "Ana", "data": "2024-01-01", "status": "ativo" }"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    similar_asserts::assert_eq!(body, "PDF com texto gerado!");
    let text_report = PdfDocument::load(&output_path).unwrap();
    assert_eq!(text_report.page_count(), 1);
}

#[tokio::test]
async fn filled_template_is_merged_with_the_term() {
    let directory = tempfile::tempdir().unwrap();
    let configuration = configuration_in(directory.path());
    let filled_template_path = configuration.output_path("template-output-123.pdf");
    let merged_path = configuration.output_path("merged-123.pdf");
    let router = server::build_router(configuration);

    let (status, body) = send(
        &router,
        json_request(
            "/pdf/template",
            r#"{ "cpf": "123", "nome": "Ana", "dataNascimento": "01/01/1990" }"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, TEMPLATE_CONFIRMATION);
    let filled_template = PdfDocument::load(&filled_template_path).unwrap();
    let overlay_operations = filled_template
        .page_operations(filled_template.page_ids()[0])
        .unwrap();
    assert!(overlay_operations
        .iter()
        .any(|operation| operation.operator == "Do"));

    let (status, body) = send(&router, get_request("/pdf/merge?cpf=123")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, MERGE_CONFIRMATION);
    let merged_document = PdfDocument::load(&merged_path).unwrap();
    assert_eq!(merged_document.page_count(), 3);
}

#[tokio::test]
async fn multipage_report_is_written_to_the_output_directory() {
    let directory = tempfile::tempdir().unwrap();
    let configuration = configuration_in(directory.path());
    let output_directory = configuration.output_directory.clone();
    let router = server::build_router(configuration);

    let (status, body) = send(&router, get_request("/pdf/multipage")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, MULTIPAGE_CONFIRMATION);
    let report_paths = std::fs::read_dir(&output_directory)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            path.file_name()
                .and_then(|file_name| file_name.to_str())
                .is_some_and(|file_name| file_name.starts_with("multipage-"))
        })
        .collect::<Vec<_>>();
    assert_eq!(report_paths.len(), 1);
    // 50 rows fit on two A4 pages
    assert_eq!(PdfDocument::load(&report_paths[0]).unwrap().page_count(), 2);
}

#[tokio::test]
async fn failures_are_confirmed_unless_reported() {
    let directory = tempfile::tempdir().unwrap();
    let mut configuration = configuration_in(directory.path());
    configuration.template_path = directory.path().join("missing.pdf");

    let router = server::build_router(configuration.clone());
    let (status, body) = send(&router, json_request("/pdf/template", r#"{ "cpf": "1" }"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, TEMPLATE_CONFIRMATION);
    assert!(!configuration
        .output_path("template-output-1.pdf")
        .exists());

    configuration.report_failures = true;
    let router = server::build_router(configuration);
    let (status, body) = send(&router, json_request("/pdf/template", r#"{ "cpf": "1" }"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("missing.pdf"));
}

#[tokio::test]
async fn identifiers_leaving_the_output_directory_are_refused() {
    let directory = tempfile::tempdir().unwrap();
    let mut configuration = configuration_in(directory.path());
    configuration.report_failures = true;
    std::fs::create_dir_all(configuration.output_path("text-..")).unwrap();
    // "text-../../escaped.pdf" resolves through that directory
    let escaped_path = configuration.output_path("escaped.pdf");
    let router = server::build_router(configuration);

    let (status, body) = send(
        &router,
        json_request("/pdf/text", r#"{ "cpf": "../../escaped" }"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("file name"));
    assert!(!escaped_path.exists());
}

#[tokio::test]
async fn non_string_fields_are_rejected() {
    let directory = tempfile::tempdir().unwrap();
    let router = server::build_router(configuration_in(directory.path()));

    let (status, _) = send(&router, json_request("/pdf/text", r#"{ "cpf": 123 }"#)).await;

    assert!(status.is_client_error());
}
