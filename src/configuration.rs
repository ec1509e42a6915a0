use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ContextError;
use crate::report::TableGeometry;

/// The settings of the service, read from a JSON file. Every entry has a default, so an empty
/// object (or no file at all) yields a working configuration.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceConfiguration {
    /// The socket address the HTTP server binds to.
    pub address: String,
    /// The directory the generated documents are written to.
    pub output_directory: PathBuf,
    /// The template whose first page receives the field overlay.
    pub template_path: PathBuf,
    /// The document appended after the template when merging.
    pub term_path: PathBuf,
    /// A text file holding the base64 encoding of the signature image.
    pub signature_path: PathBuf,
    /// Where each request field is written on the template, in drawing order.
    pub template_fields: Vec<FieldPlacement>,
    /// Lower-left corner of the signature image on the template.
    pub signature_position: [f32; 2],
    /// Number of synthetic transactions of the multi-page report.
    pub report_rows: usize,
    pub report_geometry: TableGeometry,
    /// When set, failed requests answer with an error status instead of the confirmation message.
    pub report_failures: bool,
}

/// The position, in points from the lower-left corner of the page, of one template field.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldPlacement {
    pub field: String,
    pub position: [f32; 2],
}

impl FieldPlacement {
    fn new(field: &str, x: f32, y: f32) -> Self {
        FieldPlacement {
            field: field.into(),
            position: [x, y],
        }
    }
}

impl Default for ServiceConfiguration {
    fn default() -> Self {
        ServiceConfiguration {
            address: "0.0.0.0:8080".into(),
            output_directory: PathBuf::from("output"),
            template_path: PathBuf::from("resources/template.pdf"),
            term_path: PathBuf::from("resources/termo.pdf"),
            signature_path: PathBuf::from("resources/assinatura-base64.txt"),
            template_fields: vec![
                FieldPlacement::new("nome", 100.0, 700.0),
                FieldPlacement::new("cpf", 100.0, 670.0),
                FieldPlacement::new("dataNascimento", 180.0, 640.0),
            ],
            signature_position: [40.0, 510.0],
            report_rows: 200,
            report_geometry: TableGeometry::default(),
            report_failures: false,
        }
    }
}

impl ServiceConfiguration {
    pub fn from_path(configuration_file_path: &Path) -> Result<Self, ContextError> {
        let configuration_file_contents = std::fs::read_to_string(configuration_file_path)
            .map_err(|error| {
                ContextError::with_path(
                    "Failed to read the configuration file",
                    configuration_file_path,
                    &error,
                )
            })?;
        let configuration: ServiceConfiguration =
            serde_json::from_str(&configuration_file_contents).map_err(|error| {
                ContextError::with_path(
                    "Failed to parse the configuration file",
                    configuration_file_path,
                    &error,
                )
            })?;

        Ok(configuration)
    }

    /// The path of a generated document inside the output directory.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_directory.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_entries_take_their_default() {
        let configuration: ServiceConfiguration =
            serde_json::from_str(r#"{ "outputDirectory": "/tmp/reports", "reportRows": 3 }"#)
                .unwrap();

        assert_eq!(configuration.output_directory, PathBuf::from("/tmp/reports"));
        assert_eq!(configuration.report_rows, 3);
        assert_eq!(configuration.signature_position, [40.0, 510.0]);
        assert_eq!(configuration.template_fields.len(), 3);
        assert!(!configuration.report_failures);
    }

    #[test]
    fn template_fields_are_read_in_order() {
        let configuration: ServiceConfiguration = serde_json::from_str(
            r#"{ "templateFields": [
                { "field": "cpf", "position": [10, 20] },
                { "field": "nome", "position": [30.5, 40] }
            ] }"#,
        )
        .unwrap();

        assert_eq!(
            configuration.template_fields,
            vec![
                FieldPlacement::new("cpf", 10.0, 20.0),
                FieldPlacement::new("nome", 30.5, 40.0)
            ]
        );
    }

    #[test]
    fn bundled_configuration_spells_out_the_defaults() {
        let configuration_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("configuration.json");
        let configuration = ServiceConfiguration::from_path(&configuration_path).unwrap();

        assert_eq!(configuration, ServiceConfiguration::default());
    }

    #[test]
    fn unreadable_configuration_reports_the_path() {
        let error = ServiceConfiguration::from_path(Path::new("does/not/exist.json")).unwrap_err();

        assert!(error.context.contains("does/not/exist.json"));
        assert!(error.source_error.is_some());
    }
}
