use std::path::PathBuf;

use crate::configuration::ServiceConfiguration;
use crate::error::ContextError;
use crate::fields::{field_value, file_identifier, RequestFields};
use crate::pdf::{AppendMode, PageSize, PdfDocument, StandardFont};

pub const TEXT_REPORT_TITLE: &str = "Relatório de Atividades";

const TEXT_ORIGIN: [f32; 2] = [50.0, 700.0];
const LEADING: f32 = 20.0;
const TITLE_FONT_SIZE: f32 = 16.0;
const BODY_FONT_SIZE: f32 = 12.0;

/// The labeled lines printed under the title, as pairs of label and request field.
const LABELED_FIELDS: [(&str, &str); 4] = [
    ("Nome", "nome"),
    ("CPF", "cpf"),
    ("Data", "data"),
    ("Status", "status"),
];

/// The lines of the report, in the order they are drawn.
pub fn text_report_lines(fields: &RequestFields) -> Vec<String> {
    std::iter::once(TEXT_REPORT_TITLE.to_string())
        .chain(
            LABELED_FIELDS
                .iter()
                .map(|(label, key)| format!("{label}: {}", field_value(fields, key))),
        )
        .collect()
}

/// Draws the activity report on a single Letter page: a bold title followed by one line per field,
/// all in the same text object and spaced by the leading.
pub fn build_text_report(fields: &RequestFields) -> Result<PdfDocument, ContextError> {
    let cpf = field_value(fields, "cpf");
    let mut pdf_document = PdfDocument::new(&format!("text-{cpf}"));
    let page_id = pdf_document.add_page(PageSize::LETTER)?;

    let mut surface = pdf_document.surface(page_id, AppendMode::Overwrite);
    surface.begin_text();
    surface.set_font(StandardFont::HelveticaBold, TITLE_FONT_SIZE);
    surface.set_leading(LEADING);
    surface.new_line_at_offset(TEXT_ORIGIN[0], TEXT_ORIGIN[1]);

    let lines = text_report_lines(fields);
    for (index, line) in lines.iter().enumerate() {
        if index == 1 {
            surface.set_font(StandardFont::Helvetica, BODY_FONT_SIZE);
        }
        surface.show_text(line);
        if index + 1 < lines.len() {
            surface.new_line();
        }
    }
    surface.end_text();
    surface.finish()?;

    Ok(pdf_document)
}

/// Generates the report and saves it as `text-<cpf>.pdf`, replacing a previous one.
pub fn generate_text_report(
    configuration: &ServiceConfiguration,
    fields: &RequestFields,
) -> Result<PathBuf, ContextError> {
    let cpf = file_identifier(field_value(fields, "cpf"))?;
    let mut pdf_document = build_text_report(fields)?;
    let output_path = configuration.output_path(&format!("text-{cpf}.pdf"));
    pdf_document.save(&output_path)?;

    log::info!("Text report saved to {:?}", output_path);

    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::encode_win_ansi;

    fn fields(pairs: &[(&str, &str)]) -> RequestFields {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), Some(value.to_string())))
            .collect()
    }

    #[test]
    fn lines_are_the_title_and_the_four_labeled_fields() {
        let lines = text_report_lines(&fields(&[
            ("cpf", "123"),
            ("nome", "Ana"),
            ("data", "2024-01-01"),
            ("status", "ok"),
        ]));

        let expected_lines = [
            "Relatório de Atividades",
            "Nome: Ana",
            "CPF: 123",
            "Data: 2024-01-01",
            "Status: ok",
        ]
        .map(String::from);
        similar_asserts::assert_eq!(lines, expected_lines.to_vec());
    }

    #[test]
    fn missing_fields_are_printed_as_null() {
        let lines = text_report_lines(&fields(&[("cpf", "123")]));

        assert_eq!(lines[1], "Nome: null");
        assert_eq!(lines[4], "Status: null");
    }

    #[test]
    fn report_is_a_single_page_with_five_lines_in_order() {
        let mut pdf_document = build_text_report(&fields(&[
            ("cpf", "123"),
            ("nome", "Ana"),
            ("data", "2024-01-01"),
            ("status", "ok"),
        ]))
        .unwrap();
        let bytes = pdf_document.save_to_bytes().unwrap();
        let reloaded = PdfDocument::load_from_bytes(&bytes).unwrap();

        assert_eq!(reloaded.page_count(), 1);
        let operations = reloaded.page_operations(reloaded.page_ids()[0]).unwrap();
        let shown_text = operations
            .iter()
            .filter(|operation| operation.operator == "Tj")
            .map(|operation| operation.operands[0].as_str().unwrap().to_vec())
            .collect::<Vec<_>>();
        let expected_text = [
            "Relatório de Atividades",
            "Nome: Ana",
            "CPF: 123",
            "Data: 2024-01-01",
            "Status: ok",
        ]
        .map(encode_win_ansi);
        assert_eq!(shown_text, expected_text.to_vec());

        let new_lines = operations
            .iter()
            .filter(|operation| operation.operator == "T*")
            .count();
        assert_eq!(new_lines, 4);
    }
}
