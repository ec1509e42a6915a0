use std::path::{Path, PathBuf};

use base64::Engine as _;

use crate::configuration::{FieldPlacement, ServiceConfiguration};
use crate::error::ContextError;
use crate::fields::{field_value, file_identifier, RequestFields};
use crate::pdf::{AppendMode, ImageXObject, PdfDocument, StandardFont};

const FIELD_FONT_SIZE: f32 = 12.0;

/// Reads the base64 text file holding the signature and decodes the image it encodes.
pub fn load_signature(signature_path: &Path) -> Result<ImageXObject, ContextError> {
    let encoded_signature = std::fs::read_to_string(signature_path).map_err(|error| {
        ContextError::with_path("Unable to read the signature", signature_path, &error)
    })?;
    decode_signature(&encoded_signature)
}

/// Decodes a base64 encoded PNG or JPEG image, surrounding whitespace is ignored.
pub fn decode_signature(encoded_signature: &str) -> Result<ImageXObject, ContextError> {
    let signature_bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded_signature.trim())
        .map_err(|error| ContextError::with_error("Unable to decode the signature base64", &error))?;
    ImageXObject::from_bytes(&signature_bytes)
}

/// Writes each placed field on the first page of the template, on top of its existing content,
/// then stamps the signature with its lower-left corner at the given position.
pub fn overlay_template(
    pdf_document: &mut PdfDocument,
    placements: &[FieldPlacement],
    fields: &RequestFields,
    signature: &ImageXObject,
    signature_position: [f32; 2],
) -> Result<(), ContextError> {
    let first_page_id = pdf_document
        .page_ids()
        .into_iter()
        .next()
        .ok_or(ContextError::with_context("The template has no pages"))?;

    let mut surface = pdf_document.surface(first_page_id, AppendMode::Append);
    for placement in placements {
        let [x, y] = placement.position;
        surface.begin_text();
        surface.set_font(StandardFont::Helvetica, FIELD_FONT_SIZE);
        surface.new_line_at_offset(x, y);
        surface.show_text(field_value(fields, &placement.field));
        surface.end_text();
    }
    let [x, y] = signature_position;
    surface.draw_image(signature, x, y);

    surface.finish()
}

/// Fills the configured template with the request fields and the signature, and saves the result
/// as `template-output-<cpf>.pdf`.
pub fn fill_template(
    configuration: &ServiceConfiguration,
    fields: &RequestFields,
) -> Result<PathBuf, ContextError> {
    let cpf = file_identifier(field_value(fields, "cpf"))?;
    let mut pdf_document = PdfDocument::load(&configuration.template_path)?;
    let signature = load_signature(&configuration.signature_path)?;

    overlay_template(
        &mut pdf_document,
        &configuration.template_fields,
        fields,
        &signature,
        configuration.signature_position,
    )?;

    let output_path = configuration.output_path(&format!("template-output-{cpf}.pdf"));
    pdf_document.save(&output_path)?;

    log::info!(
        "Template {:?} filled and saved to {:?}",
        configuration.template_path,
        output_path
    );

    Ok(output_path)
}
