use std::path::{Path, PathBuf};

use crate::configuration::ServiceConfiguration;
use crate::error::ContextError;
use crate::fields::file_identifier;
use crate::pdf::PdfDocument;

/// The document placed first in the merge: the filled template of the given CPF when it has
/// been generated, otherwise the shared template.
pub fn resolve_primary(configuration: &ServiceConfiguration, cpf: &str) -> PathBuf {
    let filled_template_path = configuration.output_path(&format!("template-output-{cpf}.pdf"));
    if filled_template_path.is_file() {
        filled_template_path
    } else {
        log::debug!(
            "No filled template at {:?}, falling back to {:?}",
            filled_template_path,
            configuration.template_path
        );
        configuration.template_path.clone()
    }
}

/// Builds a new document holding all the pages of `primary` followed by all the pages of `secondary`.
pub fn merge_documents(
    primary: &Path,
    secondary: &Path,
    identifier: &str,
) -> Result<PdfDocument, ContextError> {
    let mut merged_document = PdfDocument::new(identifier);
    for source_path in [primary, secondary] {
        let source_document = PdfDocument::load(source_path)?;
        merged_document.append_pages_from(source_document)?;
    }

    Ok(merged_document)
}

/// Merges the primary document of the CPF with the term and saves the result as `merged-<cpf>.pdf`.
pub fn merge_by_identifier(
    configuration: &ServiceConfiguration,
    cpf: &str,
) -> Result<PathBuf, ContextError> {
    let cpf = file_identifier(cpf)?;
    let primary_path = resolve_primary(configuration, cpf);
    let mut merged_document = merge_documents(
        &primary_path,
        &configuration.term_path,
        &format!("merged-{cpf}"),
    )?;

    let output_path = configuration.output_path(&format!("merged-{cpf}.pdf"));
    merged_document.save(&output_path)?;

    log::info!(
        "Merged {:?} and {:?} into {:?} ({} pages)",
        primary_path,
        configuration.term_path,
        output_path,
        merged_document.page_count()
    );

    Ok(output_path)
}
