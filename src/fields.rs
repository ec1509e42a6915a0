use std::collections::HashMap;

use crate::error::ContextError;

/// The key-value payload of a request. A key can be absent or explicitly `null`.
pub type RequestFields = HashMap<String, Option<String>>;

/// The value of the field as it is printed: absent and `null` values both read as the literal `null`.
pub fn field_value<'a>(fields: &'a RequestFields, key: &str) -> &'a str {
    fields
        .get(key)
        .and_then(Option::as_deref)
        .unwrap_or("null")
}

/// Checks that the identifier can be used inside a file name without leaving the output directory.
pub fn file_identifier(identifier: &str) -> Result<&str, ContextError> {
    if identifier.contains(['/', '\\']) || identifier.contains("..") {
        return Err(ContextError::with_context(format!(
            "The identifier {:?} can't be used in a file name",
            identifier
        )));
    }

    Ok(identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_null_fields_read_as_null() {
        let fields: RequestFields =
            serde_json::from_str(r#"{ "nome": "Ana", "status": null }"#).unwrap();

        assert_eq!(field_value(&fields, "nome"), "Ana");
        assert_eq!(field_value(&fields, "status"), "null");
        assert_eq!(field_value(&fields, "cpf"), "null");
    }

    #[test]
    fn identifiers_with_path_components_are_rejected() {
        assert_eq!(file_identifier("12345678900").unwrap(), "12345678900");
        assert_eq!(file_identifier("null").unwrap(), "null");
        for identifier in ["../escape", "a/b", "a\\b", ".."] {
            let error = file_identifier(identifier).unwrap_err();
            assert!(error.context.contains("file name"), "{identifier}");
        }
    }
}
