use burnbox_common::ValidationError;

/// Valida o conteúdo de um segredo antes de armazená-lo.
///
/// O tamanho é medido em bytes UTF-8. O conteúdo em si nunca é alterado.
pub fn validate_content(content: &str, max_bytes: usize) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    if content.len() > max_bytes {
        return Err(ValidationError::TooLarge { max: max_bytes });
    }
    Ok(())
}
