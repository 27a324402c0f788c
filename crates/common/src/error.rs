/// Erros do store de segredos.
///
/// Id desconhecido, já consumido, expirado ou malformado caem todos em
/// `NotFound`: o chamador não pode distinguir um caso do outro.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("segredo não encontrado ou já acessado")]
    NotFound,
}

/// Erros de validação do conteúdo submetido na criação.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("conteúdo vazio")]
    Empty,
    #[error("conteúdo excede o tamanho máximo ({max} bytes)")]
    TooLarge { max: usize },
}

/// Result type alias.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_display() {
        let err = StorageError::NotFound;
        assert_eq!(err.to_string(), "segredo não encontrado ou já acessado");
    }

    #[test]
    fn validation_error_display() {
        assert_eq!(ValidationError::Empty.to_string(), "conteúdo vazio");
        let err = ValidationError::TooLarge { max: 100_000 };
        assert_eq!(
            err.to_string(),
            "conteúdo excede o tamanho máximo (100000 bytes)"
        );
    }
}
