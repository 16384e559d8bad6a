use shapeguard_validate::MessageCatalog;

/// Per-mount validation behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// When true, findings are recorded on the context instead of halting.
    pub transfer_errors: bool,
    /// When true, top-level fields absent from the schema are findings.
    pub strict_mode: bool,
    /// Message templates used to render findings.
    pub locales: MessageCatalog,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            transfer_errors: false,
            strict_mode: false,
            locales: MessageCatalog::english(),
        }
    }
}
