use crate::ports::StoreError;

/// Configured table name; blank names are kept and rejected on use so a
/// misconfigured store fails the request rather than startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(Option<String>);

impl TableName {
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim();
        Self((!trimmed.is_empty()).then(|| trimmed.to_string()))
    }

    pub fn get(&self) -> Result<&str, StoreError> {
        self.0
            .as_deref()
            .ok_or(StoreError::NotConfigured("table name"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_name() {
        assert_eq!(TableName::new("  GarageDoorState ").get().unwrap(), "GarageDoorState");
    }

    #[test]
    fn blank_name_is_not_configured() {
        assert_eq!(
            TableName::new("   ").get(),
            Err(StoreError::NotConfigured("table name"))
        );
    }
}
