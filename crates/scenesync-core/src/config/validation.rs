//! Configuration validation and error reporting

use super::types::Config;
use crate::error::Result;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(config: &Config) -> Result<()> {
        for ext in &config.exclude_extensions {
            if ext.trim_start_matches('.').trim().is_empty() {
                anyhow::bail!("Excluded extension cannot be empty");
            }
        }

        for name in &config.exclude_names {
            if name.trim().is_empty() {
                anyhow::bail!("Excluded name cannot be empty");
            }
        }

        for pattern in &config.ignore {
            if pattern.trim().is_empty() {
                anyhow::bail!("Ignore pattern cannot be empty");
            }
        }

        if let Some(doc) = &config.progress_document
            && (doc.has_root() || doc.as_os_str().is_empty())
        {
            anyhow::bail!(
                "progress_document must be a path relative to data_root, got '{}'",
                doc.display()
            );
        }

        if let Some(label) = &config.volume.label
            && label.trim().is_empty()
        {
            anyhow::bail!("Volume label cannot be empty");
        }

        if let Some(name) = &config.desktop.data_dir_name
            && name.trim().is_empty()
        {
            anyhow::bail!("desktop.data_dir_name cannot be empty");
        }

        Ok(())
    }
}
