//! Context file I/O.
//!
//! A context is a single pretty-printed JSON file. Writes go to a sibling
//! `.tmp` file first and are renamed over the target, so a reader never sees a
//! half-written context.

use std::{fs, path::Path};

use tracing::{info, warn};

use crate::{ContextDocument, Manager, ResultEngine};

pub fn read_document(path: &Path) -> ResultEngine<ContextDocument> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn write_document(path: &Path, document: &ContextDocument) -> ResultEngine<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut json = serde_json::to_string_pretty(document)?;
    json.push('\n');

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);
    fs::write(&tmp, json)?;
    if let Err(err) = fs::rename(&tmp, path) {
        warn!("rename of {} failed ({err}), copying instead", tmp.display());
        fs::copy(&tmp, path)?;
        let _ = fs::remove_file(&tmp);
    }
    Ok(())
}

impl Manager {
    /// Load a manager from a context file.
    pub fn load(path: impl AsRef<Path>) -> ResultEngine<Self> {
        let path = path.as_ref();
        let manager = Self::from_document(read_document(path)?)?;
        info!(
            path = %path.display(),
            persons = manager.persons.len(),
            transactions = manager.transactions.len(),
            "context loaded"
        );
        Ok(manager)
    }

    /// Rewrite the context file with the whole state.
    pub fn save(&self, path: impl AsRef<Path>) -> ResultEngine<()> {
        let path = path.as_ref();
        write_document(path, &self.to_document())?;
        info!(path = %path.display(), "context saved");
        Ok(())
    }
}
