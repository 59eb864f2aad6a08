//! # Database State
//!
//! The local storage database and the receipt output directory.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! let saved = db.inner().local_storage().get(STORAGE_KEY).await?;
//! let path = db.documents().save(&doc.filename, &bytes).await?;
//! ```

use firewood_store::{Database, DocumentStore};

#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
    documents: DocumentStore,
}

impl DbState {
    pub fn new(db: Database, documents: DocumentStore) -> Self {
        DbState { db, documents }
    }

    pub fn inner(&self) -> &Database {
        &self.db
    }

    /// Where generated PDFs are "downloaded" to.
    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }
}
