use crate::documents::ChangeLogEntry;
use crate::store::DocumentStore;

/// Best-effort audit logger for direct legacy mutations.
///
/// Write failures are reported through `log` and never surface to the
/// caller; the mutation that produced the entry has already happened.
pub struct ChangeLogger<'a, S> {
    store: &'a S,
}

impl<'a, S: DocumentStore> ChangeLogger<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn log_changes(&self, entries: Vec<ChangeLogEntry>) {
        if entries.is_empty() {
            return;
        }
        let count = entries.len();
        if let Err(e) = self.store.append_logs(entries).await {
            log::warn!("Failed to write {} change log entries: {}", count, e);
        }
    }
}
