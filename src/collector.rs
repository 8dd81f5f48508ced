use tracing::debug;

use crate::models::BankMetrics;
use crate::rows::RowSequence;

/// Gather the metrics of every complete row, in row order. Incomplete rows
/// are skipped without comment; an empty result means nothing is submittable.
pub fn collect(rows: &RowSequence) -> Vec<BankMetrics> {
    let mut banks = Vec::with_capacity(rows.len());
    for row in rows.rows() {
        if !row.is_complete() {
            debug!(position = row.position(), "skipping incomplete bank row");
            continue;
        }
        let mut metrics = BankMetrics::default();
        for slot in row.fields() {
            metrics.insert(slot.field, slot.input.value.clone());
        }
        banks.push(metrics);
    }
    banks
}
