// EventSheet - core/classify.rs
//
// Buckets log lines by the event phrases they contain.
//
// Matching is plain case-sensitive substring containment. A line holding
// several phrases lands in every corresponding bucket. Lines are gathered in
// encounter order and each bucket is reversed once at the end, so the last
// line read is first in its bucket.

use crate::core::model::{Bucket, Classification, EventCatalog};
use crate::util::logging::preview;

/// Classify `lines` against every definition in `catalog`.
///
/// The result holds one bucket per definition, in catalog order, including
/// empty ones. Stored lines are trimmed of surrounding whitespace; matching
/// is done against the untrimmed line.
pub fn classify<S: AsRef<str>>(lines: &[S], catalog: &EventCatalog) -> Classification {
    let mut buckets: Vec<Bucket> = catalog
        .definitions()
        .iter()
        .map(|d| Bucket {
            event: d.name.clone(),
            lines: Vec::new(),
        })
        .collect();

    for line in lines {
        let line = line.as_ref();
        for (def, bucket) in catalog.definitions().iter().zip(buckets.iter_mut()) {
            // An empty phrase would match every line.
            if !def.phrase.is_empty() && line.contains(def.phrase.as_str()) {
                tracing::trace!(event = %def.name, line = preview(line), "Line matched");
                bucket.lines.push(line.trim().to_string());
            }
        }
    }

    for bucket in &mut buckets {
        bucket.lines.reverse();
        if !bucket.lines.is_empty() {
            tracing::debug!(event = %bucket.event, matches = bucket.lines.len(), "Event matched");
        }
    }

    Classification { buckets }
}
