//! Batch orchestration over an external field source
//!
//! The file-discovery collaborator sits behind the [`FieldSource`] trait:
//! it hands over batches of in-memory [`CfField`] objects and releases its
//! open file handles when told a batch is done. [`scan`] drives that source
//! lazily, one field at a time, parsing each into a [`ParsedField`] and
//! skipping fields with no usable time axis. A single malformed file aborts
//! the remaining traversal; callers needing partial-failure tolerance must
//! wrap the iterator themselves.

use tracing::debug;

use crate::Result;
use crate::app::models::{CfField, CimProperties, SimulationId};
use crate::app::services::field_parser;
use crate::app::services::time::CfDateTime;

/// External source of CF fields, batched per file
pub trait FieldSource {
    /// The next batch of fields, or `None` once the traversal is exhausted
    fn next_batch(&mut self) -> Option<Vec<CfField>>;

    /// Release any file handles held open for the batch just consumed
    ///
    /// Called exactly once per exhausted batch, bounding the peak number of
    /// open descriptors across a large traversal.
    fn release_handles(&mut self);
}

/// One successfully parsed field with its derived simulation metadata
#[derive(Debug, Clone)]
pub struct ParsedField {
    /// The original field, passed through for downstream consumers
    pub field: CfField,
    /// Canonical identity of the simulation run this file belongs to
    pub identifier: SimulationId,
    /// Normalized CIM2 property set
    pub properties: CimProperties,
    /// Simulation date span (length 1 or 2)
    pub dates: Vec<CfDateTime>,
}

/// Lazily parse every field the source yields
pub fn scan<S: FieldSource>(source: S) -> Scan<S> {
    Scan {
        source,
        batch: Vec::new().into_iter(),
        batch_open: false,
        failed: false,
    }
}

/// Pull-based iterator over parsed fields
///
/// Nothing is buffered beyond the current batch; each field's property set
/// is private to its iteration step.
pub struct Scan<S> {
    source: S,
    batch: std::vec::IntoIter<CfField>,
    batch_open: bool,
    failed: bool,
}

impl<S: FieldSource> Iterator for Scan<S> {
    type Item = Result<ParsedField>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            for field in self.batch.by_ref() {
                match field_parser::parse(&field) {
                    Ok(Some((identifier, properties, dates))) => {
                        return Some(Ok(ParsedField {
                            field,
                            identifier,
                            properties,
                            dates,
                        }));
                    }
                    // No usable time axis: skip this field
                    Ok(None) => continue,
                    Err(error) => {
                        debug!("Failed while parsing: {}", field.path_string());
                        self.failed = true;
                        return Some(Err(error));
                    }
                }
            }
            // Batch exhausted: let the source close its file handles before
            // pulling more.
            if self.batch_open {
                self.source.release_handles();
                self.batch_open = false;
            }
            match self.source.next_batch() {
                Some(batch) => {
                    self.batch = batch.into_iter();
                    self.batch_open = true;
                }
                None => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::field_parser::tests::{cmip5_field, cmip6_field, fixed_field};

    /// In-memory source that counts handle releases
    struct VecSource {
        batches: Vec<Vec<CfField>>,
        releases: usize,
    }

    impl VecSource {
        fn new(batches: Vec<Vec<CfField>>) -> Self {
            Self {
                batches,
                releases: 0,
            }
        }
    }

    impl FieldSource for &mut VecSource {
        fn next_batch(&mut self) -> Option<Vec<CfField>> {
            if self.batches.is_empty() {
                None
            } else {
                Some(self.batches.remove(0))
            }
        }

        fn release_handles(&mut self) {
            self.releases += 1;
        }
    }

    #[test]
    fn test_scan_parses_all_fields() {
        let mut source = VecSource::new(vec![vec![cmip6_field(), cmip5_field()]]);
        let parsed: Vec<_> = scan(&mut source).collect();
        assert_eq!(parsed.len(), 2);
        assert!(parsed.iter().all(|item| item.is_ok()));
    }

    #[test]
    fn test_scan_skips_fields_without_usable_dates() {
        let mut source = VecSource::new(vec![vec![fixed_field(), cmip6_field()]]);
        let parsed: Vec<_> = scan(&mut source).collect();
        assert_eq!(parsed.len(), 1);
        let item = parsed[0].as_ref().unwrap();
        assert_eq!(
            item.properties.str_value("mip_era"),
            Some("CMIP6"),
            "only the field with a time axis should survive"
        );
    }

    #[test]
    fn test_scan_releases_handles_once_per_batch() {
        let mut source = VecSource::new(vec![
            vec![cmip6_field()],
            vec![cmip5_field()],
            vec![fixed_field()],
        ]);
        let parsed: Vec<_> = scan(&mut source).collect();
        assert_eq!(parsed.len(), 2);
        assert_eq!(source.releases, 3);
    }

    #[test]
    fn test_scan_aborts_on_first_error() {
        // A field with usable dates but no detectable era is a hard failure.
        let mut unknown_era = cmip6_field();
        unknown_era.attributes = crate::app::models::GlobalAttributes::new();
        let mut source = VecSource::new(vec![vec![unknown_era, cmip6_field()]]);

        let mut iterator = scan(&mut source);
        let first = iterator.next().unwrap();
        assert!(matches!(first, Err(crate::Error::UnsupportedEra { .. })));
        assert!(iterator.next().is_none(), "iterator fuses after an error");
    }
}
