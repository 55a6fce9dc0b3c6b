//! Record batches for bulk upload.

use serde_json::Value;
use std::ops::Range;

/// An ordered slice of records delivered as one unit of retry
#[derive(Debug, Clone, PartialEq)]
pub struct UploadBatch {
    /// Position of the batch in the run, starting at 0
    pub index: usize,

    /// Index of the first record of this batch in the full record list
    pub first_record: usize,

    pub records: Vec<Value>,
}

impl UploadBatch {
    /// Splits records into consecutive batches of at most `size` records
    ///
    /// A `size` of 0 is treated as 1.
    pub fn chunk(records: Vec<Value>, size: usize) -> Vec<UploadBatch> {
        let size = size.max(1);
        let mut batches = Vec::with_capacity(records.len().div_ceil(size));
        let mut records = records.into_iter().peekable();
        let mut first_record = 0;

        while records.peek().is_some() {
            let chunk: Vec<Value> = records.by_ref().take(size).collect();
            let len = chunk.len();
            batches.push(UploadBatch {
                index: batches.len(),
                first_record,
                records: chunk,
            });
            first_record += len;
        }

        batches
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Indices of the records this batch carries
    pub fn record_range(&self) -> Range<usize> {
        self.first_record..self.first_record + self.records.len()
    }
}
