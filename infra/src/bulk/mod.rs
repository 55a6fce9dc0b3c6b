//! Bulk endpoint adapters for the ingestion pipeline

pub mod http_destination;


pub use http_destination::HttpBulkDestination;
