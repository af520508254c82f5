//! Async retrieval of raw contract records from the open-data catalog.
//!
//! [`socrata`] pages through the SECOP II dataset one signing year at a time,
//! retrying failed pages with exponential backoff.

pub mod socrata;
