pub mod domain;
pub mod service;
pub mod store;

pub use domain::{RescueRequest, RescueSubmission};
pub use service::{RescueRequestService, RescueServiceError, SubmissionReceipt};
pub use store::{CsvRequestStore, RequestStore, StoreError};
