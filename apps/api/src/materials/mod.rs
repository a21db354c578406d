// Material Store and the upload boundary that feeds it.

pub mod handlers;
pub mod ingest;
pub mod store;
