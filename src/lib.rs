//! Backend for the dispute-resolution panel mailing list: member records,
//! spreadsheet import, and invitation emails.

pub mod configuration;
pub mod dispatch;
pub mod domain;
pub mod email_client;
pub mod ingestion;
pub mod invitation;
pub mod routes;
pub mod spreadsheet;
pub mod startup;
pub mod store;
pub mod telemetry;
pub mod utils;
