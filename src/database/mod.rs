mod core;
mod helpers;
mod models;
mod repertoires;
mod songs;
mod store;

pub use core::SongbookDatabase;
pub use store::{LedgerRecord, SongStore};
