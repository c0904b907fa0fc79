//! Blocking and suspending clients
//!
//! Both clients validate and route the same way, then differ only in how they
//! obtain the response. Decoding and model construction go through
//! [`crate::normalize`] for both.

mod blocking;
mod suspending;

pub use blocking::Client;
pub use suspending::AsyncClient;

use crate::error::Result;
use crate::types::TorahBook;

/// Validate a Torah book before anything is sent
fn torah_book(book: &str) -> Result<TorahBook> {
    let parsed = book.parse::<TorahBook>();
    if parsed.is_err() {
        tracing::debug!("Rejected non-Torah book {:?}", book);
    }
    parsed
}
