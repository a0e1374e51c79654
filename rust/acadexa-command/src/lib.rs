//! # ACADEXA command dispatcher
//!
//! Executes parsed voice commands on behalf of an authenticated
//! [`Principal`] and wraps every answer in a [`ResponseEnvelope`]. The
//! surface is read-only: write commands are recognised but never run.
//!
//! Access is decided in one place. [`Policy`] maps each intent and [`Role`]
//! to an [`Access`] mode, and scope resolution pins self-scoped commands to
//! the principal's linked profile before any handler sees them. Data comes
//! from a [`RecordStore`]; [`MemoryRecordStore`] serves a JSON [`Dataset`].
//!
//! ```rust
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! use acadexa_command::{Dispatcher, MemoryRecordStore, Principal, ResultsType};
//!
//! let store = MemoryRecordStore::from_json(
//!     r#"{ "students": [{ "id": 3, "name": "Ali Raza", "department": "EE" }] }"#,
//! )?;
//! let dispatcher = Dispatcher::new(store);
//!
//! let envelope = dispatcher
//!     .submit_command("show student 3", &Principal::admin(1))
//!     .await?;
//! assert_eq!(envelope.results_type, Some(ResultsType::Student));
//! assert_eq!(envelope.results["name"], "Ali Raza");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
pub use error::*;

mod principal;
pub use principal::*;

mod records;
pub use records::*;

mod store;
pub use store::*;

mod memory;
pub use memory::*;

mod policy;
pub use policy::*;

pub mod scope;

mod envelope;
pub use envelope::*;

mod handler;

mod dispatcher;
pub use dispatcher::*;
