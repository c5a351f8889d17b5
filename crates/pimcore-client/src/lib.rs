//! Client for the Pimcore `webservice/rest` HTTP API.
//!
//! Wraps the backend's keyed-URL protocol behind a typed surface:
//!
//! - [`PimcoreClient`]: CRUD, existence checks, search/count, and the
//!   fixed single-purpose endpoints (`user`, `server-info`, `system-clock`).
//! - [`transport`]: one HTTP call per invocation, normalized into
//!   [`BridgeResult`]. The server's heterogeneous success/error envelopes
//!   all collapse into `Ok(ApiSuccess)` or `Err(BridgeError)`.
//! - [`batch`]: concurrent fan-out of an async operation over a list,
//!   partitioned into success/error buckets without aborting on failures.
//! - [`copy`]: shallow and recursive clone-and-reparent built on top of
//!   the bridge and the batch executor.
//!
//! Every public operation resolves to a value; failures of the remote
//! service or the transport are returned, not thrown.

pub mod batch;
pub mod client;
pub mod config;
pub mod copy;
pub mod error;
pub mod resource;
pub mod transport;

pub use batch::{run_batch, BatchOutcome};
pub use client::{GetParams, PimcoreClient, SearchQuery};
pub use config::{ConnectionConfig, FaultMessageSource, ResponseOptions};
pub use copy::{CopyParams, CopyReport, ShallowCopy};
pub use error::{BridgeError, BridgeResult, CopyError};
pub use transport::ApiSuccess;
