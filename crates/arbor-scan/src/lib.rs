//! Directory tree builder for arbor.
//!
//! Walks a filesystem subtree and produces an [`arbor_core::Node`] tree
//! annotated with sizes, digests and the other metadata selected through
//! [`arbor_core::ScanOptions`]. Synchronous ([`Scanner`]) and
//! asynchronous ([`AsyncScanner`]) builders honor the same configuration
//! and produce field-identical trees.

mod hasher;
mod scan;
mod scan_async;

pub use hasher::NodeHasher;
pub use scan::{Observer, Scanner, scan};
pub use scan_async::{AsyncObserver, AsyncScanner, BoxFuture, scan_async};
