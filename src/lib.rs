//! Secure file destruction and data protection toolkit.
//!
//! Three concerns, usable independently:
//!
//! - **Destruction**: multi-pass overwrite deletion of files and whole
//!   directory trees ([`destroy`], [`secure_delete`]). Overwrite strategies
//!   are composable [`OverwritePass`] values collected into a
//!   [`DestructionPolicy`]; the destroyer is maximal-effort and reports
//!   both an aggregate verdict and per-path failures.
//! - **Encryption**: AES-128 encryption and decryption of files, byte
//!   buffers, and strings under a caller-supplied 16-byte key
//!   ([`cipher`]).
//! - **Hardware identity**: a SHA-256 fingerprint over machine serial
//!   numbers, behind an injectable platform-query seam ([`hwid`]).
//!
//! Everything is synchronous, single-threaded, blocking I/O; resource
//! acquisitions are scoped and released on every path. Diagnostics go
//! through the [`log`] facade and vanish when no logger is installed.

pub mod cipher;
pub mod destroy;
pub mod fill;
pub mod hwid;
pub mod passes;

pub use cipher::{CipherError, CipherResult, KEY_LEN};
pub use destroy::{
    delete, destroy, secure_delete, DestructionFailure, DestructionReport, FailureStage,
};
pub use hwid::{fingerprint, fingerprint_hex, DeviceClass, PlatformQuery, SystemQuery};
pub use passes::{DestructionPolicy, OverwritePass, PassError, PassResult};
