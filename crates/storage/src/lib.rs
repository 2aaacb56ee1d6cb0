// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! flowml-storage: local state for the FlowML CLI
//!
//! Two concerns, both plain JSON files under the state directory:
//! - the pipeline session snapshot persisted between CLI invocations
//! - the demo credential store (explicitly not production auth)

mod error;

pub mod credentials;
pub mod session;

pub use credentials::{AuthError, CredentialStore, PublicUser, UserRecord};
pub use error::StorageError;
pub use session::SessionStore;
