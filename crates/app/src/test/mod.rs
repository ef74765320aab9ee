//! Shared test fixtures.

mod context;
mod helpers;

pub(crate) use capture::{ScriptedCameras, ScriptedDecoder};
pub(crate) use context::TestContext;
pub(crate) use helpers::wait_until;
