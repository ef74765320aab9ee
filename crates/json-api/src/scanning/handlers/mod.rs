//! Scanning Handlers

pub(crate) mod start;
pub(crate) mod status;
pub(crate) mod stop;
