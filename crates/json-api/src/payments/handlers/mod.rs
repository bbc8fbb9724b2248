//! Payment handlers

pub(crate) mod initiate;
pub(crate) mod verify;
