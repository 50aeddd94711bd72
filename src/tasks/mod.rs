//! Background Tasks Module
//!
//! Houses the per-cache expiry reaper.

mod reaper;

pub(crate) use reaper::spawn_reaper_task;
