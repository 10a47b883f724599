//! Course room assignment: predict enrollment from history, then greedily
//! place the largest courses into the smallest sufficient rooms at the
//! earliest free timeslots.

pub mod assign;
pub mod data;
pub mod generate;
pub mod io;
pub mod predict;
pub mod server;
