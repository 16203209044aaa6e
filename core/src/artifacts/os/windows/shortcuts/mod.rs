mod header;
mod items;
mod location;
mod network;
mod shellitems;
mod shortcut;
mod strings;
mod volume;

pub(crate) mod details;
pub mod error;
pub(crate) mod parser;
pub(crate) mod patch;
pub(crate) mod shortname;
pub(crate) mod writer;
