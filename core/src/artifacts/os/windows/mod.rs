pub(crate) mod shortcuts;
