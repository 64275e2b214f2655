//! Waarden en node-metadata die tussen de componenten en de host worden
//! uitgewisseld.

pub mod node;
pub mod value;
