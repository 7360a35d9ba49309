//! Core graph data structures

mod character;
mod edge;
mod network;


pub use character::CharacterId;
pub use edge::{Edge, EdgeKey};
pub use network::{CharacterGraph, Neighbors};
