pub mod events;
pub mod game;
pub mod model;
pub mod store;
