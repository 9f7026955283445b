pub mod events;
pub mod inbox;
pub mod keys;
pub mod relay;
pub mod stores;
