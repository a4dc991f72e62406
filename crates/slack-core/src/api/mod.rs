pub mod channels;
pub mod client;
pub mod envelope;
pub mod messages;
pub mod models;
pub mod pagination;
pub mod params;
pub mod reactions;
pub mod search;
pub mod team;
pub mod transport;
pub mod users;
