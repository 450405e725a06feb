pub mod collision;
pub mod feedback;
pub mod movement;
pub mod snake;
pub mod spin;
pub mod time;
pub mod timeout;
