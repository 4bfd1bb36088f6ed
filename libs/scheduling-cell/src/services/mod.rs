pub mod availability;
pub mod booking;
pub mod calendar;
pub mod conflict;
pub mod projector;
pub mod slots;
