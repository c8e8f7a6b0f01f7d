pub mod booking;
pub mod schedule;
pub mod time;

pub use booking::BookingService;
pub use schedule::ScheduleService;
