pub mod booking;
pub mod language;
pub mod output;
pub mod responses;

pub use booking::{Attendee, Booking, BookingRecord, BookingStatus, HostUser};
pub use language::BookingLanguage;
pub use output::{
    AttendeeOutput, BookingOutput, HostOutput, OutputStatus, RecurringBookingOutput,
    RescheduledBookingOutput,
};
pub use responses::BookingResponses;
