pub mod alert;
pub mod appointment;
pub mod schedule;
pub mod vehicle;

pub use alert::MaintenanceAlert;
pub use appointment::{Appointment, NewAppointment, ServiceCenter, STATUS_SCHEDULED};
pub use schedule::{
    duration_minutes, ErrorBody, Priority, ScheduleArguments, ScheduleRecommendation, ScheduleResponse,
    SchedulingRequest,
};
pub use vehicle::Vehicle;
