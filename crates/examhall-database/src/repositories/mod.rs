//! PostgreSQL implementations of the repository capability traits.

pub mod allotment;
pub mod exam;
pub mod registration;
pub mod room;
pub mod staff;

pub use allotment::AllotmentRepository;
pub use exam::ExamRepository;
pub use registration::RegistrationRepository;
pub use room::RoomRepository;
pub use staff::StaffRepository;
