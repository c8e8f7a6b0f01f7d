pub mod bill;
pub mod doctor;

pub use bill::BillService;
pub use doctor::DoctorService;
