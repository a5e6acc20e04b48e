pub mod error;
pub mod gardens;
pub mod session;
pub mod users;

pub use error::ServiceError;
pub use gardens::GardenService;
pub use session::Session;
