pub mod slots;
pub mod occupancy;
pub mod restrictions;
pub mod store;
pub mod availability;

pub use availability::AvailabilityService;
pub use restrictions::RestrictionContext;
pub use store::{ScheduleStore, SupabaseScheduleStore};
