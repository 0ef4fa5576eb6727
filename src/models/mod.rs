pub mod profile;

pub use profile::{HealthProfile, ProfileSource, StaticProfileSource};
