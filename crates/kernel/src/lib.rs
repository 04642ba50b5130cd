pub mod seed;
pub mod settings;

pub use seed::{Collection, SeedPlan};
pub use settings::Settings;
