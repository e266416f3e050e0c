// Configuration module
// Named load profiles and scenario selection

pub mod load_profiles;

pub use load_profiles::{filter_scenarios, get_load_profile, print_profiles, PROFILE_NAMES};
