mod analyze;

pub use analyze::analyze_plant;
