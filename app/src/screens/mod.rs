//! Screen state. Each screen loads what it needs from storage when it is
//! created and writes through on every change; screens share nothing in
//! memory. Navigation passes a `SearchRequest` and nothing else.

pub mod home;
pub mod results;

pub use home::HomeScreen;
pub use results::ResultsScreen;
