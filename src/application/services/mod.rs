//! Application services - business rules over the ledger

pub mod economy;

pub use economy::EconomyService;
