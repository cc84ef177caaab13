//! Extractors: one per target record kind, each turning the normalized
//! snapshot into rows ready for insertion. Extractors that need ids
//! resolve them through the [`Resolver`](crate::resolver::Resolver) and
//! therefore run after the phase that inserted the referenced entities.

pub mod addresses;
pub mod balances;
pub mod coins;
pub mod liquidity_pools;
pub mod orders;
pub mod stakes;
pub mod unbonds;
pub mod validators;
