//! Extension traits

mod budget;
mod depot;

pub(crate) use budget::BudgetExt as _;
pub(crate) use depot::DepotExt as _;
