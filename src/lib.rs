pub mod fmt;
pub mod report;
pub mod runtime;
pub mod symbol;
pub mod term;
#[cfg(test)]
mod tests;
