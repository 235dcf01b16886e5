//! Action generators. Every generator builds its parameter table on the runtime's scratch
//! area, so a failed derivation leaves no entries behind.

mod augment;
mod native;
mod specialize;
mod typechecker;

pub(super) use typechecker::prototype as typechecker_prototype;
