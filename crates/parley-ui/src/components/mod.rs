pub mod guarded;
pub mod nav;
