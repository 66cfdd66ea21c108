//! Background tasks spawned from `main`.

pub mod retention;
