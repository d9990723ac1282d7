pub mod loc;
pub mod num;
pub mod seq;
pub mod trace;
