pub mod impl_fake;
pub mod impl_tty;
pub mod interface;
