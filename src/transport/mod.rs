#[cfg(test)]
pub mod impl_fake;
pub mod impl_in_process;
pub mod interface;
