pub mod source;
pub mod spi;
