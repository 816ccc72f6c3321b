//! Translators onto the native submission models.

pub mod dx11;
pub mod dx12;
