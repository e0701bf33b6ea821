pub mod constants;
pub mod image_asset;
