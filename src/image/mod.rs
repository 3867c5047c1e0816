pub mod loader;
pub mod protocol;

pub use loader::{
    DecodeError, FileError, Preview, SUPPORTED_EXTENSIONS, decode, is_supported_path,
    read_image_file, scale_to_fit,
};
pub use protocol::ImageProtocol;

/// Create an image protocol handler using ratatui-image
///
/// Uses ratatui-image's Picker which auto-detects terminal capabilities:
/// - Kitty graphics protocol
/// - Sixel protocol
/// - iTerm2 protocol
/// - Halfblocks fallback (always works)
pub fn create_image_protocol() -> ImageProtocol {
    let protocol = ImageProtocol::new();
    log::debug!("Created ratatui-image protocol (auto-detected terminal capabilities)");
    protocol
}
