use image::DynamicImage;
use ratatui::layout::Rect;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;

use super::loader::scale_to_fit;

/// Image protocol handler for ratatui-based rendering
pub struct ImageProtocol {
    /// Protocol picker that auto-detects terminal capabilities
    pub picker: Picker,
    /// Last rendered state and the panel area it was scaled for
    cached: Option<(Rect, StatefulProtocol)>,
    /// Number of times a bitmap has been scaled into a protocol state
    rescales: usize,
}

impl ImageProtocol {
    /// Create a new image protocol handler
    /// Auto-detects terminal capabilities (Kitty, Sixel, iTerm2, or Halfblocks fallback)
    pub fn new() -> Self {
        let picker = Picker::from_query_stdio().unwrap_or_else(|_| {
            // Fallback to default font size if detection fails
            Picker::from_fontsize((8, 12))
        });

        ImageProtocol {
            picker,
            cached: None,
            rescales: 0,
        }
    }

    /// Pixel size of a cell area for the detected font
    pub fn pixel_size(&self, area: Rect) -> (u32, u32) {
        let (font_w, font_h) = self.picker.font_size();
        (
            u32::from(area.width) * u32::from(font_w),
            u32::from(area.height) * u32::from(font_h),
        )
    }

    /// Protocol state for `bitmap` stretched over `area`
    /// Rescales only when the area changed since the last call
    pub fn state_for(&mut self, bitmap: &DynamicImage, area: Rect) -> &mut StatefulProtocol {
        if self
            .cached
            .as_ref()
            .is_some_and(|(cached_area, _)| *cached_area != area)
        {
            self.cached = None;
        }

        let (width, height) = self.pixel_size(area);
        let picker = &mut self.picker;
        let rescales = &mut self.rescales;
        let (_, state) = self.cached.get_or_insert_with(|| {
            *rescales += 1;
            log::debug!("Scaling preview to {}x{} px (#{})", width, height, rescales);
            let scaled = scale_to_fit(bitmap, width, height);
            (area, picker.new_resize_protocol(scaled))
        });
        state
    }

    /// Handler with a fixed font size, no terminal query
    #[cfg(test)]
    pub(crate) fn with_font_size(font_size: (u16, u16)) -> Self {
        ImageProtocol {
            picker: Picker::from_fontsize(font_size),
            cached: None,
            rescales: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_cached(&self) -> bool {
        self.cached.is_some()
    }

    /// Drop the cached state (call whenever the previewed bitmap changes)
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

impl Default for ImageProtocol {
    fn default() -> Self {
        Self::new()
    }
}
