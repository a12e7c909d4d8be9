//! The panel device abstraction.

use epd_common::EpdResult;
use image::GrayImage;

use crate::frame::pack_frame;
use crate::panel::Panel;

/// A panel that accepts packed 1-bit frames.
///
/// Lifecycle: `init` wakes the controller, `clear` blanks it to white,
/// `display` pushes a frame, `sleep` powers it down until the next `init`.
pub trait EpdDevice {
    fn panel(&self) -> Panel;

    fn init(&mut self) -> EpdResult<()>;

    fn clear(&mut self) -> EpdResult<()>;

    /// Push a frame produced by [`EpdDevice::getbuffer`].
    fn display(&mut self, frame: &[u8]) -> EpdResult<()>;

    fn sleep(&mut self) -> EpdResult<()>;

    /// Pack a raster into this panel's frame layout.
    fn getbuffer(&self, image: &GrayImage) -> EpdResult<Vec<u8>> {
        pack_frame(&self.panel(), image)
    }
}

impl<D: EpdDevice + ?Sized> EpdDevice for Box<D> {
    fn panel(&self) -> Panel {
        (**self).panel()
    }

    fn init(&mut self) -> EpdResult<()> {
        (**self).init()
    }

    fn clear(&mut self) -> EpdResult<()> {
        (**self).clear()
    }

    fn display(&mut self, frame: &[u8]) -> EpdResult<()> {
        (**self).display(frame)
    }

    fn sleep(&mut self) -> EpdResult<()> {
        (**self).sleep()
    }

    fn getbuffer(&self, image: &GrayImage) -> EpdResult<Vec<u8>> {
        (**self).getbuffer(image)
    }
}
