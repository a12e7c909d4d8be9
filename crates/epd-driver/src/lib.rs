//! E-paper panel output.
//!
//! Packs monochrome rasters into the 1-bit frame layout panels expect and
//! hands them to an [`EpdDevice`]. [`EpdCanvas`] ties a device to an
//! in-memory raster so the dashboard can draw straight "onto the panel".

pub mod canvas;
pub mod device;
pub mod frame;
pub mod panel;
pub mod spool;

pub use canvas::EpdCanvas;
pub use device::EpdDevice;
pub use frame::{pack_frame, unpack_frame};
pub use panel::Panel;
pub use spool::{PowerState, SpoolDevice};
