use winit::window::Window;

use crate::coords::Viewport;
use crate::stage::Container;

/// The window's client area is the container; its size is re-read on every call.
impl Container for Window {
    fn measure(&self) -> Viewport {
        Viewport::from(self.inner_size())
    }
}
