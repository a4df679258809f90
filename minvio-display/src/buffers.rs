//! The two rasters behind a display and which one is being drawn into.

use minvio_pixelbuffer::Raster;

/// Names one of the two buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferId {
    A,
    B,
}

impl BufferId {
    fn index(self) -> usize {
        match self {
            BufferId::A => 0,
            BufferId::B => 1,
        }
    }

    /// The other buffer.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            BufferId::A => BufferId::B,
            BufferId::B => BufferId::A,
        }
    }
}

/// Two same-sized rasters. Drawing targets the active one; a refresh
/// presents it and makes the other active.
///
/// Buffers are not cleared on flip, so the newly active buffer still holds
/// whatever was drawn into it two frames ago.
#[derive(Debug, Clone)]
pub struct BufferPair {
    buffers: [Raster; 2],
    active: BufferId,
}

impl BufferPair {
    /// Two cleared `width`×`height` buffers with [`BufferId::A`] active.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buffers: [Raster::new(width, height), Raster::new(width, height)],
            active: BufferId::A,
        }
    }

    pub fn active(&self) -> BufferId {
        self.active
    }

    pub fn active_buffer(&self) -> &Raster {
        &self.buffers[self.active.index()]
    }

    pub fn active_buffer_mut(&mut self) -> &mut Raster {
        &mut self.buffers[self.active.index()]
    }

    pub fn buffer(&self, id: BufferId) -> &Raster {
        &self.buffers[id.index()]
    }

    /// Make the other buffer active and return its id.
    pub fn flip(&mut self) -> BufferId {
        self.active = self.active.other();
        self.active
    }

    pub fn dimensions(&self) -> (u32, u32) {
        let raster = &self.buffers[0];
        (raster.width(), raster.height())
    }
}
