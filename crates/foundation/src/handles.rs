/// Dense slot handle into per-component storage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u32);

impl Handle {
    pub fn new(index: u32) -> Self {
        Handle(index)
    }

    pub fn index(&self) -> u32 {
        self.0
    }
}
