/// Outstanding request for a single control, such as a submit or scan button.
///
/// Claimed with [`InFlight::begin`] in the event handler before the request is
/// spawned, released with [`InFlight::finish`] once it settles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InFlight {
    active: bool,
}

impl InFlight {
    /// Claims the control. Returns false if a request is already outstanding.
    pub fn begin(&mut self) -> bool {
        !std::mem::replace(&mut self.active, true)
    }

    pub fn finish(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
