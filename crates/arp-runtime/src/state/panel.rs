//! Grab/drop control panel

/// Which interaction buttons are on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlPanel {
    pub grab_visible: bool,
    pub drop_visible: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            grab_visible: true,
            drop_visible: false,
        }
    }
}

impl ControlPanel {
    /// Grab is offered while idle, drop while holding
    pub fn sync(&mut self, holding: bool) {
        self.grab_visible = !holding;
        self.drop_visible = holding;
    }
}
