//! Open/closed toggles, switches and click-away detection.

/// Open/closed flag behind popovers such as the assistant selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Toggle {
    on: bool,
}

impl Toggle {
    pub fn new(initial: bool) -> Self {
        Self { on: initial }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn toggle(&mut self) {
        self.on = !self.on;
    }

    pub fn open(&mut self) {
        self.on = true;
    }

    pub fn close(&mut self) {
        self.on = false;
    }
}

/// On/off switch shown in node headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Switch {
    pub checked: bool,
    pub disabled: bool,
}

impl Switch {
    /// The value a click requests, `None` while disabled.
    pub fn click(&self) -> Option<bool> {
        if self.disabled { None } else { Some(!self.checked) }
    }
}

/// Where a pointer-down landed relative to a tracked element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The event had no target node.
    None,
    Inside,
    Outside,
}

/// Reports pointer-downs that land outside a tracked element, such as a
/// popover that should close when the user clicks elsewhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickAway {
    mounted: bool,
}

impl ClickAway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self) {
        self.mounted = true;
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    /// Whether the pointer-down should dismiss the element.
    pub fn on_pointer_down(
        &self,
        target: PointerTarget,
    ) -> bool {
        self.mounted && target == PointerTarget::Outside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut t = Toggle::default();
        assert!(!t.is_on());
        t.toggle();
        assert!(t.is_on());
        t.close();
        assert!(!t.is_on());
        t.open();
        t.open();
        assert!(t.is_on());
        assert!(Toggle::new(true).is_on());
    }

    #[test]
    fn test_switch_click() {
        let s = Switch { checked: true, disabled: false };
        assert_eq!(s.click(), Some(false));
        let s = Switch { checked: true, disabled: true };
        assert_eq!(s.click(), None);
    }

    #[test]
    fn test_click_away() {
        let mut c = ClickAway::new();
        assert!(!c.on_pointer_down(PointerTarget::Outside));
        c.mount();
        assert!(c.on_pointer_down(PointerTarget::Outside));
        assert!(!c.on_pointer_down(PointerTarget::Inside));
        assert!(!c.on_pointer_down(PointerTarget::None));
        c.unmount();
        assert!(!c.on_pointer_down(PointerTarget::Outside));
    }
}
