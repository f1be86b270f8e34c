//! Power latch abstraction
//!
//! On battery the badge only stays powered while firmware holds the power
//! latch. A button press wakes the board, firmware keeps the latch asserted
//! while it redraws, then releases it and the board switches itself off. On
//! external power releasing the latch does nothing and firmware keeps running.

/// Battery power hold / release.
pub trait PowerLatch {
    /// Keep the board powered (assert the latch)
    fn keepalive(&mut self);

    /// Release the latch; on battery this powers the board off
    fn halt(&mut self);

    /// `true` while USB / external power keeps the board alive regardless of
    /// the latch
    fn on_external_power(&self) -> bool {
        false
    }
}

/// Holds the power latch for the lifetime of the guard.
///
/// Created at the start of a unit of work; when it goes out of scope the
/// latch is released, including on early return through `?`.
pub struct AwakeGuard<'a, P: PowerLatch + ?Sized> {
    latch: &'a mut P,
}

impl<'a, P: PowerLatch + ?Sized> AwakeGuard<'a, P> {
    /// Assert the latch and return a guard that releases it on drop
    pub fn hold(latch: &'a mut P) -> Self {
        latch.keepalive();
        Self { latch }
    }

    /// Re-assert the latch mid-task (long refreshes)
    pub fn refresh(&mut self) {
        self.latch.keepalive();
    }
}

impl<P: PowerLatch + ?Sized> Drop for AwakeGuard<'_, P> {
    fn drop(&mut self) {
        self.latch.halt();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockPower;

    #[test]
    fn test_guard_keeps_alive_then_halts() {
        let mut power = MockPower::new();
        {
            let _guard = AwakeGuard::hold(&mut power);
        }
        assert_eq!(power.keepalive_count(), 1);
        assert_eq!(power.halt_count(), 1);
    }

    #[test]
    fn test_guard_halts_on_early_return() {
        fn work(power: &mut MockPower) -> Result<(), ()> {
            let mut guard = AwakeGuard::hold(power);
            guard.refresh();
            Err(())
        }

        let mut power = MockPower::new();
        assert!(work(&mut power).is_err());
        assert_eq!(power.keepalive_count(), 2);
        assert_eq!(power.halt_count(), 1);
    }

    #[test]
    fn test_default_is_battery() {
        let power = MockPower::new();
        assert!(!power.on_external_power());
    }
}
