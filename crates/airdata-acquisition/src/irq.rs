//! Tick interrupt control and the scoped critical section.

use portable_atomic::{AtomicBool, AtomicU32, Ordering};

/// Mask/unmask control for the periodic sampling interrupt.
///
/// Implementations mask only the tick source. On target this maps onto the
/// interrupt controller's per-line enable bit (for example `NVIC::mask` for the
/// timer line); global interrupt disabling is not an acceptable implementation.
///
/// `mask` and `unmask` must act as compiler barriers so that slot accesses
/// are not reordered across them.
pub trait TickInterrupt {
    /// Mask the tick source.
    ///
    /// Returns `true` if it was already masked before this call.
    fn mask(&self) -> bool;

    /// Unmask the tick source.
    fn unmask(&self);

    /// True while the tick source is masked.
    fn is_masked(&self) -> bool;
}

impl<T: TickInterrupt + ?Sized> TickInterrupt for &T {
    #[inline]
    fn mask(&self) -> bool {
        (**self).mask()
    }

    #[inline]
    fn unmask(&self) {
        (**self).unmask();
    }

    #[inline]
    fn is_masked(&self) -> bool {
        (**self).is_masked()
    }
}

/// Critical section over the tick interrupt, released on drop.
///
/// Acquiring masks the tick source; dropping restores the state found at
/// acquisition. A guard taken while the tick was already masked (nested
/// sections, or the timer not yet enabled at startup) leaves it masked when
/// dropped.
///
/// ```rust
/// use airdata_acquisition::{SoftwareTickInterrupt, TickInterrupt, TickMask};
///
/// let irq = SoftwareTickInterrupt::new();
/// {
///     let _outer = TickMask::acquire(&irq);
///     {
///         let _inner = TickMask::acquire(&irq);
///     }
///     assert!(irq.is_masked());
/// }
/// assert!(!irq.is_masked());
/// ```
#[derive(Debug)]
#[must_use = "the tick interrupt is unmasked as soon as the guard is dropped"]
pub struct TickMask<'a, I: TickInterrupt + ?Sized> {
    irq: &'a I,
    was_masked: bool,
}

impl<'a, I: TickInterrupt + ?Sized> TickMask<'a, I> {
    /// Mask the tick source until the returned guard is dropped.
    pub fn acquire(irq: &'a I) -> Self {
        let was_masked = irq.mask();
        Self { irq, was_masked }
    }

    /// True if the tick was already masked when this guard was taken.
    #[must_use]
    pub fn was_masked(&self) -> bool {
        self.was_masked
    }
}

impl<I: TickInterrupt + ?Sized> Drop for TickMask<'_, I> {
    fn drop(&mut self) {
        if !self.was_masked {
            self.irq.unmask();
        }
    }
}

/// Mask/unmask transition counts of a [`SoftwareTickInterrupt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaskStats {
    /// Unmasked → masked transitions.
    pub masks: u32,
    /// Masked → unmasked transitions.
    pub unmasks: u32,
}

impl MaskStats {
    /// True when every mask has been matched by an unmask.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.masks == self.unmasks
    }
}

/// Atomic stand-in for the tick interrupt line.
///
/// Used on the host, in simulation and in tests. Counts transitions so tests
/// can check that every critical section was released.
#[derive(Debug, Default)]
pub struct SoftwareTickInterrupt {
    masked: AtomicBool,
    masks: AtomicU32,
    unmasks: AtomicU32,
}

impl SoftwareTickInterrupt {
    /// Create an unmasked interrupt line.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            masked: AtomicBool::new(false),
            masks: AtomicU32::new(0),
            unmasks: AtomicU32::new(0),
        }
    }

    /// Create a line that starts masked, as at reset before the timer is enabled.
    #[must_use]
    pub const fn masked() -> Self {
        Self {
            masked: AtomicBool::new(true),
            masks: AtomicU32::new(0),
            unmasks: AtomicU32::new(0),
        }
    }

    /// Transition counts.
    #[must_use]
    pub fn stats(&self) -> MaskStats {
        MaskStats {
            masks: self.masks.load(Ordering::Relaxed),
            unmasks: self.unmasks.load(Ordering::Relaxed),
        }
    }
}

impl TickInterrupt for SoftwareTickInterrupt {
    fn mask(&self) -> bool {
        let was_masked = self.masked.swap(true, Ordering::AcqRel);
        if !was_masked {
            self.masks.fetch_add(1, Ordering::Relaxed);
        }
        was_masked
    }

    fn unmask(&self) {
        if self.masked.swap(false, Ordering::AcqRel) {
            self.unmasks.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn is_masked(&self) -> bool {
        self.masked.load(Ordering::Acquire)
    }
}
