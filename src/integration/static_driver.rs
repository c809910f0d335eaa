use core::cell::RefCell;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Slot for a driver that lives in a `static` and is reached from the C interface.
///
/// Accesses are serialised through a critical section. A driver must not call back into the
/// slot it is running from.
pub struct StaticDriver<D> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Option<D>>>,
}

impl<D> Default for StaticDriver<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> StaticDriver<D> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Install `driver`, returning the previously installed one.
    pub fn install(&self, driver: D) -> Option<D> {
        self.inner.lock(|cell| cell.borrow_mut().replace(driver))
    }

    /// Remove and return the installed driver.
    pub fn uninstall(&self) -> Option<D> {
        self.inner.lock(|cell| cell.borrow_mut().take())
    }

    pub fn is_installed(&self) -> bool {
        self.inner.lock(|cell| cell.borrow().is_some())
    }

    /// Run `f` on the installed driver. Returns `None` if no driver is installed.
    pub fn with<R>(&self, f: impl FnOnce(&mut D) -> R) -> Option<R> {
        self.inner.lock(|cell| cell.borrow_mut().as_mut().map(f))
    }
}
