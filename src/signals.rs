use core::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

static STOP: AtomicBool = AtomicBool::new(false);

/// Whether Ctrl-C was pressed since `initialize`. Running searches poll this
/// once per generation and return their best tour so far.
pub fn received_ctrl_c() -> bool {
    STOP.load(Ordering::SeqCst)
}

pub fn initialize() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        STOP.store(true, Ordering::SeqCst);
    })
}
