use std::sync::Mutex;

use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use tracing::{error, info, warn};

use crate::locator::ProcessLocator;

/// Delivery attempts per toggle before giving up.
const MAX_ATTEMPTS: u32 = 5;

/// Delivers the toggle signal to a PID.
pub trait SignalSender: Send + Sync {
    fn send(&self, pid: u32) -> nix::Result<()>;
}

/// Sends SIGUSR2, which Jamulus interprets as "toggle recording".
pub struct ToggleSignal;

impl SignalSender for ToggleSignal {
    fn send(&self, pid: u32) -> nix::Result<()> {
        kill(Pid::from_raw(pid as i32), Signal::SIGUSR2)
    }
}

/// Owns the tracked PID of the target process and delivers toggle signals
/// to it. Delivery is fire-and-forget: there is no way to confirm the
/// target acted on the signal, and failures are never surfaced to callers.
pub struct SignalDispatcher {
    pid: Mutex<u32>,
    process_name: String,
    locator: Box<dyn ProcessLocator>,
    sender: Box<dyn SignalSender>,
}

impl SignalDispatcher {
    pub fn new(
        initial_pid: u32,
        process_name: String,
        locator: Box<dyn ProcessLocator>,
        sender: Box<dyn SignalSender>,
    ) -> Self {
        Self {
            pid: Mutex::new(initial_pid),
            process_name,
            locator,
            sender,
        }
    }

    pub fn tracked_pid(&self) -> u32 {
        match self.pid.lock() {
            Ok(pid) => *pid,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Attempts to deliver the toggle signal, re-resolving the PID and
    /// retrying when the target appears to have restarted. Gives up after
    /// [`MAX_ATTEMPTS`] deliveries, or immediately when re-resolution
    /// returns the same PID (the process is alive but the signal is being
    /// refused, so retrying cannot help).
    pub fn toggle(&self) {
        for _attempt in 0..MAX_ATTEMPTS {
            let pid = self.tracked_pid();
            match self.sender.send(pid) {
                Ok(()) => {
                    info!(pid, "delivered recording toggle signal");
                    return;
                }
                Err(errno) => {
                    warn!(
                        pid, %errno,
                        "failed to signal {} process, assuming it restarted",
                        self.process_name
                    );
                    let Some(new_pid) = self.locator.locate(&self.process_name) else {
                        warn!(
                            "no process matching \"{}\" is running anymore, dropping toggle",
                            self.process_name
                        );
                        return;
                    };
                    if new_pid == pid {
                        warn!(
                            pid,
                            "PID unchanged after re-resolution, missing privileges \
                             for the kill syscall? will not retry"
                        );
                        return;
                    }
                    match self.pid.lock() {
                        Ok(mut tracked) => *tracked = new_pid,
                        Err(e) => {
                            error!("failed to update tracked PID: {}", e);
                            return;
                        }
                    }
                }
            }
        }
        warn!(
            "giving up on toggling recording state after {} attempts",
            MAX_ATTEMPTS
        );
    }
}
