use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use std::io;

/// Keeps terminal mouse reporting switched on for as long as the value is
/// alive.  Clicks are then delivered through the ordinary event stream, so
/// one of these per program is all that is needed.
#[derive(Debug)]
pub(crate) struct MouseCapture(());

impl MouseCapture {
    pub(crate) fn enable() -> io::Result<MouseCapture> {
        execute!(io::stdout(), EnableMouseCapture)?;
        log::debug!("Mouse reporting enabled");
        Ok(MouseCapture(()))
    }
}

impl Drop for MouseCapture {
    fn drop(&mut self) {
        match execute!(io::stdout(), DisableMouseCapture) {
            Ok(()) => log::debug!("Mouse reporting disabled"),
            Err(e) => log::warn!("Failed to disable mouse reporting: {e}"),
        }
    }
}
