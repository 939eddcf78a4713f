//! Tri-colour alert indicator.
//!
//! Red while an alert is active, green otherwise.  The blue channel is
//! wired on the board but held low so the LED shows a pure colour.

use embedded_hal::digital::OutputPin;

pub struct Indicator<R, G, B> {
    red: R,
    green: G,
    blue: B,
}

impl<R, G, B> Indicator<R, G, B>
where
    R: OutputPin,
    G: OutputPin<Error = R::Error>,
    B: OutputPin<Error = R::Error>,
{
    /// Starts in the normal (green) state.
    pub fn new(red: R, green: G, blue: B) -> Result<Self, R::Error> {
        let mut ind = Self { red, green, blue };
        ind.set(false)?;
        Ok(ind)
    }

    pub fn set(&mut self, alert: bool) -> Result<(), R::Error> {
        self.red.set_state(alert.into())?;
        self.green.set_state((!alert).into())?;
        self.blue.set_low()
    }
}
