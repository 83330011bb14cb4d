use std::borrow::Cow;
use std::io::{self, Write};

use sentiment_core::Presenter;

const PROMPT: &str = "tweet> ";

/// Line-oriented presentation surface.
///
/// Display commands only update the buffered regions; [`TerminalPresenter::render`]
/// prints the result line once per batch so a loading transition shows up as a
/// single line rather than five partial ones.
pub struct TerminalPresenter<W: Write> {
    out: W,
    interactive: bool,
    message: String,
    icon: String,
    visible: bool,
    changed: bool,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, interactive: bool) -> Self {
        Self {
            out,
            interactive,
            message: String::new(),
            icon: String::new(),
            visible: false,
            changed: false,
        }
    }

    pub fn prompt(&mut self) -> io::Result<()> {
        if self.interactive {
            write!(self.out, "{PROMPT}")?;
            self.out.flush()?;
        }
        Ok(())
    }

    pub fn render(&mut self) -> io::Result<()> {
        if !std::mem::take(&mut self.changed) || !self.visible {
            return Ok(());
        }
        let message = strip_control(&self.message);
        let icon = strip_control(&self.icon);
        if icon.is_empty() {
            writeln!(self.out, "{message}")?;
        } else {
            writeln!(self.out, "{icon} {message}")?;
        }
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn set_message(&mut self, text: &str) {
        self.message = text.to_owned();
        self.changed = true;
    }

    fn set_icon(&mut self, icon: &str) {
        self.icon = icon.to_owned();
        self.changed = true;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.changed = true;
    }

    // The reader thread consumes each line as it is submitted; there is no
    // editable buffer left to clear.
    fn clear_input(&mut self) {}
}

/// Collaborator strings are shown verbatim apart from control characters, which
/// could otherwise drive the terminal.
fn strip_control(text: &str) -> Cow<'_, str> {
    if text.chars().any(char::is_control) {
        Cow::Owned(text.chars().filter(|c| !c.is_control()).collect())
    } else {
        Cow::Borrowed(text)
    }
}
