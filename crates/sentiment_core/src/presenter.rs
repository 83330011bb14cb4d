use crate::DisplayCommand;

/// The presentation surface the submission handler drives.
///
/// Implementors own three display regions (the input field, a message region
/// and an icon region) plus the visibility of the result container. The core
/// never touches them directly; it emits [`DisplayCommand`]s that the front end
/// feeds through [`Presenter::apply`].
pub trait Presenter {
    fn set_message(&mut self, text: &str);
    fn set_icon(&mut self, icon: &str);
    fn set_visible(&mut self, visible: bool);
    fn clear_input(&mut self);

    fn apply(&mut self, command: &DisplayCommand) {
        match command {
            DisplayCommand::SetMessage(text) => self.set_message(text),
            DisplayCommand::SetIcon(icon) => self.set_icon(icon),
            DisplayCommand::SetVisible(visible) => self.set_visible(*visible),
            DisplayCommand::ClearInput => self.clear_input(),
        }
    }

    fn apply_all<'a, I>(&mut self, commands: I)
    where
        I: IntoIterator<Item = &'a DisplayCommand>,
        Self: Sized,
    {
        for command in commands {
            self.apply(command);
        }
    }
}
