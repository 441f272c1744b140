/// Implemented by services that fold emitted events into their own state.
pub trait EventHandler<T> {
    fn handle_event(&mut self, event: &T);
}
