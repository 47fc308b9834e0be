/// Implemented by collaborators that react to game events (renderers, loggers).
pub trait EventHandler<T> {
    fn handle_event(&mut self, event: &T);
}
