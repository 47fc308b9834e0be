// the controller and its channel listeners hold Rc cycles; this breaks them explicitly
pub trait Destroyable {
    fn destroy(&mut self);
}
