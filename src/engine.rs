use raylib::prelude::*;

/// Something the main loop updates and draws once per frame.
pub trait Widget {
    fn update(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread);
    fn draw(&self, d: &mut RaylibDrawHandle);
}
