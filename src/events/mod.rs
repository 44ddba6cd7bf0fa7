pub mod keyboard;
pub mod pointer;
pub mod scroll;
pub mod strip;

use folio_core::InputLatch;
use std::cell::RefCell;
use std::rc::Rc;

pub type SharedLatch = Rc<RefCell<InputLatch>>;

pub use keyboard::wire_scroll_keys;
pub use pointer::{wire_hover, wire_magnetic, wire_pointermove};
pub use scroll::{
    wire_anchor_links, wire_contact_submit, wire_native_scroll, wire_resize, wire_touch,
    wire_wheel,
};
pub use strip::wire_projects_strip;
